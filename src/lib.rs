//! Persona Lens - descriptive user personas from public Reddit activity
//!
//! Persona Lens turns the recent comments and posts of a Reddit account into
//! a structured persona: demographics, personality, motivations, habits,
//! goals, frustrations, topics and sentiment, each backed by citations to
//! the source items.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐    ┌────────────┐    ┌──────────────────────────┐
//! │ Profile URL / │───▶│  Corpus    │───▶│  Heuristic assembler     │
//! │ username      │    │  source    │    │  (keywords + indicators) │──┐
//! └───────────────┘    │  (Reddit / │    └──────────────────────────┘  │   ┌──────────┐
//!                      │   file)    │    ┌──────────────────────────┐  ├──▶│ Persona  │──▶ text / JSON report
//!                      └────────────┘───▶│  LLM generator (Gemini)  │──┘   └──────────┘
//!                                        └──────────────────────────┘
//! ```
//!
//! Both paths produce the same `Persona` shape. Citations always come from
//! the corpus.
//!
//! ## Modules
//!
//! - [`corpus`]: Source items, corpus model, profile URL resolution
//! - [`fetch`]: Corpus sources (Reddit API, saved corpus files)
//! - [`analysis`]: Keyword extraction, indicator scoring, persona assembly
//! - [`llm`]: LLM prompt, client and answer parsing
//! - [`persona`]: Persona model and reports
//! - [`config`]: Configuration management

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetch;
pub mod llm;
pub mod persona;

pub use analysis::PersonaAssembler;
pub use config::PersonaLensConfig;
pub use corpus::{Corpus, SourceItem, SourceKind};
pub use error::{Error, Result};
pub use persona::Persona;

//! Persona model and report output

pub mod report;
pub mod types;

pub use report::{render_summary, render_text_report, report_file_name, write_report, ReportFormat};
pub use types::{
    display_name, Citation, Decisions, Energy, Lifestyle, Motivations, Perception, Persona,
    Personality, Sentiment, UNKNOWN,
};

//! Document rendering: template → blocks → pages → PDF.

pub mod cover_letter;
pub mod flow;
pub mod font_metrics;
pub mod pdf;
pub mod resume;
pub mod theme;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
}

// PDF export backend for rendered report documents
pub mod pdf;

pub use pdf::{document_to_pdf, PdfError};

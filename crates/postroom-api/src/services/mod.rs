//! Domain services: the recipient intake pipeline and PDF inspection.

pub mod intake;
pub mod pdf;

pub use intake::RecipientIntakeService;
pub use pdf::PdfInspector;

// Adapters layer: concrete implementations for external systems
// (local filesystem, Google APIs, wkhtmltopdf).

pub mod google_auth;
pub mod google_drive;
pub mod storage;
pub mod wkhtmltopdf;

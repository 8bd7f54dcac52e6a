pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod filter;
pub mod formatter;
pub mod messages;
pub mod panel;
pub mod results;
pub mod save;
pub mod session;
pub mod triggers;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{Result, ScrapeError};
pub use extract::{Extractor, extract_visible_text};
pub use filter::is_text_content;
pub use formatter::{TextFormatter, format_record};
pub use results::{ExtractionRecord, ListKind, ListRecord, TableRecord};
pub use session::Session;

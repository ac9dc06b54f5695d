//! Document loading modules

pub mod loader;

// Re-export commonly used items
pub use loader::{
    documents_exist, load_document, parse_document, CRICKET_PREMATCH_FILE, CRICKET_RESULT_FILE,
    VOLLEYBALL_PREMATCH_FILE, VOLLEYBALL_RESULT_FILE,
};

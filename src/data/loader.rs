//! JSON document loading for pre-match odds and match results

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::EvaluatorError;

/// Default document file names inside a data directory
pub const CRICKET_PREMATCH_FILE: &str = "cricket_prematch.json";
pub const CRICKET_RESULT_FILE: &str = "cricket_result.json";
pub const VOLLEYBALL_PREMATCH_FILE: &str = "volleyball_prematch.json";
pub const VOLLEYBALL_RESULT_FILE: &str = "volleyball_result.json";

/// Load and deserialize a JSON document
///
/// Any read or parse failure is a fatal document error naming the path.
pub fn load_document<T, P>(path: P) -> Result<T, EvaluatorError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading document from {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| EvaluatorError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(&content, path)
}

/// Deserialize a JSON document already held in memory
pub fn parse_document<T, P>(content: &str, origin: P) -> Result<T, EvaluatorError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    serde_json::from_str(content).map_err(|source| EvaluatorError::ParseDocument {
        path: origin.as_ref().to_path_buf(),
        source,
    })
}

/// Check that every given document exists
pub fn documents_exist<P: AsRef<Path>>(paths: &[P]) -> bool {
    paths.iter().all(|p| p.as_ref().is_file())
}

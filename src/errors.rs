//! Errors raised while obtaining a category's row set.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// The provider has no data file for the requested category.
    #[error("Dataset for {category} not found at {location}")]
    MissingDataset { category: String, location: String },

    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request for {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed dataset {location} at line {line}: {message}")]
    Malformed {
        location: String,
        line: u64,
        message: String,
    },

    /// The header row is missing, so rows cannot be keyed by symbol.
    #[error("Dataset {location} has no header row")]
    MissingHeader { location: String },
}

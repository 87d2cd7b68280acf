//! Sources of per-category row sets.
//!
//! The reference dataset is published as one CSV file per category named
//! `<category>.csv`. [`LocalCsvProvider`] reads a checked-out copy of those
//! files, [`RemoteCsvProvider`] downloads them over HTTP.

use crate::category::Category;
use crate::dataset::Dataset;
use crate::errors::DatasetError;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub trait DatasetProvider {
    /// Short identifier used in log lines.
    fn id(&self) -> &'static str;

    /// Returns the unfiltered row set for `category`.
    fn select(&self, category: Category) -> Result<Dataset, DatasetError>;
}

pub struct LocalCsvProvider {
    dir: PathBuf,
}

impl LocalCsvProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dataset_path(&self, category: Category) -> PathBuf {
        self.dir.join(category.source_file_name())
    }
}

impl DatasetProvider for LocalCsvProvider {
    fn id(&self) -> &'static str {
        "local-csv"
    }

    fn select(&self, category: Category) -> Result<Dataset, DatasetError> {
        let path = self.dataset_path(category);
        let file = File::open(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DatasetError::MissingDataset {
                    category: category.to_string(),
                    location: path.display().to_string(),
                }
            } else {
                DatasetError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        debug!("Reading {} dataset from {}", category, path.display());
        Dataset::from_csv_reader(BufReader::new(file), &path.display().to_string())
    }
}

pub struct RemoteCsvProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteCsvProvider {
    /// `base_url` must already be normalized (no trailing slash).
    pub fn new(client: reqwest::blocking::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn dataset_url(&self, category: Category) -> String {
        format!("{}/{}", self.base_url, category.source_file_name())
    }
}

impl DatasetProvider for RemoteCsvProvider {
    fn id(&self) -> &'static str {
        "remote-csv"
    }

    fn select(&self, category: Category) -> Result<Dataset, DatasetError> {
        let url = self.dataset_url(category);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| DatasetError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DatasetError::MissingDataset {
                category: category.to_string(),
                location: url,
            });
        }
        if !status.is_success() {
            return Err(DatasetError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| DatasetError::Http {
            url: url.clone(),
            source,
        })?;
        debug!("Downloaded {} bytes for {}", body.len(), category);
        Dataset::from_csv_reader(body.as_ref(), &url)
    }
}

use crate::config::{DatasetSource, ExportSettings};
use crate::http_client::build_blocking_client;
use crate::provider::{DatasetProvider, LocalCsvProvider, RemoteCsvProvider};
use anyhow::Result;
use log::info;
use std::path::Path;

pub struct AppContext {
    settings: ExportSettings,
}

impl AppContext {
    pub fn initialize(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn output_dir(&self) -> &Path {
        &self.settings.output_dir
    }

    /// Builds the dataset provider selected by the settings.
    pub fn provider(&self) -> Result<Box<dyn DatasetProvider>> {
        match &self.settings.source {
            DatasetSource::Directory(dir) => {
                info!("Reading datasets from {}", dir.display());
                Ok(Box::new(LocalCsvProvider::new(dir)))
            }
            DatasetSource::Remote {
                base_url,
                timeout,
                ca_cert,
            } => {
                info!("Downloading datasets from {}", base_url);
                let client = build_blocking_client(Some(*timeout), ca_cert.as_deref())?;
                Ok(Box::new(RemoteCsvProvider::new(client, base_url.clone())))
            }
        }
    }
}

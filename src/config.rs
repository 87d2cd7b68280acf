use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/JerBouma/FinanceDatabase/main/database";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const ALLOWED_URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where the category CSV files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Directory(PathBuf),
    Remote {
        base_url: String,
        timeout: Duration,
        ca_cert: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub source: DatasetSource,
}

/// Raw option values before validation; every field may be unset.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub source_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ca_cert: Option<PathBuf>,
}

impl ExportSettings {
    pub fn resolve(raw: RawSettings) -> Result<Self> {
        let output_dir =
            non_blank_path(raw.output_dir).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let source_dir = non_blank_path(raw.source_dir);
        let source_url = raw
            .source_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let source = match (source_dir, source_url) {
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "--source-dir and --source-url cannot be used together"
                ));
            }
            (Some(dir), None) => {
                if raw.timeout_secs.is_some() || non_blank_path(raw.ca_cert).is_some() {
                    return Err(anyhow!(
                        "--timeout-secs and --ca-cert only apply to downloads and cannot be used with --source-dir"
                    ));
                }
                DatasetSource::Directory(dir)
            }
            (None, url) => {
                let raw_url = url.as_deref().unwrap_or(DEFAULT_SOURCE_URL);
                let base_url = normalize_base_url(raw_url).ok_or_else(|| {
                    anyhow!("Source URL must be an http(s) URL (value: {})", raw_url)
                })?;
                let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
                if timeout_secs == 0 {
                    return Err(anyhow!("Timeout must be > 0 seconds"));
                }
                DatasetSource::Remote {
                    base_url,
                    timeout: Duration::from_secs(timeout_secs),
                    ca_cert: non_blank_path(raw.ca_cert),
                }
            }
        };

        Ok(Self { output_dir, source })
    }
}

fn non_blank_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
}

pub fn normalize_base_url(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    let scheme = ALLOWED_URL_SCHEMES
        .iter()
        .find(|scheme| lower.starts_with(**scheme))?;
    let host = &trimmed[scheme.len()..];
    if host.is_empty() || host.contains(char::is_whitespace) || host.contains(['?', '#']) {
        return None;
    }
    Some(trimmed.to_string())
}

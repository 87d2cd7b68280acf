use anyhow::{Context, Result};
use reqwest::Certificate;
use std::fs;
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("instrument-export/", env!("CARGO_PKG_VERSION"));

fn load_ca_certificate(path: &Path) -> Result<Certificate> {
    let pem = fs::read(path)
        .with_context(|| format!("failed to read CA certificate from {}", path.display()))?;
    Certificate::from_pem(&pem)
        .with_context(|| format!("failed to parse CA certificate from {}", path.display()))
}

pub fn build_blocking_client(
    timeout: Option<Duration>,
    ca_cert: Option<&Path>,
) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(path) = ca_cert {
        builder = builder.add_root_certificate(load_ca_certificate(path)?);
    }
    builder.build().context("failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::build_blocking_client;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn missing_ca_certificate_is_reported() {
        let err = build_blocking_client(
            Some(Duration::from_secs(5)),
            Some(Path::new("/nonexistent/ca.pem")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read CA certificate"));
    }
}

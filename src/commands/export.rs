use crate::category::Category;
use crate::context::AppContext;
use crate::exporter::{export_category, CategoryReport};
use crate::provider::DatasetProvider;
use anyhow::{Context, Result};
use log::info;
use std::io::{self, Write};
use std::path::Path;

pub fn run(app: &AppContext) -> Result<usize> {
    let provider = app.provider()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = export_all(provider.as_ref(), app.output_dir(), &mut out)?;
    Ok(reports.iter().map(|report| report.entries).sum())
}

/// Exports every category in order, writing one summary line per category
/// and a final total to `out`. Stops at the first failing category.
pub fn export_all<W: Write>(
    provider: &dyn DatasetProvider,
    output_dir: &Path,
    out: &mut W,
) -> Result<Vec<CategoryReport>> {
    info!(
        "Exporting {} categories to {}",
        Category::ALL.len(),
        output_dir.display()
    );

    let mut reports = Vec::with_capacity(Category::ALL.len());
    let mut total = 0;
    for category in Category::ALL {
        let report = export_category(category, provider, output_dir)?;
        writeln!(out, "{}", report.summary_line()).context("Failed to write summary")?;
        total += report.entries;
        reports.push(report);
    }

    writeln!(out, "\nTotal: {} instruments exported", total)
        .context("Failed to write summary")?;
    Ok(reports)
}

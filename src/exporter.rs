use crate::category::{Category, CategorySpec};
use crate::dataset::{usable_text, CellValue, Dataset, Row};
use crate::models::InstrumentRecord;
use crate::provider::DatasetProvider;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of exporting one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: Category,
    pub path: PathBuf,
    pub entries: usize,
    pub skipped: usize,
    pub bytes: u64,
}

impl CategoryReport {
    /// File size in KiB, rounded half to even.
    pub fn size_kib(&self) -> u64 {
        (self.bytes as f64 / 1024.0).round_ties_even() as u64
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} entries, {} KB",
            self.category.file_name(),
            self.entries,
            self.size_kib()
        )
    }
}

/// Maps one dataset row to a record, or `None` when symbol or name is unusable.
pub fn build_record(
    spec: &CategorySpec,
    symbol: &CellValue,
    row: &Row,
) -> Option<InstrumentRecord> {
    let symbol = usable_text(Some(symbol))?;
    let name = row.text("name")?;
    let exchange = row.text("exchange").unwrap_or_default();

    let mut record = InstrumentRecord::new(symbol, name, exchange, spec.instrument_type);
    for field in spec.extra_fields {
        if let Some(value) = row.text(field.column) {
            record.extra.push((field.key, value.to_string()));
        }
    }
    Some(record)
}

pub fn build_records(spec: &CategorySpec, dataset: &Dataset) -> Vec<InstrumentRecord> {
    dataset
        .iter()
        .filter_map(|(symbol, row)| build_record(spec, symbol, row))
        .collect()
}

/// Compact JSON output that escapes every non-ASCII character as `\uXXXX`
/// (UTF-16 units, lowercase hex), so files stay pure ASCII.
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Writes `records` as a compact, ASCII-only JSON array, replacing any
/// existing file. Returns the size of the written file in bytes.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[InstrumentRecord]) -> Result<u64> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Unable to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, AsciiFormatter);
    records
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to serialize records to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file {}", path.display()))?;

    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to stat output file {}", path.display()))?;
    Ok(metadata.len())
}

pub fn export_category(
    category: Category,
    provider: &dyn DatasetProvider,
    output_dir: &Path,
) -> Result<CategoryReport> {
    let spec = category.spec();
    let dataset = provider
        .select(category)
        .with_context(|| format!("Failed to load {} from {}", category, provider.id()))?;

    if dataset.is_empty() {
        warn!("{} dataset from {} has no rows", category, provider.id());
    }

    let records = build_records(spec, &dataset);
    let skipped = dataset.len() - records.len();
    if skipped > 0 {
        debug!("Skipped {} {} rows without symbol or name", skipped, category);
    }

    let path = output_dir.join(category.file_name());
    let bytes = write_records(&path, &records)?;
    info!(
        "Exported {} {} records to {}",
        records.len(),
        category,
        path.display()
    );

    Ok(CategoryReport {
        category,
        path,
        entries: records.len(),
        skipped,
        bytes,
    })
}

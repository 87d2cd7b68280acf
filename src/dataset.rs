use crate::errors::DatasetError;
use std::collections::HashMap;
use std::io::Read;

/// Cell contents the reference dataset uses to mean "no value". Matches the
/// default NA markers of the pandas CSV reader the dataset is published for.
pub const MISSING_VALUE_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Text form of the not-a-number marker.
pub const NAN_LITERAL: &str = "nan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Interprets a raw CSV field, mapping NA markers to `Missing`.
    pub fn from_raw(raw: &str) -> Self {
        if MISSING_VALUE_MARKERS.contains(&raw) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

pub fn is_missing_sentinel(value: &CellValue) -> bool {
    match value {
        CellValue::Missing => true,
        CellValue::Text(text) => text == NAN_LITERAL,
    }
}

/// Returns the text of a cell that is present, non-empty and not a sentinel.
pub fn usable_text(value: Option<&CellValue>) -> Option<&str> {
    let value = value?;
    if is_missing_sentinel(value) {
        return None;
    }
    match value {
        CellValue::Text(text) if !text.is_empty() => Some(text.as_str()),
        _ => None,
    }
}

/// One dataset row, addressable by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn with_text(self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(column, CellValue::text(value))
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        usable_text(self.get(column))
    }
}

/// Full row set of one category, keyed by symbol, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<(CellValue, Row)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, Row)>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|(symbol, row)| (CellValue::Text(symbol.into()), row))
                .collect(),
        }
    }

    pub fn push(&mut self, symbol: CellValue, row: Row) {
        self.rows.push((symbol, row));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellValue, &Row)> {
        self.rows.iter().map(|(symbol, row)| (symbol, row))
    }

    /// Parses a CSV whose first column holds the symbol and whose header row
    /// names the remaining columns. Short rows leave trailing columns absent.
    pub fn from_csv_reader<R: Read>(reader: R, location: &str) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| malformed(location, &err))?
            .clone();
        if headers.is_empty() {
            return Err(DatasetError::MissingHeader {
                location: location.to_string(),
            });
        }

        let mut dataset = Dataset::new();
        for result in csv_reader.records() {
            let record = result.map_err(|err| malformed(location, &err))?;
            let symbol = CellValue::from_raw(record.get(0).unwrap_or_default());
            let mut row = Row::new();
            for (index, column) in headers.iter().enumerate().skip(1) {
                if let Some(raw) = record.get(index) {
                    row.insert(column, CellValue::from_raw(raw));
                }
            }
            dataset.push(symbol, row);
        }

        Ok(dataset)
    }
}

fn malformed(location: &str, err: &csv::Error) -> DatasetError {
    DatasetError::Malformed {
        location: location.to_string(),
        line: err.position().map(|position| position.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_detection_covers_marker_and_literal() {
        assert!(is_missing_sentinel(&CellValue::Missing));
        assert!(is_missing_sentinel(&CellValue::text("nan")));
        assert!(!is_missing_sentinel(&CellValue::text("")));
        assert!(!is_missing_sentinel(&CellValue::text("Technology")));
    }

    #[test]
    fn usable_text_rejects_absent_empty_and_sentinel() {
        let row = Row::new()
            .with_text("name", "Apple Inc.")
            .with_text("exchange", "")
            .with("sector", CellValue::Missing)
            .with_text("industry", "nan");

        assert_eq!(row.text("name"), Some("Apple Inc."));
        assert_eq!(row.text("exchange"), None);
        assert_eq!(row.text("sector"), None);
        assert_eq!(row.text("industry"), None);
        assert_eq!(row.text("country"), None);
    }

    #[test]
    fn csv_uses_first_column_as_symbol_and_maps_na_markers() {
        let csv = "symbol,name,sector,exchange\n\
                   AAPL,Apple Inc.,Technology,NMS\n\
                   MSFT,Microsoft Corporation,,NMS\n\
                   ,Nameless,N/A,NYQ\n\
                   XYZ,Short Row\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes(), "equities.csv").unwrap();
        assert_eq!(dataset.len(), 4);

        let rows: Vec<(&CellValue, &Row)> = dataset.iter().collect();
        assert_eq!(rows[0].0, &CellValue::text("AAPL"));
        assert_eq!(rows[0].1.text("sector"), Some("Technology"));
        assert_eq!(rows[1].1.get("sector"), Some(&CellValue::Missing));
        assert_eq!(rows[2].0, &CellValue::Missing);
        assert_eq!(rows[2].1.get("sector"), Some(&CellValue::Missing));
        assert_eq!(rows[3].1.text("name"), Some("Short Row"));
        assert_eq!(rows[3].1.get("exchange"), None);
    }

    #[test]
    fn csv_with_quoted_commas_keeps_field_intact() {
        let csv = "symbol,name,exchange\n^GSPC,\"S&P 500, Index\",SNP\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes(), "indices.csv").unwrap();
        let (symbol, row) = dataset.iter().next().unwrap();
        assert_eq!(symbol, &CellValue::text("^GSPC"));
        assert_eq!(row.text("name"), Some("S&P 500, Index"));
    }

    #[test]
    fn csv_without_header_is_rejected() {
        let err = Dataset::from_csv_reader("".as_bytes(), "etfs.csv").unwrap_err();
        assert!(matches!(err, DatasetError::MissingHeader { .. }));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut bytes = b"symbol,name\nAAA,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.push(b'\n');
        let err = Dataset::from_csv_reader(bytes.as_slice(), "cryptos.csv").unwrap_err();
        match err {
            DatasetError::Malformed { location, .. } => assert_eq!(location, "cryptos.csv"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

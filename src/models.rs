use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Category tag written as the `t` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentType {
    Index,
    Equity,
    Etf,
    Crypto,
}

impl InstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Index => "index",
            InstrumentType::Equity => "equity",
            InstrumentType::Etf => "etf",
            InstrumentType::Crypto => "crypto",
        }
    }
}

/// Compact search entry written to the category JSON files.
///
/// Serializes as `{"s":..,"n":..,"e":..,"t":..}` followed by the extra keys
/// in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentRecord {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub instrument_type: InstrumentType,
    pub extra: Vec<(&'static str, String)>,
}

impl InstrumentRecord {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        instrument_type: InstrumentType,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            instrument_type,
            extra: Vec::new(),
        }
    }
}

impl Serialize for InstrumentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.extra.len()))?;
        map.serialize_entry("s", &self.symbol)?;
        map.serialize_entry("n", &self.name)?;
        map.serialize_entry("e", &self.exchange)?;
        map.serialize_entry("t", self.instrument_type.as_str())?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

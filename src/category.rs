use crate::models::InstrumentType;
use std::fmt;

/// Instrument classes exported by the tool. Discriminants index `CATEGORY_SPECS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Indices = 0,
    Equities = 1,
    Etfs = 2,
    Cryptos = 3,
}

impl Category {
    /// Export order used by the top-level driver.
    pub const ALL: [Category; 4] = [
        Category::Indices,
        Category::Equities,
        Category::Etfs,
        Category::Cryptos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Indices => "indices",
            Category::Equities => "equities",
            Category::Etfs => "etfs",
            Category::Cryptos => "cryptos",
        }
    }

    pub fn spec(&self) -> &'static CategorySpec {
        &CATEGORY_SPECS[*self as usize]
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    pub fn source_file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra column carried into the output record under a short key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraField {
    pub column: &'static str,
    pub key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySpec {
    pub instrument_type: InstrumentType,
    pub extra_fields: &'static [ExtraField],
}

const EQUITY_EXTRA_FIELDS: &[ExtraField] = &[ExtraField {
    column: "sector",
    key: "sec",
}];

pub static CATEGORY_SPECS: [CategorySpec; 4] = [
    CategorySpec {
        instrument_type: InstrumentType::Index,
        extra_fields: &[],
    },
    CategorySpec {
        instrument_type: InstrumentType::Equity,
        extra_fields: EQUITY_EXTRA_FIELDS,
    },
    CategorySpec {
        instrument_type: InstrumentType::Etf,
        extra_fields: &[],
    },
    CategorySpec {
        instrument_type: InstrumentType::Crypto,
        extra_fields: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_spec_with_its_tag() {
        let tags: Vec<&str> = Category::ALL
            .iter()
            .map(|category| category.spec().instrument_type.as_str())
            .collect();
        assert_eq!(tags, vec!["index", "equity", "etf", "crypto"]);
    }

    #[test]
    fn only_equities_carry_sector() {
        assert_eq!(
            Category::Equities.spec().extra_fields,
            &[ExtraField {
                column: "sector",
                key: "sec"
            }]
        );
        assert!(Category::Indices.spec().extra_fields.is_empty());
        assert!(Category::Etfs.spec().extra_fields.is_empty());
        assert!(Category::Cryptos.spec().extra_fields.is_empty());
    }

    #[test]
    fn file_names_follow_category() {
        assert_eq!(Category::Cryptos.file_name(), "cryptos.json");
        assert_eq!(Category::Indices.source_file_name(), "indices.csv");
    }
}

use itertools::{Itertools, MinMaxResult};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::literal::Literal;

/// Field holding the per-run averages in reporter output.
const SAMPLES_FIELD: &str = "Avgs";

/// Sortable label of one table entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DifficultyKey {
    Number(i64),
    Label(String),
}

impl DifficultyKey {
    fn from_literal(lit: &Literal) -> Option<Self> {
        match lit {
            Literal::Int(i) => Some(Self::Number(*i)),
            Literal::Str(s) => Some(match s.trim().parse::<i64>() {
                Ok(i) => Self::Number(i),
                Err(_) => Self::Label(s.clone()),
            }),
            _ => None,
        }
    }

    fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for DifficultyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(i) => write!(f, "{}", i),
            Self::Label(s) => write!(f, "{}", s),
        }
    }
}

/// The two plotted series. The display name doubles as the field name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum SeriesKind {
    Max,
    Avg,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Max, SeriesKind::Avg];
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("expected a mapping of difficulty keys, found a {0}")]
    Shape(&'static str),
    #[error("entry `{key}` must be a mapping, found a {found}")]
    EntryShape { key: DifficultyKey, found: &'static str },
    #[error("difficulty key {0} must be an integer or a string")]
    InvalidKey(String),
    #[error("difficulty keys mix numbers and labels")]
    MixedKeys,
    #[error("difficulty key `{0}` appears more than once")]
    DuplicateKey(DifficultyKey),
    #[error("entry `{key}` has field \"{field}\" more than once")]
    DuplicateField { key: DifficultyKey, field: String },
    #[error("entry `{key}` is missing field \"{field}\"")]
    MissingField { key: DifficultyKey, field: SeriesKind },
    #[error("entry `{key}` field \"{field}\" is not a finite number")]
    NotANumber { key: DifficultyKey, field: String },
    #[error("the statistics table is empty")]
    EmptyTable,
}

/// Statistics for one difficulty key
#[derive(Debug, Clone, PartialEq)]
pub struct StatsEntry {
    pub max: f64,
    pub avg: f64,
    /// Per-run averages, when the producer included them.
    pub samples: Vec<f64>,
}

impl StatsEntry {
    pub fn new(max: f64, avg: f64) -> Self {
        Self {
            max,
            avg,
            samples: Vec::new(),
        }
    }

    pub fn value(&self, kind: SeriesKind) -> f64 {
        match kind {
            SeriesKind::Max => self.max,
            SeriesKind::Avg => self.avg,
        }
    }

    /// Lowest and highest per-run average
    pub fn sample_range(&self) -> Option<(f64, f64)> {
        match self.samples.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
        }
    }

    fn from_literal(key: &DifficultyKey, lit: &Literal) -> Result<Self, TableError> {
        let Literal::Map(fields) = lit else {
            return Err(TableError::EntryShape {
                key: key.clone(),
                found: lit.kind(),
            });
        };

        let field = |kind: SeriesKind| -> Result<f64, TableError> {
            let name = kind.to_string();
            let mut found = fields
                .iter()
                .filter(|(k, _)| matches!(k, Literal::Str(s) if *s == name))
                .map(|(_, v)| v);

            let value = found.next().ok_or_else(|| TableError::MissingField {
                key: key.clone(),
                field: kind,
            })?;
            if found.next().is_some() {
                return Err(TableError::DuplicateField {
                    key: key.clone(),
                    field: name.clone(),
                });
            }
            finite(value).ok_or_else(|| TableError::NotANumber {
                key: key.clone(),
                field: name.clone(),
            })
        };

        let max = field(SeriesKind::Max)?;
        let avg = field(SeriesKind::Avg)?;

        let mut sample_fields = fields
            .iter()
            .filter(|(k, _)| matches!(k, Literal::Str(s) if s == SAMPLES_FIELD));
        let first_samples = sample_fields.next();
        if sample_fields.next().is_some() {
            return Err(TableError::DuplicateField {
                key: key.clone(),
                field: SAMPLES_FIELD.to_string(),
            });
        }

        let samples = match first_samples {
            None => Vec::new(),
            Some((_, Literal::List(items))) => items
                .iter()
                .map(finite)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| TableError::NotANumber {
                    key: key.clone(),
                    field: SAMPLES_FIELD.to_string(),
                })?,
            Some(_) => {
                return Err(TableError::NotANumber {
                    key: key.clone(),
                    field: SAMPLES_FIELD.to_string(),
                })
            }
        };

        Ok(Self { max, avg, samples })
    }
}

fn finite(lit: &Literal) -> Option<f64> {
    lit.as_f64().filter(|v| v.is_finite())
}

/// Difficulty key to entry, iterated in ascending key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsTable {
    entries: BTreeMap<DifficultyKey, StatsEntry>,
}

impl StatsTable {
    /// Schema-check a parsed literal of the form `{key: {"Max": n, "Avg": n, ...}}`.
    pub fn from_literal(lit: &Literal) -> Result<Self, TableError> {
        let Literal::Map(pairs) = lit else {
            return Err(TableError::Shape(lit.kind()));
        };

        let mut entries = BTreeMap::new();
        for (key_lit, value) in pairs {
            let key = DifficultyKey::from_literal(key_lit)
                .ok_or_else(|| TableError::InvalidKey(key_lit.to_string()))?;
            let entry = StatsEntry::from_literal(&key, value)?;
            if entries.contains_key(&key) {
                return Err(TableError::DuplicateKey(key));
            }
            entries.insert(key, entry);
        }

        if entries.is_empty() {
            return Err(TableError::EmptyTable);
        }
        if !entries.keys().map(DifficultyKey::is_number).all_equal() {
            return Err(TableError::MixedKeys);
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: DifficultyKey, entry: StatsEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &DifficultyKey) -> Option<&StatsEntry> {
        self.entries.get(key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &DifficultyKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DifficultyKey, &StatsEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::parse;
    use assert_matches::assert_matches;

    fn table(text: &str) -> Result<StatsTable, TableError> {
        StatsTable::from_literal(&parse(text).unwrap())
    }

    #[test]
    fn keys_come_out_sorted() {
        let t = table(r#"{1: {"Max": 10, "Avg": 5}, 3: {"Max": 30, "Avg": 15}, 2: {"Max": 20, "Avg": 12}}"#)
            .unwrap();
        let keys: Vec<_> = t.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                DifficultyKey::Number(1),
                DifficultyKey::Number(2),
                DifficultyKey::Number(3)
            ]
        );
        assert_eq!(t.get(&DifficultyKey::Number(3)), Some(&StatsEntry::new(30.0, 15.0)));
    }

    #[test]
    fn numeric_string_keys_sort_numerically() {
        let t = table(r#"{"10": {"Max": 1, "Avg": 1}, "9": {"Max": 2, "Avg": 2}}"#).unwrap();
        let keys: Vec<_> = t.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["9", "10"]);
    }

    #[test]
    fn label_keys_sort_lexicographically() {
        let t = table(r#"{"hard": {"Max": 1, "Avg": 1}, "easy": {"Max": 2, "Avg": 2}}"#).unwrap();
        let keys: Vec<_> = t.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                DifficultyKey::Label("easy".into()),
                DifficultyKey::Label("hard".into())
            ]
        );
    }

    #[test]
    fn missing_avg_is_reported() {
        let err = table(r#"{1: {"Max": 1, "Avg": 1}, 2: {"Max": 2}}"#).unwrap_err();
        assert_eq!(
            err,
            TableError::MissingField {
                key: DifficultyKey::Number(2),
                field: SeriesKind::Avg
            }
        );
        assert_eq!(err.to_string(), "entry `2` is missing field \"Avg\"");
    }

    #[test]
    fn missing_max_is_reported() {
        assert_matches!(
            table(r#"{1: {"Avg": 1}}"#),
            Err(TableError::MissingField { field: SeriesKind::Max, .. })
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(table("{}"), Err(TableError::EmptyTable));
    }

    #[test]
    fn top_level_must_be_a_mapping() {
        assert_eq!(table("[1, 2]"), Err(TableError::Shape("list")));
    }

    #[test]
    fn entry_must_be_a_mapping() {
        assert_matches!(
            table("{1: 5}"),
            Err(TableError::EntryShape { found: "integer", .. })
        );
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_matches!(
            table(r#"{1: {"Max": "ten", "Avg": 1}}"#),
            Err(TableError::NotANumber { ref field, .. }) if field == "Max"
        );
        assert_matches!(
            table(r#"{1: {"Max": 1, "Avg": 1, "Avgs": [1, "x"]}}"#),
            Err(TableError::NotANumber { ref field, .. }) if field == "Avgs"
        );
    }

    #[test]
    fn rejects_bad_keys() {
        assert_matches!(
            table(r#"{1.5: {"Max": 1, "Avg": 1}}"#),
            Err(TableError::InvalidKey(_))
        );
        assert_eq!(
            table(r#"{1: {"Max": 1, "Avg": 1}, "x": {"Max": 1, "Avg": 1}}"#),
            Err(TableError::MixedKeys)
        );
        assert_eq!(
            table(r#"{1: {"Max": 1, "Avg": 1}, "1": {"Max": 2, "Avg": 2}}"#),
            Err(TableError::DuplicateKey(DifficultyKey::Number(1)))
        );
        assert_matches!(
            table(r#"{1: {"Max": 1, "Max": 2, "Avg": 1}}"#),
            Err(TableError::DuplicateField { ref field, .. }) if field == "Max"
        );
        assert_matches!(
            table(r#"{1: {"Max": 1, "Avg": 1, "Avgs": [1], "Avgs": [2]}}"#),
            Err(TableError::DuplicateField { ref field, .. }) if field == "Avgs"
        );
    }

    #[test]
    fn keeps_reporter_samples_and_ignores_other_fields() {
        let t = table(r#"{30: {"Max": 7, "Avg": 4.5, "Avgs": [4, 5, 4.5], "Note": "x"}}"#).unwrap();
        let entry = t.get(&DifficultyKey::Number(30)).unwrap();
        assert_eq!(entry.samples, vec![4.0, 5.0, 4.5]);
        assert_eq!(entry.sample_range(), Some((4.0, 5.0)));
        assert_eq!(entry.value(SeriesKind::Max), 7.0);
        assert_eq!(entry.value(SeriesKind::Avg), 4.5);
    }

    #[test]
    fn sample_range_edge_cases() {
        assert_eq!(StatsEntry::new(1.0, 1.0).sample_range(), None);
        let mut entry = StatsEntry::new(1.0, 1.0);
        entry.samples = vec![2.0];
        assert_eq!(entry.sample_range(), Some((2.0, 2.0)));
    }

    #[test]
    fn series_kind_names_match_fields() {
        assert_eq!(SeriesKind::Max.to_string(), "Max");
        assert_eq!(SeriesKind::Avg.to_string(), "Avg");
    }
}

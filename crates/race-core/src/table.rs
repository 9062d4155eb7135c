// File: crates/race-core/src/table.rs
// Summary: CSV → Table loader. First column names the entity, every other column is a period.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{RaceError, Result};

/// Header spellings that are renamed to the canonical entity column name.
const ENTITY_ALIASES: &[(&str, &str)] = &[("Country Name", "Country")];

#[derive(Clone, Debug)]
pub struct TableOptions {
    /// Expected (normalized) name of the first column.
    pub entity_column: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { entity_column: "Country".to_string() }
    }
}

/// In-memory CSV. Immutable after load.
/// Contract: every row holds exactly `periods.len()` finite-or-parsed values.
#[derive(Clone, Debug)]
pub struct Table {
    entity_column: String,
    entities: Vec<String>,
    periods: Vec<String>,
    // row-major: values[row][period]
    values: Vec<Vec<f64>>,
}

impl Table {
    pub fn from_path(path: impl AsRef<Path>, opts: &TableOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file, opts)?;
        info!(
            path = %path.display(),
            entities = table.len(),
            periods = table.periods.len(),
            "loaded table"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, opts: &TableOptions) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
        let first = headers.first().map(String::as_str).unwrap_or_default();
        let entity_column = normalize_entity_header(first);
        debug!(raw = first, normalized = %entity_column, "entity header");
        if entity_column != opts.entity_column {
            return Err(RaceError::MissingColumn {
                expected: opts.entity_column.clone(),
                found: first.to_string(),
            });
        }

        let periods = headers[1..].to_vec();
        if periods.is_empty() {
            return Err(RaceError::NoPeriods);
        }
        for (i, p) in periods.iter().enumerate() {
            if periods[..i].contains(p) {
                return Err(RaceError::DuplicatePeriod(p.clone()));
            }
        }

        let mut entities = Vec::new();
        let mut values = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let entity = rec.get(0).unwrap_or_default().trim().to_string();
            let row = periods
                .iter()
                .enumerate()
                .map(|(i, period)| {
                    let raw = rec.get(i + 1).unwrap_or_default().trim();
                    raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| RaceError::InvalidValue {
                        entity: entity.clone(),
                        period: period.clone(),
                        raw: raw.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            entities.push(entity);
            values.push(row);
        }
        if entities.is_empty() {
            return Err(RaceError::Empty);
        }

        Ok(Self { entity_column, entities, periods, values })
    }

    /// Normalized name of the entity column (e.g. "Country").
    pub fn entity_column(&self) -> &str { &self.entity_column }

    pub fn entities(&self) -> &[String] { &self.entities }

    /// Period labels in column (= frame) order.
    pub fn periods(&self) -> &[String] { &self.periods }

    /// Number of entity rows.
    pub fn len(&self) -> usize { self.entities.len() }

    pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    pub fn period_index(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }

    pub fn value(&self, row: usize, period: usize) -> Option<f64> {
        self.values.get(row)?.get(period).copied()
    }

    /// All values of one period column, in row order.
    pub fn column(&self, period: usize) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(move |row| row.get(period).copied())
    }
}

fn normalize_entity_header(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    ENTITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<Table> {
        Table::from_reader(csv.as_bytes(), &TableOptions::default())
    }

    #[test]
    fn renames_country_name_header() {
        let t = load("Country Name,2000\nA,1\n").unwrap();
        assert_eq!(t.entity_column(), "Country");
    }

    #[test]
    fn parses_scientific_values_in_column_order() {
        let t = load("Country,2001,2000\nA,100e9,3.5\nB,2,4\n").unwrap();
        assert_eq!(t.periods(), &["2001".to_string(), "2000".to_string()]);
        assert_eq!(t.value(0, 0), Some(100e9));
        assert_eq!(t.value(1, 1), Some(4.0));
        assert_eq!(t.period_index("2000"), Some(1));
        assert_eq!(t.column(0).collect::<Vec<_>>(), vec![100e9, 2.0]);
    }

    #[test]
    fn rejects_unexpected_entity_column() {
        let err = load("Region,2000\nA,1\n").unwrap_err();
        assert!(matches!(err, RaceError::MissingColumn { ref found, .. } if found == "Region"));
    }

    #[test]
    fn custom_entity_column() {
        let opts = TableOptions { entity_column: "Region".into() };
        let t = Table::from_reader("Region,2000\nA,1\n".as_bytes(), &opts).unwrap();
        assert_eq!(t.entities(), &["A".to_string()]);
    }

    #[test]
    fn rejects_blank_and_text_cells() {
        assert!(matches!(load("Country,2000\nA,\n"), Err(RaceError::InvalidValue { .. })));
        let err = load("Country,2000\nA,lots\n").unwrap_err();
        assert!(matches!(err, RaceError::InvalidValue { ref raw, .. } if raw == "lots"));
    }

    #[test]
    fn rejects_structural_problems() {
        assert!(matches!(load("Country\nA\n"), Err(RaceError::NoPeriods)));
        assert!(matches!(load("Country,2000\n"), Err(RaceError::Empty)));
        assert!(matches!(load("Country,2000,2000\nA,1,2\n"), Err(RaceError::DuplicatePeriod(p)) if p == "2000"));
        assert!(matches!(load("Country,2000,2001\nA,1\n"), Err(RaceError::Csv(_))));
    }
}

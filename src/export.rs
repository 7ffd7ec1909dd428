//! CSV export of job offers.
//!
//! Offers are fetched with a fixed filter set and written as three `|`-separated tables
//! linked by offer id (skills) or by company identity (companies):
//!
//! - `offres_emploi.csv`: one row per offer, nested objects flattened into dotted columns
//! - `entreprises.csv`: one row per distinct company
//! - `competences.csv`: one row per (offer, skill) pair

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::francetravail::{OffersClient, SearchFilters};

pub const OFFERS_FILE: &str = "offres_emploi.csv";
pub const COMPANIES_FILE: &str = "entreprises.csv";
pub const SKILLS_FILE: &str = "competences.csv";

/// Field separator of every exported file.
pub const DELIMITER: u8 = b'|';

/// Column linking a skill row back to its offer.
pub const SKILL_OFFER_COLUMN: &str = "offre_id";

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The search returned nothing; no file was written.
    NoResults,
    /// All three tables were written to `directory`.
    Written {
        directory: PathBuf,
        offers: usize,
        companies: usize,
        skills: usize,
    },
}

/// Filters used by the export: permanent contracts (`CDI`) in Ardèche (`07`).
pub fn default_export_filters() -> SearchFilters {
    SearchFilters {
        departement: Some("07".to_string()),
        type_contrat: Some("CDI".to_string()),
        ..SearchFilters::default()
    }
}

/// A flat table with ordered columns. `None` cells are nulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Builds a table from flattened records, columns in first-seen order.
    fn from_records(records: &[Vec<(String, Value)>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for (name, _) in record {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        record
                            .iter()
                            .find(|(name, _)| name == column)
                            .and_then(|(_, value)| render_cell(value))
                    })
                    .collect()
            })
            .collect();

        Table { columns, rows }
    }

    /// Removes rows whose cells are all null.
    fn drop_empty_rows(mut self) -> Self {
        self.rows.retain(|row| row.iter().any(Option::is_some));
        self
    }

    /// Removes exact duplicate rows, keeping the first occurrence.
    fn dedup_rows(mut self) -> Self {
        let mut seen = HashSet::new();
        self.rows.retain(|row| seen.insert(row.clone()));
        self
    }

    /// Index of `name` among the columns.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Writes the table with a header row to `path`.
    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        if self.columns.is_empty() {
            fs::File::create(path)?;
            debug!("No columns for {}, wrote an empty file", path.display());
            return Ok(());
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(path)?;

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;

        debug!("Wrote {} row(s) to {}", self.rows.len(), path.display());
        Ok(())
    }
}

/// Renders a leaf value as a CSV cell. Lists and leftover objects become JSON text.
fn render_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn flatten_into(prefix: &str, object: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in object {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(&name, inner, out),
            Value::Object(_) => out.push((name, Value::Null)),
            other => out.push((name, other.clone())),
        }
    }
}

/// Flattens a JSON object into `(column, leaf)` pairs.
///
/// Nested objects become dotted columns (`lieuTravail.libelle`); lists are kept whole.
/// A non-object value yields no columns.
pub fn flatten_record(record: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(object) = record {
        flatten_into("", object, &mut out);
    }
    out
}

/// One row per offer with every top-level field.
pub fn offers_table(offers: &[Value]) -> Table {
    let records: Vec<_> = offers.iter().map(flatten_record).collect();
    Table::from_records(&records)
}

/// One row per distinct embedded `entreprise` object.
pub fn companies_table(offers: &[Value]) -> Table {
    let records: Vec<_> = offers
        .iter()
        .map(|offer| offer.get("entreprise").map(flatten_record).unwrap_or_default())
        .collect();
    Table::from_records(&records).drop_empty_rows().dedup_rows()
}

/// One row per (offer, skill) pair, expanded from each offer's `competences` list.
pub fn skills_table(offers: &[Value]) -> Table {
    let mut records = Vec::new();

    for offer in offers {
        let offer_id = offer.get("id").cloned().unwrap_or(Value::Null);
        let Some(skills) = offer.get("competences").and_then(Value::as_array) else {
            continue;
        };

        for skill in skills {
            let fields = flatten_record(skill);
            if fields.iter().all(|(_, value)| value.is_null()) {
                continue;
            }

            let mut record = Vec::with_capacity(fields.len() + 1);
            record.push((SKILL_OFFER_COLUMN.to_string(), offer_id.clone()));
            record.extend(fields);
            records.push(record);
        }
    }

    Table::from_records(&records).drop_empty_rows().dedup_rows()
}

/// Writes the three tables for `offers` into `directory`, creating it if needed.
///
/// # Returns
///
/// - `Ok(ExportOutcome::NoResults)`: If `offers` is empty; nothing is written
/// - `Ok(ExportOutcome::Written { .. })`: The row count of each table
/// - `Err(ExportError)`: If the directory or a file cannot be written
pub fn save_offers_to_csv(offers: &[Value], directory: &Path) -> Result<ExportOutcome, ExportError> {
    if offers.is_empty() {
        info!("No offers to export");
        return Ok(ExportOutcome::NoResults);
    }

    fs::create_dir_all(directory)?;

    let offer_rows = offers_table(offers);
    let companies = companies_table(offers);
    let skills = skills_table(offers);

    offer_rows.write_csv(&directory.join(OFFERS_FILE))?;
    companies.write_csv(&directory.join(COMPANIES_FILE))?;
    skills.write_csv(&directory.join(SKILLS_FILE))?;

    info!(
        "Exported {} offer(s), {} company row(s), {} skill row(s) to {}",
        offer_rows.rows.len(),
        companies.rows.len(),
        skills.rows.len(),
        directory.display()
    );

    Ok(ExportOutcome::Written {
        directory: directory.to_path_buf(),
        offers: offer_rows.rows.len(),
        companies: companies.rows.len(),
        skills: skills.rows.len(),
    })
}

/// Extracts the offer list from a search body, wrapped in `{"data", "pagination"}` or not.
pub fn extract_offers(body: &Value) -> Result<Vec<Value>, ExportError> {
    let content = match body.get("pagination") {
        Some(_) => body.get("data").unwrap_or(body),
        None => body,
    };

    match content.get("resultats") {
        Some(Value::Array(offers)) => Ok(offers.clone()),
        Some(Value::Null) | None if content.is_object() => {
            warn!("Search payload has no 'resultats' list");
            Ok(Vec::new())
        }
        _ => Err(ExportError::Payload(
            "expected an object with a 'resultats' list".to_string(),
        )),
    }
}

/// Runs a search with `filters` and returns the offers.
///
/// Any non-success status is an error. A 204 yields an empty list.
pub async fn fetch_offers(
    client: &OffersClient,
    filters: &SearchFilters,
) -> Result<Vec<Value>, ExportError> {
    let response = client.search_offers(filters).await?;
    if response.status == 204 {
        return Ok(Vec::new());
    }
    extract_offers(&response.body)
}

/// Fetches offers with `filters` and writes them under `directory`.
pub async fn export_offers(
    client: &OffersClient,
    filters: &SearchFilters,
    directory: &Path,
) -> Result<ExportOutcome, ExportError> {
    let offers = fetch_offers(client, filters).await?;
    info!("Fetched {} offer(s) for export", offers.len());
    save_offers_to_csv(&offers, directory)
}

//! Catalog loading from a directory of CSV files.
//!
//! # Directory Structure
//!
//! ```text
//! catalog/
//! ├── concepts.csv    # uuid,id,name,mappings  (mappings: "CIEL:5089;SNOMED CT:27113001")
//! ├── drugs.csv       # uuid,id,name
//! ├── locations.csv   # uuid,id,name
//! ├── persons.csv     # uuid,id,name
//! └── programs.csv    # uuid,id,name
//! ```
//!
//! Every file is optional; a missing file leaves that kind empty.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use formshare_model::ReferenceKind;
use tracing::{debug, warn};

use crate::catalog::{CatalogEntry, MetadataCatalog};
use crate::error::{CatalogError, Result};

type Row = BTreeMap<String, String>;

/// CSV file name for a reference kind.
pub fn file_name(kind: ReferenceKind) -> String {
    format!("{}s.csv", kind.as_str())
}

/// Load a catalog from `dir`.
pub fn load_catalog(dir: &Path) -> Result<MetadataCatalog> {
    if !dir.is_dir() {
        return Err(CatalogError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut catalog = MetadataCatalog::new();
    for kind in ReferenceKind::ALL {
        let path = dir.join(file_name(kind));
        if !path.is_file() {
            debug!(kind = %kind, path = %path.display(), "catalog file not present");
            continue;
        }
        load_kind(&mut catalog, kind, &path)?;
        debug!(kind = %kind, count = catalog.len(kind), "catalog kind loaded");
    }
    Ok(catalog)
}

fn load_kind(catalog: &mut MetadataCatalog, kind: ReferenceKind, path: &Path) -> Result<()> {
    let (headers, rows) = read_csv_rows(path)?;
    require_column(&headers, "uuid", path)?;
    require_column(&headers, "name", path)?;

    for row in rows {
        let uuid = get_field(&row, "uuid");
        if uuid.is_empty() {
            warn!(kind = %kind, path = %path.display(), "skipping catalog row without uuid");
            continue;
        }
        let id = parse_id(&row, path)?;
        let name = get_field(&row, "name");

        if kind == ReferenceKind::Concept {
            for (source, code) in parse_mappings(&get_field(&row, "mappings")) {
                catalog.add_concept_mapping(uuid.clone(), &source, &code);
            }
        }
        catalog.add(kind, CatalogEntry::new(uuid, id, name));
    }
    Ok(())
}

/// Read a CSV file into its normalized headers and row maps keyed by them.
fn read_csv_rows(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::csv(path, e))?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::csv(path, e))?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }
    Ok((headers, rows))
}

fn require_column(headers: &[String], column: &'static str, path: &Path) -> Result<()> {
    if headers.iter().any(|header| header == column) {
        Ok(())
    } else {
        Err(CatalogError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })
    }
}

fn get_field(row: &Row, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

fn parse_id(row: &Row, path: &Path) -> Result<Option<i64>> {
    let raw = get_field(row, "id");
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| CatalogError::InvalidValue {
            field: "id",
            value: raw,
            path: path.to_path_buf(),
        })
}

/// Parse `SOURCE:CODE;SOURCE:CODE`. Entries without a colon are skipped.
fn parse_mappings(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let (source, code) = pair.split_once(':')?;
            let (source, code) = (source.trim(), code.trim());
            if source.is_empty() || code.is_empty() {
                return None;
            }
            Some((source.to_string(), code.to_string()))
        })
        .collect()
}

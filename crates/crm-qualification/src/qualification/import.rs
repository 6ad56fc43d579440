//! CSV lead exports, one lead per row with field names in the header.

use std::io::Read;

use super::domain::{FieldValue, LeadRecord};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to parse lead export: {0}")]
    Csv(#[from] csv::Error),
    #[error("lead export has no header row")]
    MissingHeader,
}

/// Parse a lead export. Blank cells are left out of the record.
pub fn read_leads<R: Read>(reader: R) -> Result<Vec<LeadRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(ImportError::MissingHeader);
    }

    let mut leads = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let record = headers
            .iter()
            .zip(row.iter())
            .filter(|(name, cell)| !name.is_empty() && !cell.is_empty())
            .map(|(name, cell)| (name, cell_value(cell)))
            .collect::<LeadRecord>();
        leads.push(record);
    }

    Ok(leads)
}

fn cell_value(cell: &str) -> FieldValue {
    if let Ok(value) = cell.parse::<i64>() {
        return FieldValue::Integer(value);
    }
    if let Ok(value) = cell.parse::<f64>() {
        if value.is_finite() {
            return FieldValue::Number(value);
        }
    }
    match cell {
        "true" | "TRUE" | "True" => FieldValue::Bool(true),
        "false" | "FALSE" | "False" => FieldValue::Bool(false),
        _ => FieldValue::text(cell),
    }
}

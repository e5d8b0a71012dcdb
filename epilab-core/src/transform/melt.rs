//! Wide-to-long reshape.
//!
//! Every non-id column of a wide snapshot is a date column. An unparsable
//! date header is a hard failure for the whole resource; blank or unparsable
//! value cells are treated as missing and skipped.

use crate::data::RawTable;
use crate::domain::CountryDay;
use chrono::NaiveDate;
use thiserror::Error;

/// Wide snapshot id columns, in upstream order.
pub const WIDE_ID_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// Column holding the country name.
pub const COUNTRY_COLUMN: &str = "Country/Region";

/// Date format of wide snapshot headers, e.g. `1/22/20`.
pub const WIDE_DATE_FORMAT: &str = "%m/%d/%y";

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("missing id column '{column}'")]
    MissingIdColumn { column: String },

    #[error("unparsable date header '{column}'")]
    BadDateHeader { column: String },
}

/// Melt a wide table into long-format observations.
///
/// Output row count is input rows × date columns, minus cells with no value.
pub fn melt_wide(
    table: &RawTable,
    id_columns: &[&str],
    country_column: &str,
) -> Result<Vec<CountryDay>, TransformError> {
    let country_idx = table
        .headers
        .iter()
        .position(|h| h == country_column)
        .ok_or_else(|| TransformError::MissingIdColumn {
            column: country_column.to_string(),
        })?;

    // Every non-id header must parse as a date.
    let mut date_columns: Vec<(usize, NaiveDate)> = Vec::new();
    for (idx, header) in table.headers.iter().enumerate() {
        if id_columns.contains(&header.as_str()) {
            continue;
        }
        let date = NaiveDate::parse_from_str(header, WIDE_DATE_FORMAT).map_err(|_| {
            TransformError::BadDateHeader {
                column: header.clone(),
            }
        })?;
        date_columns.push((idx, date));
    }

    let mut out = Vec::with_capacity(table.records.len() * date_columns.len());
    for record in &table.records {
        let Some(country) = record.get(country_idx) else {
            continue;
        };
        for &(idx, date) in &date_columns {
            let Some(cell) = record.get(idx) else {
                continue;
            };
            let Ok(value) = cell.trim().parse::<f64>() else {
                continue;
            };
            out.push(CountryDay {
                country: country.clone(),
                date,
                value,
            });
        }
    }

    Ok(out)
}

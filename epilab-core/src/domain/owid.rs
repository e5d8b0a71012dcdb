//! Typed rows of the comprehensive long-format dataset.
//!
//! Only the column subset the charts consume is kept. Every numeric column is
//! optional: upstream leaves cells blank for early dates and small locations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric columns eligible for the correlation matrix: everything case-,
/// death-, or vaccination-related. Population is deliberately excluded.
pub const CORRELATION_COLUMNS: &[&str] = &[
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
    "total_cases_per_million",
    "new_cases_per_million",
    "total_deaths_per_million",
    "new_deaths_per_million",
    "total_vaccinations",
    "people_vaccinated",
    "people_fully_vaccinated",
];

/// One location/date row of the comprehensive dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwidRow {
    pub location: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub total_cases: Option<f64>,
    #[serde(default)]
    pub new_cases: Option<f64>,
    #[serde(default)]
    pub total_deaths: Option<f64>,
    #[serde(default)]
    pub new_deaths: Option<f64>,
    #[serde(default)]
    pub total_cases_per_million: Option<f64>,
    #[serde(default)]
    pub new_cases_per_million: Option<f64>,
    #[serde(default)]
    pub total_deaths_per_million: Option<f64>,
    #[serde(default)]
    pub new_deaths_per_million: Option<f64>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub total_vaccinations: Option<f64>,
    #[serde(default)]
    pub people_vaccinated: Option<f64>,
    #[serde(default)]
    pub people_fully_vaccinated: Option<f64>,
}

impl OwidRow {
    /// Look up a numeric column by name. Unknown names are None.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "total_cases" => self.total_cases,
            "new_cases" => self.new_cases,
            "total_deaths" => self.total_deaths,
            "new_deaths" => self.new_deaths,
            "total_cases_per_million" => self.total_cases_per_million,
            "new_cases_per_million" => self.new_cases_per_million,
            "total_deaths_per_million" => self.total_deaths_per_million,
            "new_deaths_per_million" => self.new_deaths_per_million,
            "total_vaccinations" => self.total_vaccinations,
            "people_vaccinated" => self.people_vaccinated,
            "people_fully_vaccinated" => self.people_fully_vaccinated,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_covers_every_correlation_column() {
        let row = OwidRow {
            location: "Aland".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            total_cases: Some(1.0),
            new_cases: Some(2.0),
            total_deaths: Some(3.0),
            new_deaths: Some(4.0),
            total_cases_per_million: Some(5.0),
            new_cases_per_million: Some(6.0),
            total_deaths_per_million: Some(7.0),
            new_deaths_per_million: Some(8.0),
            population: Some(9.0),
            total_vaccinations: Some(10.0),
            people_vaccinated: Some(11.0),
            people_fully_vaccinated: Some(12.0),
        };

        for column in CORRELATION_COLUMNS {
            assert!(
                row.numeric(column).is_some(),
                "column '{column}' has no accessor"
            );
        }
        // Population is numeric but not correlation-eligible.
        assert!(!CORRELATION_COLUMNS.contains(&"population"));
        assert!(row.numeric("no_such_column").is_none());
    }
}

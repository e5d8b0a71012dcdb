//! Pearson correlation over the long-format dataset's numeric columns.

use crate::domain::{OwidRow, CORRELATION_COLUMNS};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Labeled symmetric correlation matrix.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// Correlation matrix over the case/death/vaccination columns.
///
/// Columns with fewer than two observations are dropped; returns None when
/// fewer than two columns remain. Each pair correlates over its
/// pairwise-complete observations.
pub fn correlation_matrix(rows: &[OwidRow]) -> Option<CorrelationMatrix> {
    let labels: Vec<&'static str> = CORRELATION_COLUMNS
        .iter()
        .copied()
        .filter(|column| {
            rows.iter()
                .filter(|r| r.numeric(column).is_some())
                .take(2)
                .count()
                == 2
        })
        .collect();

    if labels.len() < 2 {
        return None;
    }

    let n = labels.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let r = pearson(rows, labels[i], labels[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix { labels, values })
}

/// Pearson r over rows where both columns are present. NaN when degenerate.
fn pearson(rows: &[OwidRow], a: &str, b: &str) -> f64 {
    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|r| Some((r.numeric(a)?, r.numeric(b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Locations ranked by their maximum reported population, largest first.
pub fn top_by_population(rows: &[OwidRow], n: usize) -> Vec<String> {
    let mut max_pop: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        let Some(pop) = row.population else {
            continue;
        };
        max_pop
            .entry(row.location.as_str())
            .and_modify(|e| *e = e.max(pop))
            .or_insert(pop);
    }

    let mut ranked: Vec<(&str, f64)> = max_pop.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked.into_iter().map(|(location, _)| location.to_string()).collect()
}

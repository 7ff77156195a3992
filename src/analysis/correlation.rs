//! Pairwise Pearson correlation over numeric columns.

use tracing::debug;

use crate::types::{Column, CorrelationPair, Row};
use crate::utils::round3;

/// Minimum number of pairwise-complete observations for a pair to be scored.
const MIN_OBSERVATIONS: usize = 2;

/// Pearson correlation for every numeric column pair.
///
/// Pairs are formed in original column order (`i < j`) and scored over the
/// rows where both cells parse as numbers. Pairs with fewer than two such
/// observations are skipped. Results are rounded to three decimal places
/// and sorted by descending absolute coefficient; ties keep pair order.
pub fn correlations(rows: &[Row], columns: &[Column]) -> Vec<CorrelationPair> {
    let numeric: Vec<&Column> = columns.iter().filter(|c| c.ty.is_numeric()).collect();

    let mut pairs = Vec::new();
    for i in 0..numeric.len() {
        for j in (i + 1)..numeric.len() {
            let (a, b) = (numeric[i], numeric[j]);
            let observations: Vec<(f64, f64)> = rows
                .iter()
                .filter_map(|row| {
                    let x = row.cell(&a.name).as_number()?;
                    let y = row.cell(&b.name).as_number()?;
                    Some((x, y))
                })
                .collect();

            if observations.len() < MIN_OBSERVATIONS {
                continue;
            }

            pairs.push(CorrelationPair {
                col1: a.name.clone(),
                col2: b.name.clone(),
                correlation: round3(pearson(&observations)),
            });
        }
    }

    // Stable sort keeps original pair order among equal magnitudes.
    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(pairs = pairs.len(), "correlations computed");
    pairs
}

/// Sum-based Pearson coefficient. A zero or non-finite denominator (a
/// constant column) yields 0.
fn pearson(observations: &[(f64, f64)]) -> f64 {
    let n = observations.len() as f64;
    let sum_x: f64 = observations.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = observations.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = observations.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = observations.iter().map(|(x, _)| x * x).sum();
    let sum_y2: f64 = observations.iter().map(|(_, y)| y * y).sum();

    let num = n * sum_xy - sum_x * sum_y;
    let den = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if den == 0.0 || !den.is_finite() {
        return 0.0;
    }
    num / den
}

//! Per-column distinct/mode/suppression/generalisation statistics.

use std::collections::BTreeMap;

use crate::error::{AnonAuditError, Result};
use crate::grouper::{distinct_count, value_counts};
use crate::model::{Cell, Table};
use crate::numeric::{format_float, round_to};

/// `(count, "P %")`, the shape used for `Suppressed`, `TotalGensup` and
/// `TotalSup`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountAndPercent {
    pub count: u64,
    pub percent: String,
}

/// Per-column summary statistics for one dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnStats {
    pub distinct: BTreeMap<String, u64>,
    pub modes: BTreeMap<String, (String, u64)>,
    pub informative: BTreeMap<String, u64>,
    pub suppressed: BTreeMap<String, CountAndPercent>,
    pub gensup_per_col: BTreeMap<String, u64>,
    pub total_gensup: CountAndPercent,
    pub total_sup: CountAndPercent,
    pub sup_of_changed: String,
}

/// Computes `ColumnStats` for the input dataset: every cell is considered
/// informative (no suppression is assumed in the original).
///
/// # Errors
/// Returns `AnonAuditError::ModeNotDetected` if a column has zero rows.
pub fn compute_input(table: &Table, blind: &str) -> Result<ColumnStats> {
    let mut stats = ColumnStats::default();
    let rows = table.row_count() as u64;
    for column in table.columns() {
        stats.distinct.insert(column.name.clone(), distinct_count(table, &column.name));
        stats.modes.insert(column.name.clone(), mode_excluding_blind(table, &column.name, blind)?);
        stats.informative.insert(column.name.clone(), rows);
    }
    Ok(stats)
}

/// Computes `ColumnStats` for the output dataset. `input` is consulted for
/// the generalisation/suppression tallies when present.
///
/// # Errors
/// Returns `AnonAuditError::ModeNotDetected` if a column has zero rows.
pub fn compute_output(table: &Table, input: Option<&Table>, blind: &str) -> Result<ColumnStats> {
    let mut stats = ColumnStats::default();
    let rows = table.row_count() as u64;

    for column in table.columns() {
        stats.distinct.insert(column.name.clone(), distinct_count(table, &column.name));
        stats.modes.insert(column.name.clone(), mode_excluding_blind(table, &column.name, blind)?);

        let suppressed_count = column.cells.iter().filter(|c| c.is_blind(blind)).count() as u64;
        let percent = format!(
            "{} %",
            format_float(round_to(100.0 * suppressed_count as f64 / rows as f64, 1))
        );
        stats.suppressed.insert(
            column.name.clone(),
            CountAndPercent { count: suppressed_count, percent },
        );
        stats.informative.insert(column.name.clone(), rows - suppressed_count);
    }

    let total_cells = (table.row_count() as u64).saturating_mul(table.column_count() as u64);

    if let Some(input) = input {
        let mut total_gensup = 0u64;
        for column in table.columns() {
            let Some(input_column) = input.column(&column.name) else {
                continue;
            };
            let seen: std::collections::HashSet<String> =
                input_column.cells.iter().map(Cell::render).collect();
            let changed = column
                .cells
                .iter()
                .filter(|c| !seen.contains(&c.render()))
                .count() as u64;
            stats.gensup_per_col.insert(column.name.clone(), changed);
            total_gensup += changed;
        }
        let total_sup: u64 = stats.suppressed.values().map(|cp| cp.count).sum();

        stats.total_gensup = CountAndPercent {
            count: total_gensup,
            percent: format!(
                "{} %",
                format_float(round_to(100.0 * total_gensup as f64 / total_cells as f64, 3))
            ),
        };
        stats.total_sup = CountAndPercent {
            count: total_sup,
            percent: format!(
                "{} %",
                format_float(round_to(100.0 * total_sup as f64 / total_cells as f64, 3))
            ),
        };
        stats.sup_of_changed = if total_gensup == 0 {
            "0 %".to_string()
        } else {
            format!(
                "{} %",
                format_float(round_to(100.0 * total_sup as f64 / total_gensup as f64, 3))
            )
        };
    } else {
        stats.total_gensup = CountAndPercent { count: 0, percent: "0 %".to_string() };
        stats.total_sup = CountAndPercent { count: 0, percent: "0 %".to_string() };
        stats.sup_of_changed = "0 %".to_string();
    }

    Ok(stats)
}

/// Mode of a column, excluding the blind token unless it is the only value
/// present. Ties among the top value counts are broken by first appearance.
fn mode_excluding_blind(table: &Table, column_name: &str, blind: &str) -> Result<(String, u64)> {
    let counts = value_counts(table, column_name);
    let Some((top_value, top_count)) = counts.first() else {
        return Err(AnonAuditError::mode_not_detected(column_name));
    };
    if top_value.is_blind(blind) && counts.len() > 1 {
        let (second_value, second_count) = &counts[1];
        Ok((second_value.to_string(), *second_count))
    } else {
        Ok((top_value.to_string(), *top_count))
    }
}

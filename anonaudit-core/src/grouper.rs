//! The shared grouping primitive used by every stats component.

use std::collections::HashMap;

use crate::model::{Cell, Table};

/// Groups a table's rows by their values in the given QI columns.
///
/// Returns `(key tuple, size)` pairs in first-seen order — callers that need
/// a specific order (ascending for smallest-first enumeration, descending
/// elsewhere) sort the result themselves. This is what makes mode
/// tie-breaking and class enumeration order deterministic.
#[must_use]
pub fn group_by_qi(table: &Table, qi_columns: &[String]) -> Vec<(Vec<Cell>, u64)> {
    let mut order: Vec<Vec<Cell>> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut keys_by_render: HashMap<String, Vec<Cell>> = HashMap::new();

    for row in 0..table.row_count() {
        let key = table.row_view(row, qi_columns);
        let render_key = render_key(&key);
        if let Some(count) = counts.get_mut(&render_key) {
            *count += 1;
        } else {
            counts.insert(render_key.clone(), 1);
            keys_by_render.insert(render_key.clone(), key.clone());
            order.push(key);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let render_key = render_key(&key);
            let count = counts[&render_key];
            (key, count)
        })
        .collect()
}

fn render_key(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(Cell::render)
        .collect::<Vec<_>>()
        .join("\u{1}")
}

/// Returns the row indices of `table` for which `predicate` holds.
#[must_use]
pub fn filter_rows(table: &Table, predicate: impl Fn(&[Cell]) -> bool, columns: &[String]) -> Vec<usize> {
    (0..table.row_count())
        .filter(|&row| predicate(&table.row_view(row, columns)))
        .collect()
}

/// Restricts a table to the rows for which `predicate` holds over `columns`.
#[must_use]
pub fn filter(table: &Table, predicate: impl Fn(&[Cell]) -> bool, columns: &[String]) -> Table {
    let rows = filter_rows(table, predicate, columns);
    table.select_rows(&rows)
}

/// Number of distinct values in `column_name`, ignoring nothing (blind is an
/// ordinary string value here).
#[must_use]
pub fn distinct_count(table: &Table, column_name: &str) -> u64 {
    let Some(column) = table.column(column_name) else {
        return 0;
    };
    let mut seen = std::collections::HashSet::new();
    for cell in &column.cells {
        seen.insert(Cell::render(cell));
    }
    seen.len() as u64
}

/// `(value, count)` pairs for a column, sorted by count descending, ties
/// broken by first appearance.
#[must_use]
pub fn value_counts(table: &Table, column_name: &str) -> Vec<(Cell, u64)> {
    let Some(column) = table.column(column_name) else {
        return Vec::new();
    };
    let mut order: Vec<Cell> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for cell in &column.cells {
        let key = cell.render();
        if let Some(count) = counts.get_mut(&key) {
            *count += 1;
        } else {
            counts.insert(key, 1);
            order.push(cell.clone());
        }
    }
    let mut result: Vec<(Cell, u64)> = order
        .into_iter()
        .map(|cell| {
            let key = cell.render();
            let count = counts[&key];
            (cell, count)
        })
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    // sort_by is stable, so first-appearance order among ties is preserved.
    result
}

//! The typed in-memory table that the metrics engine operates over.
//!
//! Cells are dynamically typed at the source (CSV has no schema), so the
//! table carries a tagged value per cell rather than a fixed Rust type per
//! column.

use std::fmt;

/// A single table cell. Dynamically typed because CSV sources carry no
/// column schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Real(f64),
    Str(String),
    Null,
}

impl Cell {
    /// True if this cell equals the given blind token (string comparison only;
    /// `Null` never equals the blind token).
    #[must_use]
    pub fn is_blind(&self, blind: &str) -> bool {
        matches!(self, Cell::Str(s) if s == blind)
    }

    /// Renders the cell the way `QidSpec::render_conjunction` needs it:
    /// strings single-quoted, numerics bare, null as the literal `NULL`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Cell::Int(i) => i.to_string(),
            Cell::Real(r) => r.to_string(),
            Cell::Str(s) => format!("'{s}'"),
            Cell::Null => "NULL".to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Real(r) => write!(f, "{r}"),
            Cell::Str(s) => write!(f, "{s}"),
            Cell::Null => write!(f, ""),
        }
    }
}

/// A single named column: a finite sequence of cells, one per row.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// A named, ordered sequence of columns. Column names are unique; every
/// column has the same length (the row count).
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Builds a table from columns, all of which must share the same length.
    ///
    /// # Panics
    /// Panics if columns have differing lengths or duplicate names — this is
    /// a construction-time invariant violated only by a buggy ingestion
    /// adapter, not by untrusted input.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map_or(0, |c| c.cells.len());
        for column in &columns {
            assert_eq!(
                column.cells.len(),
                row_count,
                "column '{}' has {} cells, expected {}",
                column.name,
                column.cells.len(),
                row_count
            );
        }
        let mut seen = std::collections::HashSet::new();
        for column in &columns {
            assert!(seen.insert(column.name.as_str()), "duplicate column name '{}'", column.name);
        }
        Self { columns, row_count }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the cell at `(row, column_name)`, if both exist.
    #[must_use]
    pub fn cell(&self, row: usize, column_name: &str) -> Option<&Cell> {
        self.column(column_name).and_then(|c| c.cells.get(row))
    }

    /// A view over a single row across the named columns, in the given order.
    /// Missing columns yield `Cell::Null`.
    #[must_use]
    pub fn row_view(&self, row: usize, column_names: &[String]) -> Vec<Cell> {
        column_names
            .iter()
            .map(|name| self.cell(row, name).cloned().unwrap_or(Cell::Null))
            .collect()
    }

    /// Builds a `Table` restricted to the given row indices, preserving all
    /// columns.
    #[must_use]
    pub fn select_rows(&self, rows: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    rows.iter().map(|&r| c.cells[r].clone()).collect(),
                )
            })
            .collect();
        Table::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_blind_matches_only_matching_string() {
        assert!(Cell::Str("*".to_string()).is_blind("*"));
        assert!(!Cell::Str("a".to_string()).is_blind("*"));
        assert!(!Cell::Int(1).is_blind("*"));
        assert!(!Cell::Null.is_blind("*"));
    }

    #[test]
    fn render_quotes_strings_not_numbers() {
        assert_eq!(Cell::Str("M".to_string()).render(), "'M'");
        assert_eq!(Cell::Int(56).render(), "56");
        assert_eq!(Cell::Real(1.5).render(), "1.5");
        assert_eq!(Cell::Null.render(), "NULL");
    }

    #[test]
    fn table_row_count_comes_from_first_column() {
        let t = Table::new(vec![Column::new(
            "a",
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)],
        )]);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn row_view_substitutes_null_for_missing_column() {
        let t = Table::new(vec![Column::new("a", vec![Cell::Int(1)])]);
        let view = t.row_view(0, &["a".to_string(), "missing".to_string()]);
        assert_eq!(view, vec![Cell::Int(1), Cell::Null]);
    }

    #[test]
    fn select_rows_builds_a_subset_table() {
        let t = Table::new(vec![Column::new(
            "a",
            vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)],
        )]);
        let subset = t.select_rows(&[0, 2]);
        assert_eq!(subset.row_count(), 2);
        assert_eq!(subset.cell(1, "a"), Some(&Cell::Int(3)));
    }

    #[test]
    #[should_panic(expected = "duplicate column name")]
    fn new_panics_on_duplicate_column_names() {
        Table::new(vec![
            Column::new("a", vec![Cell::Int(1)]),
            Column::new("a", vec![Cell::Int(2)]),
        ]);
    }
}

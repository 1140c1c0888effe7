//! Naive delimited-file ingestion with separator sniffing.
//!
//! Mirrors `original_source/inp/Simulator.py::getSepNaive`: try tab,
//! semicolon, comma against the first line, in that order, and use whichever
//! produces more than one field. No quoting/escaping support — the legacy
//! implementation has none either.

use crate::error::{AnonAuditError, Result};
use crate::model::{Cell, Column, Table};

const CANDIDATE_SEPARATORS: [char; 3] = ['\t', ';', ','];

/// Finds the separator that splits `first_line` into more than one field,
/// trying candidates in the fixed tab/semicolon/comma order.
///
/// # Errors
/// Returns `AnonAuditError::Ingestion` if no candidate splits the line.
pub fn sniff_separator(path: &str, first_line: &str) -> Result<char> {
    CANDIDATE_SEPARATORS
        .into_iter()
        .find(|sep| first_line.split(*sep).count() > 1)
        .ok_or_else(|| AnonAuditError::ingestion(path, "could not detect a column separator"))
}

/// Parses `contents` (a full file's text) into a `Table`, inferring each
/// column's cell type from its values: integers first, then reals, then
/// strings; an empty field is `Cell::Null`.
///
/// # Errors
/// Returns `AnonAuditError::Ingestion` if the file is empty or no separator
/// can be detected.
pub fn parse_table(path: &str, contents: &str) -> Result<Table> {
    let mut lines = contents.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| AnonAuditError::ingestion(path, "file has no header row"))?;
    let separator = sniff_separator(path, header_line.trim_end())?;

    let headers: Vec<String> = header_line.trim_end().split(separator).map(str::trim).map(str::to_string).collect();
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(separator).collect();
        for (i, column) in raw_columns.iter_mut().enumerate() {
            column.push(fields.get(i).copied().unwrap_or("").trim().to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, values)| Column::new(name, values.iter().map(|v| infer_cell(v)).collect()))
        .collect();

    Ok(Table::new(columns))
}

fn infer_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Cell::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Cell::Real(f);
    }
    Cell::Str(raw.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_tab_before_semicolon_and_comma() {
        assert_eq!(sniff_separator("f", "a\tb,c").unwrap(), '\t');
        assert_eq!(sniff_separator("f", "a;b,c").unwrap(), ';');
        assert_eq!(sniff_separator("f", "a,b,c").unwrap(), ',');
    }

    #[test]
    fn no_separator_found_is_an_ingestion_error() {
        let err = sniff_separator("f", "single_field").unwrap_err();
        assert!(err.to_string().contains('f'));
    }

    #[test]
    fn parse_table_infers_cell_types() {
        let t = parse_table("f", "id,gender,score\n1,M,5.5\n2,,6\n").unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.cell(0, "id"), Some(&Cell::Int(1)));
        assert_eq!(t.cell(0, "score"), Some(&Cell::Real(5.5)));
        assert_eq!(t.cell(1, "gender"), Some(&Cell::Null));
    }

    #[test]
    fn empty_file_is_an_ingestion_error() {
        let err = parse_table("f", "").unwrap_err();
        assert!(err.to_string().contains('f'));
    }
}

//! Aggregate equivalence-class statistics.

use crate::error::{AnonAuditError, Result};
use crate::grouper::group_by_qi;
use crate::model::Table;
use crate::numeric::round_to;
use crate::qidspec::QidSpec;

/// Equivalence-class statistics for a single dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EqClassStats {
    pub avg_sup: f64,
    pub avg_nosup: f64,
    pub suppressed: u64,
    pub smallest: u64,
    pub biggest: u64,
    pub no_classes: u64,
    pub no_records: u64,
}

/// Computes `EqClassStats` for `table`.
///
/// `treat_all_suppressed_as_absent` is true for the input dataset (which is
/// never considered suppressed, even if some rows coincidentally carry the
/// blind token in every QI column) and false for the output dataset.
///
/// # Errors
/// Returns `AnonAuditError::EmptyDataset` if `table` has zero rows.
pub fn compute(
    table: &Table,
    qidspec: &QidSpec,
    which: &str,
    treat_all_suppressed_as_absent: bool,
) -> Result<EqClassStats> {
    let rows = table.row_count();
    if rows == 0 {
        return Err(AnonAuditError::empty_dataset(which));
    }

    let groups = group_by_qi(table, &qidspec.quasi_identifying);
    let class_count = groups.len() as u64;

    let all_suppressed = groups.iter().find(|(key, _)| qidspec.is_all_blind(key));
    let (has_all_suppressed, all_suppressed_size) = if treat_all_suppressed_as_absent {
        (false, 0u64)
    } else {
        match all_suppressed {
            Some((_, size)) => (true, *size),
            None => (false, 0),
        }
    };

    let avg_sup = round_to(rows as f64 / class_count as f64, 3);

    let divisor: u64 = if has_all_suppressed && class_count > 1 {
        class_count - 1
    } else if class_count > 0 {
        class_count
    } else {
        1
    };
    let avg_nosup = round_to((rows as f64 - all_suppressed_size as f64) / divisor as f64, 3);

    let noblind_sizes: Vec<u64> = groups
        .iter()
        .filter(|(key, _)| qidspec.is_no_blind(key))
        .map(|(_, size)| *size)
        .collect();
    let smallest = noblind_sizes.iter().min().copied().unwrap_or(0);
    let biggest = noblind_sizes.iter().max().copied().unwrap_or(0);

    Ok(EqClassStats {
        avg_sup,
        avg_nosup,
        suppressed: all_suppressed_size,
        smallest,
        biggest,
        no_classes: class_count,
        no_records: rows as u64,
    })
}

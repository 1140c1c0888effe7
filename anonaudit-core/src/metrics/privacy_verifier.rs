//! k-anonymity / l-diversity / (X,Y)-anonymity violation detection.

use std::collections::BTreeMap;

use crate::grouper::{filter_rows, group_by_qi};
use crate::model::Table;
use crate::qidspec::QidSpec;

/// Record-level k-anonymity result.
#[derive(Debug, Clone, PartialEq)]
pub struct KResult {
    pub true_min_k: u64,
    pub violations: BTreeMap<String, u64>,
}

/// l-diversity result. Each violation maps a class's rendered key to the
/// sensitive columns that fell short, with their distinct-value counts.
#[derive(Debug, Clone, PartialEq)]
pub struct LResult {
    pub true_min_l: u64,
    pub violations: BTreeMap<String, BTreeMap<String, u64>>,
}

/// (X,Y)-anonymity (individual-level k-anonymity) result.
#[derive(Debug, Clone, PartialEq)]
pub struct XyResult {
    pub true_min_xy: u64,
    pub violations: BTreeMap<String, u64>,
}

/// The three verifier outputs, bundled the way the report embeds them.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivacyVerification {
    pub k: KResult,
    pub l: LResult,
    pub xy: XyResult,
}

/// Runs all three verifiers against the output dataset.
///
/// Returns `None` (and logs) when quasi-identifying columns are not
/// configured, or when `table` is absent — both cases the report renders as
/// an empty section.
#[must_use]
pub fn compute(
    table: Option<&Table>,
    qidspec: &QidSpec,
    conf_min_k: u64,
    conf_min_l: u64,
    true_min_k: u64,
) -> Option<PrivacyVerification> {
    if qidspec.quasi_identifying.is_empty() {
        tracing::warn!("unable to verify privacy models, quasi-identifying columns not specified");
        return None;
    }
    let Some(table) = table else {
        tracing::info!("no output dataset, skipping privacy model verification");
        return None;
    };

    let k = k_anonymity(table, qidspec, conf_min_k, true_min_k);
    let (l, xy) = l_diversity_and_xy_anonymity(table, qidspec, conf_min_k, conf_min_l, true_min_k);
    Some(PrivacyVerification { k, l, xy })
}

/// Smallest class size (`true_min_k`, reused from `ClassSizes`) together with
/// the violating QID combinations, in ascending size order, stopping at the
/// first class that already satisfies `conf_min_k`.
fn k_anonymity(table: &Table, qidspec: &QidSpec, conf_min_k: u64, true_min_k: u64) -> KResult {
    let mut violations = BTreeMap::new();
    if true_min_k >= conf_min_k {
        return KResult { true_min_k, violations };
    }

    let mut groups = group_by_qi(table, &qidspec.quasi_identifying);
    groups.sort_by_key(|(_, size)| *size);

    for (key, size) in &groups {
        if *size >= conf_min_k {
            break;
        }
        let clause = qidspec.render_conjunction(&qidspec.quasi_identifying, key, "=");
        violations.insert(clause, *size);
    }

    KResult { true_min_k, violations }
}

/// Rows belonging to the equivalence class identified by `key`.
fn class_rows(table: &Table, qi_columns: &[String], key: &[crate::model::Cell]) -> Table {
    let rows = filter_rows(table, |row| row == key, qi_columns);
    table.select_rows(&rows)
}

fn l_diversity_and_xy_anonymity(
    table: &Table,
    qidspec: &QidSpec,
    conf_min_k: u64,
    conf_min_l: u64,
    true_min_k: u64,
) -> (LResult, XyResult) {
    let groups = group_by_qi(table, &qidspec.quasi_identifying);

    let mut l_violations = BTreeMap::new();
    let mut true_min_l = u64::MAX;

    let (_, identifying_column) = xy_anonymity_computable(table, qidspec);
    let mut xy_violations = BTreeMap::new();
    let mut true_min_xy = u64::MAX;

    for (key, _size) in &groups {
        let clause = qidspec.render_conjunction(&qidspec.quasi_identifying, key, "=");
        let class = class_rows(table, &qidspec.quasi_identifying, key);

        if !qidspec.sensitive.is_empty() {
            let mut offending = BTreeMap::new();
            for sensitive_column in &qidspec.sensitive {
                let distinct = crate::grouper::distinct_count(&class, sensitive_column);
                true_min_l = true_min_l.min(distinct);
                if distinct < conf_min_l {
                    offending.insert(sensitive_column.clone(), distinct);
                }
            }
            if !offending.is_empty() {
                l_violations.insert(clause.clone(), offending);
            }
        }

        if let Some(identifying_column) = &identifying_column {
            let distinct = crate::grouper::distinct_count(&class, identifying_column);
            true_min_xy = true_min_xy.min(distinct);
            if distinct < conf_min_k {
                xy_violations.insert(clause, distinct);
            }
        }
    }

    let l_result = LResult {
        true_min_l: if qidspec.sensitive.is_empty() || true_min_l == u64::MAX { 0 } else { true_min_l },
        violations: l_violations,
    };

    let xy_result = if xy_violations.is_empty() {
        XyResult { true_min_xy: true_min_k, violations: BTreeMap::new() }
    } else {
        XyResult { true_min_xy, violations: xy_violations }
    };

    (l_result, xy_result)
}

/// (i) an identifying column is configured, (ii) its distinct value count is
/// positive and strictly less than the row count (equality means every row
/// is already unique, so individual-level collapses to record-level).
fn xy_anonymity_computable(table: &Table, qidspec: &QidSpec) -> (bool, Option<String>) {
    let Some(identifying_column) = qidspec.identifying.first() else {
        tracing::info!("unable to calculate individual level k-anonymity, missing identifying column");
        return (false, None);
    };
    let distinct = crate::grouper::distinct_count(table, identifying_column);
    if distinct == 0 || distinct as usize == table.row_count() {
        tracing::info!(
            "record level k-anonymity is equal to individual level, skipping (X,Y)-anonymity"
        );
        return (false, None);
    }
    (true, Some(identifying_column.clone()))
}

//! End-to-end scenarios run through the full `analyze` orchestrator, each
//! pinned to a concrete table so the expected numbers can be traced by hand
//! rather than merely asserted against the implementation's own output.

#![allow(clippy::unwrap_used)]

use anonaudit_core::model::{Cell, Column, Table};
use anonaudit_core::{analyze, AnonAuditError, EngineConfig, QidSpec};

fn str_column(name: &str, values: &[&str]) -> Column {
    Column::new(name, values.iter().map(|v| Cell::Str((*v).to_string())).collect())
}

fn int_column(name: &str, values: &[i64]) -> Column {
    Column::new(name, values.iter().copied().map(Cell::Int).collect())
}

fn config(identifying: &[&str], qi: &[&str], sensitive: &[&str], k: Option<u64>, l: Option<u64>) -> EngineConfig {
    EngineConfig {
        qidspec: QidSpec::new(
            identifying.iter().map(|s| (*s).to_string()).collect(),
            qi.iter().map(|s| (*s).to_string()).collect(),
            sensitive.iter().map(|s| (*s).to_string()).collect(),
            "*",
        ),
        conf_min_k: k,
        conf_min_l: l,
    }
}

/// Both tables absent is a fatal, non-degradable error.
#[test]
fn scenario_empty_everything_is_fatal() {
    let cfg = config(&[], &["gender"], &[], Some(5), Some(5));
    let err = analyze(None, None, &cfg).unwrap_err();
    assert!(matches!(err, AnonAuditError::NoUsableInput { .. }));
}

/// Valid tables but no quasi-identifying columns configured degrade to an
/// empty report rather than an error.
#[test]
fn scenario_qi_not_configured_yields_empty_report() {
    let table = Table::new(vec![str_column("gender", &["M", "F"]), str_column("dgn", &["A", "B"])]);
    let cfg = config(&[], &[], &[], Some(5), Some(5));
    let report = analyze(Some(&table), Some(&table), &cfg).unwrap();
    assert!(report.short_circuited);
    assert_eq!(report.to_value(), serde_json::json!({}));
    assert!(report.privacy_verification.is_none());
    assert!(report.equivalence_classes.output.is_none());
    assert!(report.summary_statistics.output.is_none());
    assert!(report.attack_risks.output.is_none());
}

/// A singleton equivalence class produces matching K and L violations keyed
/// on the same rendered clause; thresholds are chosen so exactly the
/// singleton ("gender = 'N'") violates while the four-row class does not.
#[test]
fn scenario_singleton_class_violates_k_and_l() {
    let table = Table::new(vec![
        str_column("gender", &["M", "M", "M", "M", "N"]),
        int_column("ehak", &[1, 2, 3, 4, 9]),
    ]);
    let cfg = config(&[], &["gender"], &["ehak"], Some(2), Some(2));
    let report = analyze(Some(&table), Some(&table), &cfg).unwrap();
    let pv = report.privacy_verification.unwrap();

    assert_eq!(pv.k.true_min_k, 1);
    assert_eq!(pv.k.violations.len(), 1);
    assert_eq!(pv.k.violations["gender = 'N'"], 1);

    assert_eq!(pv.l.true_min_l, 1);
    assert_eq!(pv.l.violations["gender = 'N'"]["ehak"], 1);

    // No identifying column configured, so (X,Y)-anonymity is infeasible and
    // falls back to the record-level true_min_k with no violations.
    assert_eq!(pv.xy.true_min_xy, 1);
    assert!(pv.xy.violations.is_empty());
}

/// Four balanced five-row classes, full diversity in every class, and a
/// fully-unique identifying column: nothing violates any of the three
/// privacy models.
#[test]
fn scenario_balanced_20_rows_no_violations() {
    let genders = ["M", "M", "M", "M", "M", "F", "F", "F", "F", "F", "M", "M", "M", "M", "M", "F", "F", "F", "F", "F"];
    let ehaks = [56, 56, 56, 56, 56, 56, 56, 56, 56, 56, 245, 245, 245, 245, 245, 245, 245, 245, 245, 245];
    let dgns = [
        "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T",
    ];
    let table = Table::new(vec![
        int_column("id", &(1..=20).collect::<Vec<_>>()),
        str_column("gender", &genders),
        int_column("ehak", &ehaks),
        str_column("dgn", &dgns),
    ]);
    let cfg = config(&["id"], &["gender", "ehak"], &["dgn"], Some(5), Some(5));
    let report = analyze(Some(&table), Some(&table), &cfg).unwrap();
    let pv = report.privacy_verification.unwrap();

    assert_eq!(pv.k.true_min_k, 5);
    assert!(pv.k.violations.is_empty());
    assert_eq!(pv.l.true_min_l, 5);
    assert!(pv.l.violations.is_empty());
    // All 20 ids are distinct across 20 rows, so individual-level collapses
    // into record-level and falls back to true_min_k with no violations.
    assert_eq!(pv.xy.true_min_xy, 5);
    assert!(pv.xy.violations.is_empty());
}

/// Same four-class shape as the balanced scenario, but two classes have
/// reduced sensitive-column diversity (4 and 3 distinct `dgn` values): only
/// l-diversity is violated, in those two classes.
#[test]
fn scenario_20_rows_l_diversity_violations_only() {
    let genders = ["M", "M", "M", "M", "M", "F", "F", "F", "F", "F", "M", "M", "M", "M", "M", "N", "N", "N", "N", "N"];
    let ehaks = [56, 56, 56, 56, 56, 56, 56, 56, 56, 56, 245, 245, 245, 245, 245, 245, 245, 245, 245, 245];
    let dgns = [
        "A", "A", "B", "C", "D", // (M, 56): 4 distinct
        "E", "F", "G", "H", "I", // (F, 56): 5 distinct
        "J", "K", "L", "M", "N", // (M, 245): 5 distinct
        "O", "O", "O", "P", "Q", // (N, 245): 3 distinct
    ];
    let table = Table::new(vec![
        int_column("id", &(1..=20).collect::<Vec<_>>()),
        str_column("gender", &genders),
        int_column("ehak", &ehaks),
        str_column("dgn", &dgns),
    ]);
    let cfg = config(&["id"], &["gender", "ehak"], &["dgn"], Some(5), Some(5));
    let report = analyze(Some(&table), Some(&table), &cfg).unwrap();
    let pv = report.privacy_verification.unwrap();

    assert_eq!(pv.k.true_min_k, 5);
    assert!(pv.k.violations.is_empty());

    assert_eq!(pv.l.true_min_l, 3);
    assert_eq!(pv.l.violations.len(), 2);
    assert_eq!(pv.l.violations["gender = 'M' AND ehak = 56"]["dgn"], 4);
    assert_eq!(pv.l.violations["gender = 'N' AND ehak = 245"]["dgn"], 3);

    assert_eq!(pv.xy.true_min_xy, 5);
    assert!(pv.xy.violations.is_empty());
}

/// Fifty-row canonical dataset with six classes (17, 9, 9, 5, 5, 5):
/// equivalence-class statistics and the attacker-risk overview match their
/// hand-derived percentages.
#[test]
fn scenario_50_row_canonical_risk_overview() {
    let class_sizes = [17usize, 9, 9, 5, 5, 5];
    let qi_values = [("M", 10), ("F", 10), ("M", 20), ("F", 20), ("M", 30), ("F", 30)];

    let mut genders = Vec::new();
    let mut ehaks = Vec::new();
    for (size, (gender, ehak)) in class_sizes.iter().zip(qi_values.iter()) {
        for _ in 0..*size {
            genders.push(*gender);
            ehaks.push(*ehak);
        }
    }
    let row_count = genders.len();
    assert_eq!(row_count, 50);

    let table = Table::new(vec![
        int_column("id", &(1..=row_count as i64).collect::<Vec<_>>()),
        str_column("gender", &genders),
        int_column("ehak", &ehaks),
    ]);
    let cfg = config(&["id"], &["gender", "ehak"], &[], Some(5), Some(5));
    let report = analyze(Some(&table), Some(&table), &cfg).unwrap();

    let eq = report.equivalence_classes.output.unwrap();
    assert_eq!(eq.no_classes, 6);
    assert_eq!(eq.no_records, 50);
    assert_eq!(eq.biggest, 17);
    assert_eq!(eq.smallest, 5);
    assert_eq!(eq.suppressed, 0);
    assert!((eq.avg_sup - 8.333).abs() < 1e-9);
    assert!((eq.avg_nosup - 8.333).abs() < 1e-9);

    let risk = report.attack_risks.output.unwrap();
    assert_eq!(risk.prosecutor_lowest, "5.882 %");
    assert_eq!(risk.prosecutor_average, "12.0 %");
    assert_eq!(risk.prosecutor_highest, "20.0 %");
    assert_eq!(risk.records_affected_lowest, "34.0 %");
    assert_eq!(risk.records_affected_highest, "30.0 %");
}

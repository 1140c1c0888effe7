//! Prosecutor / journalist / marketer re-identification risk.

use crate::grouper::group_by_qi;
use crate::model::Table;
use crate::numeric::pct_string;
use crate::qidspec::QidSpec;

use super::class_sizes::EqClassStats;

/// The seven overview fields computed for one dataset, already rendered as
/// `"<v> %"` strings the way the report expects.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskOverview {
    pub prosecutor_lowest: String,
    pub prosecutor_average: String,
    pub prosecutor_highest: String,
    pub records_affected_lowest: String,
    pub records_affected_highest: String,
    pub estimated_journalist_risk: String,
    pub estimated_marketer_risk: String,
}

/// The three gauge-plot numeric series below; consumed by a
/// rendering adapter, not embedded in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSeries {
    pub prosecutor: ProsecutorGauge,
    pub journalist: JournalistGauge,
    pub marketer: MarketerGauge,
    pub reference_line: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProsecutorGauge {
    pub records_at_risk: f64,
    pub highest_risk: f64,
    pub success_rate: f64,
}

pub type JournalistGauge = ProsecutorGauge;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketerGauge {
    pub success_rate: f64,
}

/// Computes the risk overview for one dataset, given its `EqClassStats`.
#[must_use]
pub fn compute_overview(table: &Table, qidspec: &QidSpec, stats: &EqClassStats) -> RiskOverview {
    let rows = table.row_count() as f64;
    let groups = group_by_qi(table, &qidspec.quasi_identifying);

    let affected_lowest: u64 = groups
        .iter()
        .filter(|(_, size)| *size == stats.biggest)
        .map(|(_, size)| size)
        .sum();
    let affected_highest: u64 = groups
        .iter()
        .filter(|(_, size)| *size == stats.smallest)
        .map(|(_, size)| size)
        .sum();

    RiskOverview {
        prosecutor_lowest: pct_string(1.0, stats.biggest as f64, 3),
        prosecutor_average: pct_string(1.0, stats.avg_sup, 3),
        prosecutor_highest: pct_string(1.0, stats.smallest as f64, 3),
        records_affected_lowest: pct_string(affected_lowest as f64, rows, 3),
        records_affected_highest: pct_string(affected_highest as f64, rows, 3),
        estimated_journalist_risk: pct_string(1.0, stats.smallest as f64, 3),
        estimated_marketer_risk: pct_string(1.0, stats.avg_sup, 3),
    }
}

/// `records_at_risk` (plot-only): the percentage of rows in classes whose
/// size is below `threshold`, over all classes.
#[must_use]
pub fn records_at_risk(table: &Table, qidspec: &QidSpec, threshold: u64) -> f64 {
    let rows = table.row_count() as f64;
    let groups = group_by_qi(table, &qidspec.quasi_identifying);
    let at_risk: u64 = groups
        .iter()
        .filter(|(_, size)| *size < threshold)
        .map(|(_, size)| size)
        .sum();
    if at_risk == 0 {
        0.0
    } else {
        crate::numeric::pct(at_risk as f64, rows, 3)
    }
}

/// Builds the gauge-plot series for one dataset.
#[must_use]
pub fn gauge_series(stats: &EqClassStats, table: &Table, qidspec: &QidSpec, threshold: u64) -> GaugeSeries {
    let highest_risk = crate::numeric::pct(1.0, stats.smallest as f64, 3);
    let success_rate = crate::numeric::pct(1.0, stats.avg_sup, 3);
    let at_risk = records_at_risk(table, qidspec, threshold);
    GaugeSeries {
        prosecutor: ProsecutorGauge {
            records_at_risk: at_risk,
            highest_risk,
            success_rate,
        },
        journalist: ProsecutorGauge {
            records_at_risk: at_risk,
            highest_risk,
            success_rate,
        },
        marketer: MarketerGauge { success_rate },
        reference_line: crate::numeric::pct(1.0, threshold as f64, 3),
    }
}

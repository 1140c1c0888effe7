//! The report record and its canonical JSON rendering.
//!
//! Key names are the human-readable labels the legacy implementation used —
//! preserved verbatim since they are a compatibility requirement, not an
//! internal naming choice.

use serde_json::{Map, Number, Value};

use crate::metrics::attacker_risk::RiskOverview;
use crate::metrics::class_sizes::EqClassStats;
use crate::metrics::privacy_verifier::PrivacyVerification;
use crate::metrics::summary_statistics::ColumnStats;

/// Canonical string keys, one constant per glossary entry.
pub mod keys {
    pub const SUMMARY_STATISTICS: &str = "Summary statistics";
    pub const SS_INPUT: &str = "Input statistics";
    pub const SS_OUTPUT: &str = "Output statistics";
    pub const SS_DISTINCT: &str = "Distinct values";
    pub const SS_INFORMATIVE: &str = "Informative measures";
    pub const SS_MODES: &str = "Modes";
    pub const SS_GENSUP: &str = "Generalized or suppressed";
    pub const SS_SUP: &str = "Suppressed";
    pub const SS_TOTAL_GENSUP: &str = "Total generalized or suppressed";
    pub const SS_TOTAL_SUP: &str = "Total suppressed";
    pub const SS_SUP_OF_CHANGED: &str = "Suppressed of total changed";

    pub const EQUIVALENCE_CLASSES: &str = "Equivalence class statistics";
    pub const EQ_INPUT: &str = "Input equivalence class";
    pub const EQ_OUTPUT: &str = "Output equivalence class";
    pub const EQ_AVG_SUP: &str = "Average equivalence class size (including suppressed)";
    pub const EQ_AVG_NOSUP: &str = "Average equivalence class size (without suppressed)";
    pub const EQ_BIGGEST: &str = "Biggest equivalence class size";
    pub const EQ_SUPPRESSED: &str = "Completely suppressed class size";
    pub const EQ_NOCLASSES: &str = "Number of classes";
    pub const EQ_NORECORDS: &str = "Number of records";
    pub const EQ_SMALLEST: &str = "Smallest equivalence class size";

    pub const PRIVACY_VERIFICATION: &str = "Privacy model verification";
    pub const PR_K: &str = "K and violations";
    pub const PR_L: &str = "L and violations";
    pub const PR_XY: &str = "XY and violations";

    pub const ATTACK_RISKS: &str = "Attacker model risks";
    pub const AR_INPUT: &str = "Input attacker model risks";
    pub const AR_OUTPUT: &str = "Output attacker model risks";
    pub const AR_RECORDS_AFFECTED_LOWEST: &str = "Records affected by lowest risk";
    pub const AR_RECORDS_AFFECTED_HIGHEST: &str = "Records affected by highest risk";
    pub const AR_ESTIMATED_MARKETER_RISK: &str = "Estimated marketer risk";
    pub const AR_PROSECUTOR_LOWEST: &str = "Lowest prosecutor risk";
    pub const AR_PROSECUTOR_AVERAGE: &str = "Average prosecutor risk";
    pub const AR_PROSECUTOR_HIGHEST: &str = "Highest prosecutor risk";
    pub const AR_ESTIMATED_JOURNALIST_RISK: &str = "Estimated journalist risk";
}

/// One dataset-scoped value, present only when the underlying dataset was
/// present and computable.
#[derive(Debug, Clone, Default)]
pub struct DatasetPair<T> {
    pub input: Option<T>,
    pub output: Option<T>,
}

/// The complete, assembled report.
///
/// `short_circuited` distinguishes a genuinely empty report (QI
/// unconfigured, or both K and L thresholds absent — `validator::analyze`
/// never computes anything in that case) from a report that ran to
/// completion but happened to have empty sections. Only the former
/// serializes to a bare `{}`.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub short_circuited: bool,
    pub privacy_verification: Option<PrivacyVerification>,
    pub summary_statistics: DatasetPair<ColumnStats>,
    pub equivalence_classes: DatasetPair<EqClassStats>,
    pub attack_risks: DatasetPair<RiskOverview>,
}

impl Report {
    /// An empty report, the one `validator::analyze` returns when it
    /// short-circuits. Renders to a literal `{}`, not a populated shape
    /// with empty sections.
    #[must_use]
    pub fn empty() -> Self {
        Report { short_circuited: true, ..Report::default() }
    }

    /// Renders the report into a `serde_json::Value` tree using the
    /// glossary key names. `serde_json::Map` is `BTreeMap`-backed by
    /// default, so keys come out sorted without an explicit sort step.
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.short_circuited {
            return Value::Object(Map::new());
        }
        let mut root = Map::new();
        root.insert(
            keys::SUMMARY_STATISTICS.to_string(),
            dataset_pair_to_value(&self.summary_statistics, keys::SS_INPUT, keys::SS_OUTPUT, column_stats_to_value),
        );
        root.insert(
            keys::EQUIVALENCE_CLASSES.to_string(),
            dataset_pair_to_value(&self.equivalence_classes, keys::EQ_INPUT, keys::EQ_OUTPUT, class_stats_to_value),
        );
        root.insert(
            keys::PRIVACY_VERIFICATION.to_string(),
            self.privacy_verification
                .as_ref()
                .map_or_else(|| Value::Object(Map::new()), privacy_to_value),
        );
        root.insert(
            keys::ATTACK_RISKS.to_string(),
            dataset_pair_to_value(&self.attack_risks, keys::AR_INPUT, keys::AR_OUTPUT, risk_overview_to_value),
        );
        Value::Object(root)
    }

    /// Renders the report as a canonical JSON string: sorted keys,
    /// 4-space indent, `", "` item separators and `": "` key separators —
    /// matching the legacy `json.dumps(..., indent=4, sort_keys=True,
    /// separators=(', ', ': '))` output byte-for-byte.
    #[must_use]
    pub fn to_canonical_json(&self) -> String {
        to_canonical_json(&self.to_value())
    }
}

fn dataset_pair_to_value<T>(
    pair: &DatasetPair<T>,
    input_key: &str,
    output_key: &str,
    render: impl Fn(&T) -> Value,
) -> Value {
    let mut map = Map::new();
    map.insert(
        input_key.to_string(),
        pair.input.as_ref().map_or_else(|| Value::Object(Map::new()), &render),
    );
    map.insert(
        output_key.to_string(),
        pair.output.as_ref().map_or_else(|| Value::Object(Map::new()), &render),
    );
    Value::Object(map)
}

fn column_stats_to_value(stats: &ColumnStats) -> Value {
    let mut map = Map::new();
    map.insert(keys::SS_DISTINCT.to_string(), btreemap_to_value(&stats.distinct, |n| Value::Number((*n).into())));
    map.insert(
        keys::SS_MODES.to_string(),
        btreemap_to_value(&stats.modes, |(value, count)| {
            Value::Array(vec![Value::String(value.clone()), Value::Number((*count).into())])
        }),
    );
    map.insert(keys::SS_INFORMATIVE.to_string(), btreemap_to_value(&stats.informative, |n| Value::Number((*n).into())));
    if !stats.suppressed.is_empty() {
        map.insert(
            keys::SS_SUP.to_string(),
            btreemap_to_value(&stats.suppressed, |cp| {
                Value::Array(vec![Value::Number(cp.count.into()), Value::String(cp.percent.clone())])
            }),
        );
    }
    if !stats.gensup_per_col.is_empty() {
        map.insert(
            keys::SS_GENSUP.to_string(),
            btreemap_to_value(&stats.gensup_per_col, |n| Value::Number((*n).into())),
        );
        map.insert(
            keys::SS_TOTAL_GENSUP.to_string(),
            Value::Array(vec![Value::Number(stats.total_gensup.count.into()), Value::String(stats.total_gensup.percent.clone())]),
        );
        map.insert(
            keys::SS_TOTAL_SUP.to_string(),
            Value::Array(vec![Value::Number(stats.total_sup.count.into()), Value::String(stats.total_sup.percent.clone())]),
        );
        map.insert(keys::SS_SUP_OF_CHANGED.to_string(), Value::String(stats.sup_of_changed.clone()));
    }
    Value::Object(map)
}

fn class_stats_to_value(stats: &EqClassStats) -> Value {
    let mut map = Map::new();
    map.insert(keys::EQ_AVG_SUP.to_string(), number_from_f64(stats.avg_sup));
    map.insert(keys::EQ_AVG_NOSUP.to_string(), number_from_f64(stats.avg_nosup));
    map.insert(keys::EQ_SUPPRESSED.to_string(), Value::Number(stats.suppressed.into()));
    map.insert(keys::EQ_SMALLEST.to_string(), Value::Number(stats.smallest.into()));
    map.insert(keys::EQ_BIGGEST.to_string(), Value::Number(stats.biggest.into()));
    map.insert(keys::EQ_NOCLASSES.to_string(), Value::Number(stats.no_classes.into()));
    map.insert(keys::EQ_NORECORDS.to_string(), Value::Number(stats.no_records.into()));
    Value::Object(map)
}

fn risk_overview_to_value(overview: &RiskOverview) -> Value {
    let mut map = Map::new();
    map.insert(keys::AR_PROSECUTOR_LOWEST.to_string(), Value::String(overview.prosecutor_lowest.clone()));
    map.insert(keys::AR_PROSECUTOR_AVERAGE.to_string(), Value::String(overview.prosecutor_average.clone()));
    map.insert(keys::AR_PROSECUTOR_HIGHEST.to_string(), Value::String(overview.prosecutor_highest.clone()));
    map.insert(keys::AR_RECORDS_AFFECTED_LOWEST.to_string(), Value::String(overview.records_affected_lowest.clone()));
    map.insert(keys::AR_RECORDS_AFFECTED_HIGHEST.to_string(), Value::String(overview.records_affected_highest.clone()));
    map.insert(keys::AR_ESTIMATED_JOURNALIST_RISK.to_string(), Value::String(overview.estimated_journalist_risk.clone()));
    map.insert(keys::AR_ESTIMATED_MARKETER_RISK.to_string(), Value::String(overview.estimated_marketer_risk.clone()));
    Value::Object(map)
}

fn privacy_to_value(verification: &PrivacyVerification) -> Value {
    let mut map = Map::new();
    map.insert(
        keys::PR_K.to_string(),
        Value::Array(vec![
            Value::Number(verification.k.true_min_k.into()),
            btreemap_to_value(&verification.k.violations, |n| Value::Number((*n).into())),
        ]),
    );
    map.insert(
        keys::PR_L.to_string(),
        Value::Array(vec![
            Value::Number(verification.l.true_min_l.into()),
            btreemap_to_value(&verification.l.violations, |inner| {
                btreemap_to_value(inner, |n| Value::Number((*n).into()))
            }),
        ]),
    );
    map.insert(
        keys::PR_XY.to_string(),
        Value::Array(vec![
            Value::Number(verification.xy.true_min_xy.into()),
            btreemap_to_value(&verification.xy.violations, |n| Value::Number((*n).into())),
        ]),
    );
    Value::Object(map)
}

fn btreemap_to_value<V>(map: &std::collections::BTreeMap<String, V>, render: impl Fn(&V) -> Value) -> Value {
    let mut out = Map::new();
    for (key, value) in map {
        out.insert(key.clone(), render(value));
    }
    Value::Object(out)
}

fn number_from_f64(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Renders `value` with sorted keys (already guaranteed by `Map`'s
/// `BTreeMap` backing), 4-space indentation, and `", "`/`": "` separators —
/// the exact shape `json.dumps(..., indent=4, sort_keys=True,
/// separators=(', ', ': '))` produces, which `serde_json`'s own pretty
/// printer does not offer (it omits the trailing space after each comma).
#[must_use]
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, 0, &mut out);
    out
}

fn write_value(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            let last = map.len() - 1;
            for (i, (key, val)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str(&serde_json::to_string(key).unwrap_or_default());
                out.push_str(": ");
                write_value(val, depth + 1, out);
                if i != last {
                    out.push_str(", \n");
                } else {
                    out.push('\n');
                }
            }
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(item, depth + 1, out);
                if i != last {
                    out.push_str(", \n");
                } else {
                    out.push('\n');
                }
            }
            push_indent(out, depth);
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

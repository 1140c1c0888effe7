//! Top-level orchestration: assembles a [`Report`] from an input/output
//! dataset pair and a configuration.
//!
//! Mirrors `original_source/Validator.py::analyzeAndValidate`'s sequence:
//! load, cast thresholds, short-circuit on missing QI or on both thresholds
//! absent, compute summary statistics and equivalence-class sizes for
//! whichever datasets are present, extract `true_min_k` from the output
//! equivalence classes (0 if the output is absent), then run the privacy
//! verifier against the output and the attacker-risk overview against
//! whichever of input/output are present.

use crate::error::{AnonAuditError, Result};
use crate::ingest::EngineConfig;
use crate::metrics::{attacker_risk, class_sizes, privacy_verifier, summary_statistics};
use crate::model::Table;
use crate::qidspec::QidSpec;
use crate::report::{DatasetPair, Report};

/// Threshold a missing config value degrades to when only one of K/L is
/// configured — the verifier still runs, just never flags that dimension.
const UNBOUNDED_THRESHOLD: u64 = u64::MAX;

/// Runs the full analysis over an input/output dataset pair.
///
/// `input` and `output` are each `None` when that file failed to ingest;
/// at least one of them must be `Some`.
///
/// # Errors
/// Returns `AnonAuditError::NoUsableInput` if both datasets are absent.
pub fn analyze(input: Option<&Table>, output: Option<&Table>, config: &EngineConfig) -> Result<Report> {
    if input.is_none() && output.is_none() {
        return Err(AnonAuditError::no_usable_input(
            "neither the input nor the output dataset could be loaded",
        ));
    }

    let qidspec = &config.qidspec;

    if qidspec.quasi_identifying.is_empty() {
        tracing::warn!("no quasi-identifying columns configured, returning an empty report");
        return Ok(Report::empty());
    }
    if config.conf_min_k.is_none() && config.conf_min_l.is_none() {
        tracing::warn!("neither a K nor an L threshold is configured, returning an empty report");
        return Ok(Report::empty());
    }

    let summary_statistics = build_summary_statistics(input, output, qidspec)?;
    let equivalence_classes = build_equivalence_classes(input, output, qidspec)?;

    let true_min_k = equivalence_classes.output.as_ref().map_or(0, |stats| stats.smallest);
    let conf_min_k = config.conf_min_k.unwrap_or(UNBOUNDED_THRESHOLD);
    let conf_min_l = config.conf_min_l.unwrap_or(UNBOUNDED_THRESHOLD);

    let privacy_verification = privacy_verifier::compute(output, qidspec, conf_min_k, conf_min_l, true_min_k);

    let attack_risks = DatasetPair {
        input: equivalence_classes
            .input
            .as_ref()
            .zip(input)
            .map(|(stats, table)| attacker_risk::compute_overview(table, qidspec, stats)),
        output: equivalence_classes
            .output
            .as_ref()
            .zip(output)
            .map(|(stats, table)| attacker_risk::compute_overview(table, qidspec, stats)),
    };

    Ok(Report {
        privacy_verification,
        summary_statistics,
        equivalence_classes,
        attack_risks,
    })
}

fn build_summary_statistics(
    input: Option<&Table>,
    output: Option<&Table>,
    qidspec: &QidSpec,
) -> Result<DatasetPair<summary_statistics::ColumnStats>> {
    let input_stats = input
        .map(|table| summary_statistics::compute_input(table, &qidspec.blind))
        .transpose()?;
    let output_stats = output
        .map(|table| summary_statistics::compute_output(table, input, &qidspec.blind))
        .transpose()?;
    Ok(DatasetPair { input: input_stats, output: output_stats })
}

fn build_equivalence_classes(
    input: Option<&Table>,
    output: Option<&Table>,
    qidspec: &QidSpec,
) -> Result<DatasetPair<class_sizes::EqClassStats>> {
    let input_stats = input.map(|table| class_sizes::compute(table, qidspec, "Input", true)).transpose()?;
    let output_stats = output.map(|table| class_sizes::compute(table, qidspec, "Output", false)).transpose()?;
    Ok(DatasetPair { input: input_stats, output: output_stats })
}

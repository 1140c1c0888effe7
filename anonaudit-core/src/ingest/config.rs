//! TOML configuration parsing.
//!
//! `[main]` carries the column classification, `[thresholds]` the K/L
//! values as strings — cast per the same rule the legacy `Validator.cast`
//! used: accept an integer-parseable string `>= 1`, otherwise warn and treat
//! as unspecified.

use serde::Deserialize;

use crate::qidspec::QidSpec;

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    main: MainSection,
    thresholds: Option<ThresholdsSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct MainSection {
    #[serde(default)]
    identifying: String,
    #[serde(default)]
    quasi_identifying: String,
    #[serde(default)]
    sensitive: String,
    #[serde(default = "default_blind")]
    blind: String,
}

fn default_blind() -> String {
    "*".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ThresholdsSection {
    k: Option<String>,
    l: Option<String>,
}

/// The parsed, typed engine configuration: column classification plus
/// optional K/L thresholds.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub qidspec: QidSpec,
    pub conf_min_k: Option<u64>,
    pub conf_min_l: Option<u64>,
}

/// Parses `toml_str` into an `EngineConfig`.
///
/// # Errors
/// Returns `AnonAuditError::Configuration` if the TOML is malformed or the
/// `[main]` section is missing.
pub fn parse(toml_str: &str) -> crate::error::Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(toml_str)
        .map_err(|e| crate::error::AnonAuditError::configuration(format!("invalid configuration: {e}")))?;

    let qidspec = QidSpec::new(
        QidSpec::split(&raw.main.identifying),
        QidSpec::split(&raw.main.quasi_identifying),
        QidSpec::split(&raw.main.sensitive),
        raw.main.blind,
    );

    let thresholds = raw.thresholds.unwrap_or_default();
    let conf_min_k = cast_threshold("k", thresholds.k.as_deref());
    let conf_min_l = cast_threshold("l", thresholds.l.as_deref());

    Ok(EngineConfig { qidspec, conf_min_k, conf_min_l })
}

/// Accepts an integer-parseable string `>= 1`; anything else is logged and
/// treated as unspecified (`None`), matching `Validator.cast`'s
/// warn-and-degrade behaviour.
fn cast_threshold(name: &str, raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value >= 1 => Some(value),
        Ok(_) => {
            tracing::warn!(threshold = name, value = raw, "expected threshold to be >= 1");
            None
        }
        Err(_) => {
            tracing::warn!(threshold = name, value = raw, "expected threshold to be a number string");
            None
        }
    }
}

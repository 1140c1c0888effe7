//! Column classification and the blind-token predicates shared across the
//! metrics engine.

use crate::model::Cell;

/// Column classification plus the suppression token. Shared read-only state
/// handed to every other component.
#[derive(Debug, Clone)]
pub struct QidSpec {
    pub identifying: Vec<String>,
    pub quasi_identifying: Vec<String>,
    pub sensitive: Vec<String>,
    pub blind: String,
}

impl QidSpec {
    /// Builds a `QidSpec`, coercing an illegal blind token (empty, or
    /// containing a single quote) to `*` and logging a warning.
    #[must_use]
    pub fn new(
        identifying: Vec<String>,
        quasi_identifying: Vec<String>,
        sensitive: Vec<String>,
        blind: impl Into<String>,
    ) -> Self {
        let blind = blind.into();
        let blind = if blind.is_empty() || blind.contains('\'') {
            tracing::warn!(blind = %blind, "illegal blind token, falling back to '*'");
            "*".to_string()
        } else {
            blind
        };
        Self {
            identifying,
            quasi_identifying,
            sensitive,
            blind,
        }
    }

    /// Parses a comma-separated column-name string into a trimmed,
    /// non-empty list. Internal whitespace within a name collapses to a
    /// single underscore. Empty/whitespace input yields the empty list.
    #[must_use]
    pub fn split(list_string: &str) -> Vec<String> {
        list_string
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join("_"))
            .collect()
    }

    /// True when every QI column in `row` equals the blind token. Empty QI
    /// is vacuously true.
    #[must_use]
    pub fn is_all_blind(&self, row: &[Cell]) -> bool {
        row.iter().all(|c| c.is_blind(&self.blind))
    }

    /// True when at least one QI column in `row` is not the blind token.
    /// Empty QI is vacuously true.
    #[must_use]
    pub fn is_no_blind(&self, row: &[Cell]) -> bool {
        self.quasi_identifying.is_empty() || row.iter().any(|c| !c.is_blind(&self.blind))
    }

    /// Renders a canonical `col1 op val1 AND col2 op val2 ...` conjunction
    /// over the given column/value pairs, in the order supplied. Used as the
    /// stable textual key for privacy-violation maps.
    #[must_use]
    pub fn render_conjunction(&self, columns: &[String], values: &[Cell], op: &str) -> String {
        columns
            .iter()
            .zip(values)
            .map(|(col, val)| format!("{col} {op} {}", val.render()))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(blind: &str) -> QidSpec {
        QidSpec::new(vec!["id".into()], vec!["gender".into(), "ehak".into()], vec!["dgn".into()], blind)
    }

    #[test]
    fn illegal_blind_token_falls_back_to_star() {
        let s = QidSpec::new(vec![], vec![], vec![], "");
        assert_eq!(s.blind, "*");
        let s = QidSpec::new(vec![], vec![], vec![], "it's");
        assert_eq!(s.blind, "*");
    }

    #[test]
    fn legal_blind_token_is_kept() {
        let s = QidSpec::new(vec![], vec![], vec![], "#");
        assert_eq!(s.blind, "#");
    }

    #[test]
    fn split_trims_and_drops_empties() {
        assert_eq!(
            QidSpec::split(" gender ,ehak,, dgn "),
            vec!["gender", "ehak", "dgn"]
        );
        assert_eq!(QidSpec::split(""), Vec::<String>::new());
        assert_eq!(QidSpec::split("   "), Vec::<String>::new());
    }

    #[test]
    fn split_collapses_internal_whitespace_to_underscore() {
        assert_eq!(QidSpec::split("date of birth"), vec!["date_of_birth"]);
    }

    #[test]
    fn all_blind_requires_every_qi_column_blind() {
        let s = spec("*");
        let all_blind = [Cell::Str("*".into()), Cell::Str("*".into())];
        let not_all_blind = [Cell::Str("*".into()), Cell::Str("56".into())];
        assert!(s.is_all_blind(&all_blind));
        assert!(!s.is_all_blind(&not_all_blind));
    }

    #[test]
    fn empty_qi_predicates_are_vacuously_true() {
        let s = QidSpec::new(vec![], vec![], vec![], "*");
        assert!(s.is_all_blind(&[]));
        assert!(s.is_no_blind(&[]));
    }

    #[test]
    fn no_blind_requires_at_least_one_informative_value() {
        let s = spec("*");
        let all_blind = [Cell::Str("*".into()), Cell::Str("*".into())];
        let partial = [Cell::Str("*".into()), Cell::Str("56".into())];
        assert!(!s.is_no_blind(&all_blind));
        assert!(s.is_no_blind(&partial));
    }

    #[test]
    fn render_conjunction_quotes_strings_and_bares_numbers() {
        let s = spec("*");
        let cols = vec!["gender".to_string(), "ehak".to_string()];
        let vals = vec![Cell::Str("M".into()), Cell::Int(56)];
        assert_eq!(
            s.render_conjunction(&cols, &vals, "="),
            "gender = 'M' AND ehak = 56"
        );
    }
}

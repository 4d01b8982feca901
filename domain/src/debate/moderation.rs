//! Moderator intervention checks

/// Sentinel a moderator answers with when an argument needs calling out
pub const INTERVENTION_SENTINEL: &str = "INTERVENE:";

/// Prefix of every intervention message in a transcript
pub const INTERVENTION_PREFIX: &str = "⚠️ MODERATOR INTERVENTION:";

/// Extract the explanation from a moderator check.
///
/// Leading whitespace is ignored. Returns `None` for anything that does
/// not begin with the sentinel (such as `OK`) or that carries an empty
/// explanation.
pub fn parse_intervention(raw: &str) -> Option<String> {
    let explanation = raw.trim_start().strip_prefix(INTERVENTION_SENTINEL)?.trim();
    if explanation.is_empty() {
        None
    } else {
        Some(explanation.to_string())
    }
}

/// Transcript text for an intervention
pub fn intervention_text(explanation: &str) -> String {
    format!("{} {}", INTERVENTION_PREFIX, explanation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intervention() {
        assert_eq!(
            parse_intervention("INTERVENE: Strawman of the opposing claim."),
            Some("Strawman of the opposing claim.".to_string())
        );
        assert_eq!(
            parse_intervention("\n INTERVENE:ad hominem"),
            Some("ad hominem".to_string())
        );
    }

    #[test]
    fn test_sound_argument_is_not_an_intervention() {
        assert_eq!(parse_intervention("OK"), None);
        assert_eq!(parse_intervention("Looks fine. INTERVENE: not really"), None);
        assert_eq!(parse_intervention("INTERVENE:   "), None);
        assert_eq!(parse_intervention(""), None);
    }

    #[test]
    fn test_intervention_text() {
        assert_eq!(
            intervention_text("Hasty generalization."),
            "⚠️ MODERATOR INTERVENTION: Hasty generalization."
        );
    }
}

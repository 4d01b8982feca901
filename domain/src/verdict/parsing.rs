//! Verdict parsing for judge responses.
//!
//! Judges are asked to answer with a JSON object
//! `{"winner": ..., "reasoning": ...}`, but model output cannot be trusted to
//! be valid JSON. [`parse_verdict`] extracts a best-effort verdict through a
//! ladder of fallbacks and never fails.
//!
//! | Layer | Source | Reasoning |
//! |-------|--------|-----------|
//! | 1 | First `{...}` block decoded as JSON | verbatim |
//! | 2 | `"reasoning": "..."` pattern in the raw text | at most 600 chars |
//! | 3 | Prose with fences and JSON fragments stripped | at most 600 chars |

use super::label::{VerdictDomain, WinnerLabel};
use crate::core::string::take_chars;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Maximum reasoning length produced by the fallback layers
pub const MAX_FALLBACK_REASONING_CHARS: usize = 600;

const UNPARSEABLE_REASONING: &str = "Unable to parse judge decision";

static FIRST_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*?\}").expect("valid regex"));
static REASONING_KV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"reasoning"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});
static WINNER_KV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""winner"\s*:\s*"([^"]*)""#).expect("valid regex"));
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("valid regex"));

/// Which layer of the ladder produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSource {
    Json,
    KeyValue,
    Prose,
}

/// Winner and reasoning extracted from a raw judge response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerdict {
    pub winner: WinnerLabel,
    pub reasoning: String,
    pub source: ParseSource,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    winner: Option<serde_json::Value>,
    #[serde(default)]
    reasoning: Option<serde_json::Value>,
}

/// Parse a judge response into a verdict within `domain`.
///
/// Always returns a winner inside the domain (defaulting to `Tie`).
///
/// # Examples
///
/// ```
/// use arena_domain::verdict::{parse_verdict, VerdictDomain, WinnerLabel};
///
/// let raw = r#"Here you go: {"winner": "negative", "reasoning": "Better evidence."}"#;
/// let parsed = parse_verdict(raw, &VerdictDomain::Debate);
/// assert_eq!(parsed.winner, WinnerLabel::Negative);
/// assert_eq!(parsed.reasoning, "Better evidence.");
///
/// let parsed = parse_verdict("I could not decide.", &VerdictDomain::Debate);
/// assert_eq!(parsed.winner, WinnerLabel::Tie);
/// ```
pub fn parse_verdict(raw: &str, domain: &VerdictDomain) -> ParsedVerdict {
    let decoded = decode_first_object(raw);

    // Winner string from the decoded object, if any
    let decoded_winner: Option<String> = decoded
        .as_ref()
        .and_then(|v| v.winner.as_ref())
        .and_then(|w| w.as_str())
        .map(str::to_string);
    let decoded_reasoning: Option<String> = decoded
        .as_ref()
        .and_then(|v| v.reasoning.as_ref())
        .and_then(|r| r.as_str())
        .filter(|r| !r.trim().is_empty())
        .map(str::to_string);

    let recognized = decoded_winner
        .as_deref()
        .and_then(|w| domain.recognize(w));

    if let (Some(winner), Some(reasoning)) = (recognized, decoded_reasoning.as_ref()) {
        return ParsedVerdict {
            winner,
            reasoning: reasoning.clone(),
            source: ParseSource::Json,
        };
    }

    // A winner hint survives into the fallback layers when we have one
    let winner_hint = recognized
        .or_else(|| {
            WINNER_KV
                .captures(raw)
                .and_then(|c| domain.recognize(&c[1]))
        })
        .or_else(|| {
            decoded_winner
                .as_deref()
                .map(|w| domain.infer_from_text(w))
                .filter(|w| !w.is_tie())
        });

    let reasoning = decoded_reasoning.or_else(|| extract_reasoning_kv(raw));
    if let Some(reasoning) = reasoning {
        return ParsedVerdict {
            winner: winner_hint.unwrap_or_else(|| domain.infer_from_text(raw)),
            reasoning: take_chars(reasoning.trim(), MAX_FALLBACK_REASONING_CHARS),
            source: ParseSource::KeyValue,
        };
    }

    let cleaned = strip_markup(raw);
    let winner = winner_hint.unwrap_or_else(|| domain.infer_from_text(&cleaned));
    let prose = if !cleaned.is_empty() {
        cleaned
    } else if !raw.trim().is_empty() {
        raw.trim().to_string()
    } else {
        UNPARSEABLE_REASONING.to_string()
    };

    ParsedVerdict {
        winner,
        reasoning: take_chars(&prose, MAX_FALLBACK_REASONING_CHARS),
        source: ParseSource::Prose,
    }
}

/// Decode the first `{...}` block.
///
/// The lazy match is tried first; when it cuts an object short (a `}` inside
/// a string value) the object is decoded from the same opening brace with a
/// streaming deserializer, which respects string boundaries.
fn decode_first_object(raw: &str) -> Option<RawVerdict> {
    let m = FIRST_OBJECT.find(raw)?;

    if let Ok(v) = serde_json::from_str::<RawVerdict>(m.as_str()) {
        return Some(v);
    }

    serde_json::Deserializer::from_str(&raw[m.start()..])
        .into_iter::<RawVerdict>()
        .next()
        .and_then(Result::ok)
}

fn extract_reasoning_kv(raw: &str) -> Option<String> {
    let captured = REASONING_KV.captures(raw)?.get(1)?.as_str();
    // Re-quote to let serde_json resolve escape sequences
    let unescaped = serde_json::from_str::<String>(&format!("\"{}\"", captured))
        .unwrap_or_else(|_| captured.to_string());
    if unescaped.trim().is_empty() {
        None
    } else {
        Some(unescaped)
    }
}

/// Remove code fences and JSON-looking fragments, collapsing whitespace runs.
fn strip_markup(raw: &str) -> String {
    let without_fences = CODE_FENCE.replace_all(raw, " ");
    let without_json = FIRST_OBJECT.replace_all(&without_fences, " ");
    without_json
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::Participant;

    fn debate() -> VerdictDomain {
        VerdictDomain::Debate
    }

    fn discussion() -> VerdictDomain {
        VerdictDomain::Discussion(Participant::default_panel())
    }

    // ==================== Layer 1: strict JSON ====================

    #[test]
    fn test_plain_json() {
        let raw = r#"{"winner": "affirmative", "reasoning": "Clear warrants."}"#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Affirmative);
        assert_eq!(parsed.reasoning, "Clear warrants.");
        assert_eq!(parsed.source, ParseSource::Json);
    }

    #[test]
    fn test_json_in_code_fence_with_preamble() {
        let raw = r#"
After weighing both sides:
```json
{
  "winner": "negative",
  "reasoning": "The negative engaged every contention."
}
```
"#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Negative);
        assert_eq!(parsed.reasoning, "The negative engaged every contention.");
    }

    #[test]
    fn test_reasoning_returned_verbatim() {
        let raw = r#"{"winner": "tie", "reasoning": "  Evenly matched.  "}"#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Tie);
        assert_eq!(parsed.reasoning, "  Evenly matched.  ");
    }

    #[test]
    fn test_brace_inside_reasoning_still_decodes() {
        let raw = r#"{"winner": "negative", "reasoning": "They used {sets} well."} trailing"#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Negative);
        assert_eq!(parsed.reasoning, "They used {sets} well.");
        assert_eq!(parsed.source, ParseSource::Json);
    }

    #[test]
    fn test_discussion_domain_json() {
        let raw = r#"{"winner": "gemini", "reasoning": "Most complete answer."}"#;
        let parsed = parse_verdict(raw, &discussion());
        assert_eq!(parsed.winner, WinnerLabel::Participant(Participant::Gemini));
    }

    #[test]
    fn test_label_outside_domain_is_not_accepted_verbatim() {
        // "affirmative" is not a discussion label; no participant is named
        let raw = r#"{"winner": "affirmative", "reasoning": "Strong case overall."}"#;
        let parsed = parse_verdict(raw, &discussion());
        assert_eq!(parsed.winner, WinnerLabel::Tie);
        assert_eq!(parsed.reasoning, "Strong case overall.");
        assert_eq!(parsed.source, ParseSource::KeyValue);
    }

    // ==================== Layer 2: key-value pattern ====================

    #[test]
    fn test_broken_json_uses_reasoning_pattern() {
        let raw = r#"{"winner": "negative", "reasoning": "Better \"clash\" overall.", }"#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Negative);
        assert_eq!(parsed.reasoning, "Better \"clash\" overall.");
        assert_eq!(parsed.source, ParseSource::KeyValue);
    }

    #[test]
    fn test_empty_reasoning_keeps_recognized_winner() {
        let raw = r#"{"winner": "affirmative", "reasoning": ""} The affirmative had better evidence."#;
        let parsed = parse_verdict(raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Affirmative);
        assert_eq!(parsed.source, ParseSource::Prose);
        assert_eq!(parsed.reasoning, "The affirmative had better evidence.");
    }

    #[test]
    fn test_descriptive_winner_string_is_inferred() {
        let raw = r#"{"winner": "Claude 4.5 Sonnet", "reasoning": "Best reasoning."}"#;
        let parsed = parse_verdict(raw, &discussion());
        assert_eq!(parsed.winner, WinnerLabel::Participant(Participant::Anthropic));
        assert_eq!(parsed.reasoning, "Best reasoning.");
    }

    // ==================== Layer 3: prose ====================

    #[test]
    fn test_prose_infers_single_side() {
        let parsed = parse_verdict("I side with the negative on impacts.", &debate());
        assert_eq!(parsed.winner, WinnerLabel::Negative);
        assert_eq!(parsed.source, ParseSource::Prose);
    }

    #[test]
    fn test_prose_strips_fences_and_fragments() {
        let raw = "```text\nGemini wins on depth.\n``` {\"x\": 1}";
        let parsed = parse_verdict(raw, &discussion());
        assert_eq!(parsed.winner, WinnerLabel::Participant(Participant::Gemini));
        assert!(!parsed.reasoning.contains("```"));
        assert!(!parsed.reasoning.contains("\"x\""));
    }

    #[test]
    fn test_empty_input_is_tie() {
        let parsed = parse_verdict("", &debate());
        assert_eq!(parsed.winner, WinnerLabel::Tie);
        assert!(parsed.reasoning.chars().count() <= MAX_FALLBACK_REASONING_CHARS);
    }

    #[test]
    fn test_long_prose_is_truncated() {
        let raw = "word ".repeat(1000);
        let parsed = parse_verdict(&raw, &debate());
        assert_eq!(parsed.winner, WinnerLabel::Tie);
        assert_eq!(parsed.reasoning.chars().count(), MAX_FALLBACK_REASONING_CHARS);
    }

    #[test]
    fn test_totality_on_odd_inputs() {
        let inputs = [
            "{",
            "}",
            "{}",
            "{{{{",
            "\"reasoning\": \"",
            "```json\n```",
            "null",
            "🦀🦀🦀",
            r#"{"winner": 42, "reasoning": ["a"]}"#,
        ];
        for raw in inputs {
            for domain in [debate(), discussion()] {
                let parsed = parse_verdict(raw, &domain);
                assert!(domain.contains(parsed.winner), "winner outside domain for {raw:?}");
                if parsed.source != ParseSource::Json {
                    assert!(parsed.reasoning.chars().count() <= MAX_FALLBACK_REASONING_CHARS);
                }
            }
        }
    }
}

//! Duration and message parsing for timer requests.
//!
//! The input grammar is `[<hours>h] [<minutes>m] [<seconds>s]` with optional
//! single-space separators, followed by an optional `: <message>` suffix.
//! Parsing is pure: bad input yields `None`, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::DurationSpec;

/// Pattern for the duration head. All segments are optional, in h, m, s
/// order, with at most one space between a numeral and its unit and
/// between segments.
const DURATION_PATTERN: &str =
    r"^((?P<hours>\d+)\s?h)?\s?((?P<minutes>\d+)\s?m)?\s?((?P<seconds>\d+)\s?s)?";

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| Regex::new(DURATION_PATTERN).expect("duration pattern is valid"))
}

// ============================================================================
// ParseMode
// ============================================================================

/// How tolerant the duration parser is of trailing input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Historical behavior: match a duration prefix, ignore the rest.
    #[default]
    Lenient,
    /// Require the whole (trimmed) input to be consumed by the grammar.
    Strict,
}

impl ParseMode {
    /// Maps the `strict_parsing` configuration flag to a mode.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a duration from free-form text.
///
/// Returns `None` when nothing matches, when any unit exceeds
/// [`DurationSpec::MAX_UNIT`], or when the result would be zero-length.
/// In [`ParseMode::Strict`] the trimmed input must be consumed entirely.
pub fn parse_duration(input: &str, mode: ParseMode) -> Option<DurationSpec> {
    let trimmed = input.trim();

    // The pattern has only optional segments, so it always matches; an
    // input with no recognizable segment just yields the zero spec below.
    let caps = duration_re().captures(trimmed)?;

    if mode == ParseMode::Strict {
        let matched_len = caps.get(0).map_or(0, |m| m.end());
        if matched_len != trimmed.len() {
            return None;
        }
    }

    let hours = parse_unit(caps.name("hours").map(|m| m.as_str()))?;
    let minutes = parse_unit(caps.name("minutes").map(|m| m.as_str()))?;
    let seconds = parse_unit(caps.name("seconds").map(|m| m.as_str()))?;

    let spec = DurationSpec::new(hours, minutes, seconds);
    if spec.is_zero() || !spec.in_bounds() {
        return None;
    }

    Some(spec)
}

/// Parses a single captured numeral; absence means zero, a numeral too
/// large for u32 is a rejection rather than an error.
fn parse_unit(capture: Option<&str>) -> Option<u32> {
    match capture {
        Some(digits) => digits.parse().ok(),
        None => Some(0),
    }
}

/// Extracts the message suffix: everything after the first colon, trimmed.
///
/// No colon yields the empty string (which selects the default label).
pub fn parse_message(input: &str) -> String {
    match input.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => String::new(),
    }
}

/// Parses a full timer request: duration head plus optional `: message`.
///
/// The message suffix is split off before the duration is parsed, so
/// [`ParseMode::Strict`] applies to the duration head alone.
pub fn parse_request(input: &str, mode: ParseMode) -> Option<(DurationSpec, String)> {
    let head = match input.split_once(':') {
        Some((head, _)) => head,
        None => input,
    };
    let duration = parse_duration(head, mode)?;
    Some((duration, parse_message(input)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // parse_duration Tests
    // ------------------------------------------------------------------------

    mod parse_duration_tests {
        use super::*;

        #[test]
        fn test_full_form() {
            let spec = parse_duration("1h20m5s", ParseMode::Lenient).unwrap();
            assert_eq!(spec, DurationSpec::new(1, 20, 5));
            assert_eq!(spec.total_seconds(), 3600 + 20 * 60 + 5);
        }

        #[test]
        fn test_single_units() {
            assert_eq!(
                parse_duration("3h", ParseMode::Lenient),
                Some(DurationSpec::new(3, 0, 0))
            );
            assert_eq!(
                parse_duration("45m", ParseMode::Lenient),
                Some(DurationSpec::new(0, 45, 0))
            );
            assert_eq!(
                parse_duration("45s", ParseMode::Lenient),
                Some(DurationSpec::new(0, 0, 45))
            );
        }

        #[test]
        fn test_spaced_segments() {
            assert_eq!(
                parse_duration("1h 20m 5s", ParseMode::Lenient),
                Some(DurationSpec::new(1, 20, 5))
            );
            assert_eq!(
                parse_duration("1 h 20 m", ParseMode::Lenient),
                Some(DurationSpec::new(1, 20, 0))
            );
        }

        #[test]
        fn test_partial_combinations() {
            assert_eq!(
                parse_duration("1h5s", ParseMode::Lenient),
                Some(DurationSpec::new(1, 0, 5))
            );
            assert_eq!(
                parse_duration("20m5s", ParseMode::Lenient),
                Some(DurationSpec::new(0, 20, 5))
            );
        }

        #[test]
        fn test_surrounding_whitespace_is_trimmed() {
            assert_eq!(
                parse_duration("  10m  ", ParseMode::Lenient),
                Some(DurationSpec::new(0, 10, 0))
            );
        }

        #[test]
        fn test_all_zero_rejected() {
            assert_eq!(parse_duration("0h0m0s", ParseMode::Lenient), None);
            assert_eq!(parse_duration("0s", ParseMode::Lenient), None);
        }

        #[test]
        fn test_empty_rejected() {
            assert_eq!(parse_duration("", ParseMode::Lenient), None);
            assert_eq!(parse_duration("   ", ParseMode::Lenient), None);
        }

        #[test]
        fn test_over_limit_rejected() {
            assert_eq!(parse_duration("100000h", ParseMode::Lenient), None);
            assert_eq!(parse_duration("100000m", ParseMode::Lenient), None);
            assert_eq!(parse_duration("100000s", ParseMode::Lenient), None);
        }

        #[test]
        fn test_at_limit_accepted() {
            assert_eq!(
                parse_duration("99999h", ParseMode::Lenient),
                Some(DurationSpec::new(99_999, 0, 0))
            );
        }

        #[test]
        fn test_huge_numeral_rejected() {
            // Exceeds u32 long before the unit bound applies.
            assert_eq!(parse_duration("99999999999s", ParseMode::Lenient), None);
        }

        #[test]
        fn test_garbage_rejected() {
            assert_eq!(parse_duration("soon", ParseMode::Lenient), None);
            assert_eq!(parse_duration("h m s", ParseMode::Lenient), None);
        }

        #[test]
        fn test_lenient_tolerates_trailing_content() {
            assert_eq!(
                parse_duration("5minutes", ParseMode::Lenient),
                Some(DurationSpec::new(0, 5, 0))
            );
            assert_eq!(
                parse_duration("20m and more", ParseMode::Lenient),
                Some(DurationSpec::new(0, 20, 0))
            );
        }

        #[test]
        fn test_strict_rejects_trailing_content() {
            assert_eq!(parse_duration("5minutes", ParseMode::Strict), None);
            assert_eq!(parse_duration("20m and more", ParseMode::Strict), None);
        }

        #[test]
        fn test_strict_accepts_exact_input() {
            assert_eq!(
                parse_duration("1h20m5s", ParseMode::Strict),
                Some(DurationSpec::new(1, 20, 5))
            );
            assert_eq!(
                parse_duration(" 1h 20m ", ParseMode::Strict),
                Some(DurationSpec::new(1, 20, 0))
            );
        }

        #[test]
        fn test_out_of_order_units_lenient() {
            // "5s1h": the grammar expects h before s, so only the seconds
            // prefix... the hours segment never matches after seconds.
            assert_eq!(
                parse_duration("5s1h", ParseMode::Lenient),
                Some(DurationSpec::new(0, 0, 5))
            );
        }

        #[test]
        fn test_out_of_order_units_strict() {
            assert_eq!(parse_duration("5s1h", ParseMode::Strict), None);
        }
    }

    // ------------------------------------------------------------------------
    // parse_message Tests
    // ------------------------------------------------------------------------

    mod parse_message_tests {
        use super::*;

        #[test]
        fn test_message_after_colon() {
            assert_eq!(parse_message("20m: Pizza"), "Pizza");
        }

        #[test]
        fn test_no_colon_yields_empty() {
            assert_eq!(parse_message("20m"), "");
        }

        #[test]
        fn test_multiple_colons_kept_in_message() {
            assert_eq!(parse_message("10m: a:b"), "a:b");
        }

        #[test]
        fn test_message_is_trimmed() {
            assert_eq!(parse_message("5s:   spaced out   "), "spaced out");
        }

        #[test]
        fn test_empty_message_after_colon() {
            assert_eq!(parse_message("5s:"), "");
        }
    }

    // ------------------------------------------------------------------------
    // parse_request Tests
    // ------------------------------------------------------------------------

    mod parse_request_tests {
        use super::*;

        #[test]
        fn test_duration_and_message() {
            let (spec, message) = parse_request("1h20m: Pizza", ParseMode::Lenient).unwrap();
            assert_eq!(spec, DurationSpec::new(1, 20, 0));
            assert_eq!(message, "Pizza");
        }

        #[test]
        fn test_duration_only() {
            let (spec, message) = parse_request("45s", ParseMode::Lenient).unwrap();
            assert_eq!(spec, DurationSpec::new(0, 0, 45));
            assert_eq!(message, "");
        }

        #[test]
        fn test_strict_mode_composes_with_message() {
            // Strict applies to the duration head, not the message suffix.
            let (spec, message) = parse_request("20m: Pizza", ParseMode::Strict).unwrap();
            assert_eq!(spec, DurationSpec::new(0, 20, 0));
            assert_eq!(message, "Pizza");
        }

        #[test]
        fn test_strict_mode_rejects_bad_head() {
            assert_eq!(parse_request("20 minutes: Pizza", ParseMode::Strict), None);
        }

        #[test]
        fn test_bad_duration_rejected() {
            assert_eq!(parse_request("soon: Pizza", ParseMode::Lenient), None);
            assert_eq!(parse_request(": Pizza", ParseMode::Lenient), None);
        }

        #[test]
        fn test_message_with_colons() {
            let (_, message) = parse_request("10m: a:b", ParseMode::Lenient).unwrap();
            assert_eq!(message, "a:b");
        }
    }
}

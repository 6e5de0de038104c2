//! The `apply` combinator
//!
//! Parses a "first" and a "then" script once, then emits `times` rounds.
//! Round `k` holds first's edges followed by then's edges, every index
//! shifted by `k`.

use std::fmt;

use thiserror::Error;

use crate::compact::{compact, increment, CompactEdge};
use crate::config::Config;
use crate::error::ParseError;
use crate::parser::{self, Flowchart};

/// Which argument of `apply` a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    First,
    Then,
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::First => write!(f, "first script"),
            Script::Then => write!(f, "then script"),
        }
    }
}

/// Errors that can occur during `apply`
#[derive(Debug, Error)]
pub enum ApplyError {
    /// One of the scripts failed to parse
    #[error("{script}: {}", format_parse_errors(.errors))]
    Parse {
        script: Script,
        errors: Vec<ParseError>,
    },

    /// Shifting an index across all rounds would overflow
    #[error("step index {index} cannot be shifted by {shift}")]
    IndexOverflow { index: u64, shift: u64 },
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses scripts and combines them
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: Config,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parse(&self, script: &str) -> Result<Flowchart, Vec<ParseError>> {
        parser::parse(script)
    }

    /// Combine with the configured number of rounds
    pub fn apply(&self, first: &str, then: &str) -> Result<Vec<CompactEdge>, ApplyError> {
        self.apply_times(first, then, self.config.times)
    }

    /// Combine with an explicit number of rounds
    ///
    /// Both scripts are parsed before anything is produced; a failure in
    /// either returns no edges.
    pub fn apply_times(
        &self,
        first: &str,
        then: &str,
        times: usize,
    ) -> Result<Vec<CompactEdge>, ApplyError> {
        let first = self.parse(first).map_err(|errors| ApplyError::Parse {
            script: Script::First,
            errors,
        })?;
        let then = self.parse(then).map_err(|errors| ApplyError::Parse {
            script: Script::Then,
            errors,
        })?;

        let mut fi = compact(&first);
        let mut th = compact(&then);
        log::debug!(
            "apply: {} first edges, {} then edges, {} rounds",
            fi.len(),
            th.len(),
            times
        );

        if fi.is_empty() && th.is_empty() {
            return Ok(Vec::new());
        }
        check_headroom(fi.iter().chain(&th), times)?;

        let mut out = Vec::new();
        for round in 0..times {
            log::debug!("apply: round {}", round);
            out.extend(fi.iter().cloned());
            out.extend(th.iter().cloned());
            if round + 1 < times {
                fi = increment(&fi);
                th = increment(&th);
            }
        }
        Ok(out)
    }
}

/// The last round shifts by `times - 1`; every index must survive that.
fn check_headroom<'a>(
    edges: impl Iterator<Item = &'a CompactEdge>,
    times: usize,
) -> Result<(), ApplyError> {
    let Some(shift) = times.checked_sub(1) else {
        return Ok(());
    };
    let shift = u64::try_from(shift).unwrap_or(u64::MAX);
    match edges.map(CompactEdge::max_num).max() {
        Some(index) if index.checked_add(shift).is_none() => {
            Err(ApplyError::IndexOverflow { index, shift })
        }
        _ => Ok(()),
    }
}

/// Combine two scripts with a default interpreter
///
/// # Example
///
/// ```rust
/// let edges = flowscript::apply("flowchart\na0 --x--> b0:y\n", "flowchart\nc0 --p--> d0:q\n", 2).unwrap();
/// let text: Vec<_> = edges.iter().map(|e| e.to_string()).collect();
/// assert_eq!(text, ["a0 -> b0", "c0 -> d0", "a1 -> b1", "c1 -> d1"]);
/// ```
pub fn apply(first: &str, then: &str, times: usize) -> Result<Vec<CompactEdge>, ApplyError> {
    Interpreter::new().apply_times(first, then, times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIRST: &str = "flowchart\na0 --x--> b0:y\n";
    const THEN: &str = "flowchart\nc0 --p--> d0:q\n";

    fn strings(edges: &[CompactEdge]) -> Vec<String> {
        edges.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_apply_two_rounds() {
        let edges = apply(FIRST, THEN, 2).unwrap();
        assert_eq!(
            edges,
            vec![
                CompactEdge::from((("a", 0), ("b", 0))),
                CompactEdge::from((("c", 0), ("d", 0))),
                CompactEdge::from((("a", 1), ("b", 1))),
                CompactEdge::from((("c", 1), ("d", 1))),
            ]
        );
    }

    #[test]
    fn test_apply_zero_rounds() {
        assert!(apply(FIRST, THEN, 0).unwrap().is_empty());
    }

    #[test]
    fn test_apply_uses_configured_times() {
        let interpreter = Interpreter::with_config(Config::new().with_times(3));
        let edges = interpreter.apply(FIRST, THEN).unwrap();
        assert_eq!(
            strings(&edges),
            vec!["a0 -> b0", "c0 -> d0", "a1 -> b1", "c1 -> d1", "a2 -> b2", "c2 -> d2"]
        );
    }

    #[test]
    fn test_apply_default_is_one_round() {
        let edges = Interpreter::new().apply(FIRST, THEN).unwrap();
        assert_eq!(strings(&edges), vec!["a0 -> b0", "c0 -> d0"]);
    }

    #[test]
    fn test_apply_first_parse_error() {
        let err = apply("flowchart\na0 --x--> b0\n", THEN, 1).unwrap_err();
        match err {
            ApplyError::Parse { script, errors } => {
                assert_eq!(script, Script::First);
                assert!(!errors.is_empty());
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_then_parse_error_even_with_zero_rounds() {
        let err = apply(FIRST, "flowchart\nc --p--> d0:q\n", 0).unwrap_err();
        assert!(matches!(
            err,
            ApplyError::Parse {
                script: Script::Then,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_index_overflow() {
        let first = format!("flowchart\na{} --x--> b0:y\n", u64::MAX - 1);
        assert!(apply(&first, THEN, 2).is_ok());

        let err = apply(&first, THEN, 3).unwrap_err();
        match err {
            ApplyError::IndexOverflow { index, shift } => {
                assert_eq!(index, u64::MAX - 1);
                assert_eq!(shift, 2);
            }
            other => panic!("Expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_empty_scripts_skip_rounds() {
        // would never finish if every round were still walked
        let edges = apply("flowchart", "graph TD\n", usize::MAX).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_error_display_names_script() {
        let err = apply(FIRST, "nonsense ?", 1).unwrap_err();
        assert!(err.to_string().starts_with("then script: "));
    }
}

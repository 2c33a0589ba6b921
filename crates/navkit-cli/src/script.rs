//! Operation scripts.
//!
//! A script lists history operations one per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! go example.com
//! go https://example.com/docs
//! back
//! forward
//! reload
//! annotate
//! clear-annotation
//! loading on
//! disabled off
//! ```

use navkit_history::NavigationHistory;
use thiserror::Error;

/// One history operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Go(String),
    Back,
    Forward,
    Reload,
    Annotate,
    ClearAnnotation,
    Loading(bool),
    Disabled(bool),
}

impl Operation {
    /// Apply to `history`, returning whether anything changed.
    pub fn apply(&self, history: &mut NavigationHistory) -> bool {
        match self {
            Self::Go(url) => history.go(url),
            Self::Back => history.back(),
            Self::Forward => history.forward(),
            Self::Reload => history.reload(),
            Self::Annotate => history.set_annotation_mode(),
            Self::ClearAnnotation => history.clear_annotation_mode(),
            Self::Loading(on) => history.set_loading(*on),
            Self::Disabled(on) => history.set_disabled(*on),
        }
    }
}

/// An operation and the script line it came from (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub line: usize,
    pub operation: Operation,
}

/// Script parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown operation '{word}'")]
    UnknownOperation { line: usize, word: String },

    #[error("line {line}: '{operation}' needs an argument")]
    MissingArgument {
        line: usize,
        operation: &'static str,
    },

    #[error("line {line}: '{operation}' takes no argument")]
    UnexpectedArgument {
        line: usize,
        operation: &'static str,
    },

    #[error("line {line}: expected 'on' or 'off', found '{value}'")]
    InvalidSwitch { line: usize, value: String },
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let operation = parse_line(line, trimmed)?;
        steps.push(ScriptStep { line, operation });
    }
    Ok(steps)
}

fn parse_line(line: usize, text: &str) -> Result<Operation, ScriptError> {
    let (word, argument) = match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    };

    let operation = match word.to_ascii_lowercase().as_str() {
        "go" => {
            if argument.is_empty() {
                return Err(ScriptError::MissingArgument {
                    line,
                    operation: "go",
                });
            }
            Operation::Go(argument.to_string())
        }
        "back" => no_argument(line, "back", argument, Operation::Back)?,
        "forward" => no_argument(line, "forward", argument, Operation::Forward)?,
        "reload" => no_argument(line, "reload", argument, Operation::Reload)?,
        "annotate" => no_argument(line, "annotate", argument, Operation::Annotate)?,
        "clear-annotation" => no_argument(
            line,
            "clear-annotation",
            argument,
            Operation::ClearAnnotation,
        )?,
        "loading" => Operation::Loading(switch(line, "loading", argument)?),
        "disabled" => Operation::Disabled(switch(line, "disabled", argument)?),
        _ => {
            return Err(ScriptError::UnknownOperation {
                line,
                word: word.to_string(),
            });
        }
    };
    Ok(operation)
}

fn no_argument(
    line: usize,
    operation: &'static str,
    argument: &str,
    parsed: Operation,
) -> Result<Operation, ScriptError> {
    if argument.is_empty() {
        Ok(parsed)
    } else {
        Err(ScriptError::UnexpectedArgument { line, operation })
    }
}

fn switch(line: usize, operation: &'static str, argument: &str) -> Result<bool, ScriptError> {
    match argument.to_ascii_lowercase().as_str() {
        "" => Err(ScriptError::MissingArgument { line, operation }),
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(ScriptError::InvalidSwitch {
            line,
            value: argument.to_string(),
        }),
    }
}

/// Counts from a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Operations applied.
    pub applied: usize,
    /// Operations that changed the history.
    pub effective: usize,
}

/// Apply every step in order.
pub fn replay(steps: &[ScriptStep], history: &mut NavigationHistory) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();
    for step in steps {
        outcome.applied += 1;
        if step.operation.apply(history) {
            outcome.effective += 1;
        } else {
            tracing::debug!(line = step.line, operation = ?step.operation, "no change");
        }
    }
    outcome
}

//! Intent scripts: one command per line.
//!
//! ```text
//! # comments and blank lines are ignored
//! load
//! wait 1600
//! search Item 1
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::demo::{DemoIntent, ParseIntentError};

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Dispatch(DemoIntent),
    /// Pause the script before the next line.
    Wait(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Intent {
        line: usize,
        #[source]
        source: ParseIntentError,
    },

    #[error("line {line}: 'wait' needs a duration in milliseconds, got '{value}'")]
    Wait { line: usize, value: String },
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(value) = trimmed.strip_prefix("wait") {
            if value.is_empty() || value.starts_with(char::is_whitespace) {
                let value = value.trim();
                let millis = value.parse::<u64>().map_err(|_| ScriptError::Wait {
                    line,
                    value: value.to_string(),
                })?;
                steps.push(ScriptStep::Wait(Duration::from_millis(millis)));
                continue;
            }
        }

        // Only leading whitespace is insignificant; payloads keep the rest.
        let intent = raw
            .trim_start()
            .parse::<DemoIntent>()
            .map_err(|source| ScriptError::Intent { line, source })?;
        steps.push(ScriptStep::Dispatch(intent));
    }
    Ok(steps)
}

//! Intents for the demo screen.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::mvi::Intent;

/// Actions the demo screen can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoIntent {
    IncrementCount,
    IncrementCountFromNetwork,
    /// Show the current time as a toast that clears itself.
    ShowTime,

    LoadItems,
    LoadMoreItems,

    /// Debounced: schedules a `PerformSearch` once typing pauses.
    SearchTextChanged(String),
    PerformSearch(String),

    InputTextChanged(String),
    SubmitForm,

    ClearError,
    RetryLastOperation,

    Undo,
    Redo,
    SaveToHistory,

    /// Increment only while the counter is below its ceiling.
    ConditionalIncrement,

    StartChainOperation,
    ChainStep1,
    ChainStep2,
    ChainStep3,
}

impl Intent for DemoIntent {}

impl DemoIntent {
    /// Synchronous intents go straight to the reducer; the rest go
    /// through the middleware.
    pub fn is_synchronous(&self) -> bool {
        matches!(
            self,
            DemoIntent::IncrementCount
                | DemoIntent::ShowTime
                | DemoIntent::InputTextChanged(_)
                | DemoIntent::ClearError
                | DemoIntent::Undo
                | DemoIntent::Redo
                | DemoIntent::SaveToHistory
                | DemoIntent::SearchTextChanged(_)
        )
    }

    /// Script command vocabulary, in the form `intents` prints it.
    pub const COMMANDS: &'static [(&'static str, &'static str)] = &[
        ("increment", "increment the counter"),
        ("network", "increment after a simulated request that may fail"),
        ("time", "show the current time as a toast"),
        ("load", "load the first page of items"),
        ("more", "load the next page of items"),
        ("search <text>", "update the search box (debounced)"),
        ("perform-search <text>", "search immediately"),
        ("input <text>", "update the form input"),
        ("submit", "validate and submit the form"),
        ("clear-error", "dismiss the error message"),
        ("retry", "retry after an error"),
        ("undo", "step back in history"),
        ("redo", "step forward in history"),
        ("save", "save the current state to history"),
        ("conditional", "increment if below the limit"),
        ("chain", "start the three-step chain"),
        ("chain-1", "chain step 1"),
        ("chain-2", "chain step 2"),
        ("chain-3", "chain step 3"),
    ];
}

/// Failure to parse a script line into an intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntentError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("command '{command}' does not take an argument")]
    UnexpectedArgument { command: String },
}

impl FromStr for DemoIntent {
    type Err = ParseIntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, Some(rest)),
            None => (line.trim_end(), None),
        };
        if command.is_empty() {
            return Err(ParseIntentError::Empty);
        }

        // Text payloads keep inner whitespace; an absent payload is "".
        let text = || rest.unwrap_or("").to_string();
        let bare = |intent: DemoIntent| match rest.map(str::trim) {
            Some(arg) if !arg.is_empty() => Err(ParseIntentError::UnexpectedArgument {
                command: command.to_string(),
            }),
            _ => Ok(intent),
        };

        match command {
            "search" => Ok(DemoIntent::SearchTextChanged(text())),
            "perform-search" => Ok(DemoIntent::PerformSearch(text())),
            "input" => Ok(DemoIntent::InputTextChanged(text())),
            "increment" => bare(DemoIntent::IncrementCount),
            "network" => bare(DemoIntent::IncrementCountFromNetwork),
            "time" => bare(DemoIntent::ShowTime),
            "load" => bare(DemoIntent::LoadItems),
            "more" => bare(DemoIntent::LoadMoreItems),
            "submit" => bare(DemoIntent::SubmitForm),
            "clear-error" => bare(DemoIntent::ClearError),
            "retry" => bare(DemoIntent::RetryLastOperation),
            "undo" => bare(DemoIntent::Undo),
            "redo" => bare(DemoIntent::Redo),
            "save" => bare(DemoIntent::SaveToHistory),
            "conditional" => bare(DemoIntent::ConditionalIncrement),
            "chain" => bare(DemoIntent::StartChainOperation),
            "chain-1" => bare(DemoIntent::ChainStep1),
            "chain-2" => bare(DemoIntent::ChainStep2),
            "chain-3" => bare(DemoIntent::ChainStep3),
            other => Err(ParseIntentError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for DemoIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoIntent::IncrementCount => write!(f, "increment"),
            DemoIntent::IncrementCountFromNetwork => write!(f, "network"),
            DemoIntent::ShowTime => write!(f, "time"),
            DemoIntent::LoadItems => write!(f, "load"),
            DemoIntent::LoadMoreItems => write!(f, "more"),
            DemoIntent::SearchTextChanged(text) => write!(f, "search {text}"),
            DemoIntent::PerformSearch(text) => write!(f, "perform-search {text}"),
            DemoIntent::InputTextChanged(text) => write!(f, "input {text}"),
            DemoIntent::SubmitForm => write!(f, "submit"),
            DemoIntent::ClearError => write!(f, "clear-error"),
            DemoIntent::RetryLastOperation => write!(f, "retry"),
            DemoIntent::Undo => write!(f, "undo"),
            DemoIntent::Redo => write!(f, "redo"),
            DemoIntent::SaveToHistory => write!(f, "save"),
            DemoIntent::ConditionalIncrement => write!(f, "conditional"),
            DemoIntent::StartChainOperation => write!(f, "chain"),
            DemoIntent::ChainStep1 => write!(f, "chain-1"),
            DemoIntent::ChainStep2 => write!(f, "chain-2"),
            DemoIntent::ChainStep3 => write!(f, "chain-3"),
        }
    }
}

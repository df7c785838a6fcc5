//! Session state machine: one input buffer, one history, one current result.
//!
//! Every user interaction is an [`Action`] applied through [`Session::apply`].
//! The session is the only owner of its [`HistoryStore`]; nothing is global, so
//! two sessions never observe each other's records.

use crate::config::SessionConfig;
use crate::error::ScoreError;
use crate::history::HistoryStore;
use crate::scorer::Scorer;
use crate::types::AnalysisRecord;

/// A discrete user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Score the current input buffer.
    Analyze,
    /// Empty the input buffer.
    ClearInput,
    /// Discard the whole history and the current result.
    ResetHistory,
}

/// Whether a result is currently on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Shown,
}

/// What happened after applying an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Analyzed(AnalysisRecord),
    /// Analyze was requested with blank input; nothing changed.
    EmptyInputWarning,
    InputCleared,
    HistoryReset,
}

#[derive(Debug, Clone)]
pub struct Session {
    history: HistoryStore,
    input: String,
    current: Option<AnalysisRecord>,
    clear_input_after_analyze: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            history: HistoryStore::new(),
            input: String::new(),
            current: None,
            clear_input_after_analyze: config.clear_input_after_analyze,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::Shown
        } else {
            SessionState::Idle
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn current(&self) -> Option<&AnalysisRecord> {
        self.current.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append one line to the input buffer, newline-separated.
    pub fn push_input_line(&mut self, line: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
    }

    /// Apply one action. Only a scorer failure returns `Err`, and in that
    /// case the history and current result are left exactly as they were.
    pub fn apply(&mut self, action: Action, scorer: &dyn Scorer) -> Result<Outcome, ScoreError> {
        match action {
            Action::Analyze => self.analyze(scorer),
            Action::ClearInput => {
                self.input.clear();
                Ok(Outcome::InputCleared)
            }
            Action::ResetHistory => {
                let dropped = self.history.len();
                self.history.clear();
                self.current = None;
                tracing::info!(dropped, "history reset");
                Ok(Outcome::HistoryReset)
            }
        }
    }

    /// Replace the input buffer with `text` and analyze it.
    pub fn analyze_text(&mut self, text: &str, scorer: &dyn Scorer) -> Result<Outcome, ScoreError> {
        self.set_input(text);
        self.apply(Action::Analyze, scorer)
    }

    fn analyze(&mut self, scorer: &dyn Scorer) -> Result<Outcome, ScoreError> {
        if self.input.trim().is_empty() {
            tracing::warn!("analyze requested with empty input");
            return Ok(Outcome::EmptyInputWarning);
        }

        let score = match scorer.score(&self.input) {
            Ok(score) => score,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("analyze requested with empty input");
                return Ok(Outcome::EmptyInputWarning);
            }
            Err(e) => {
                tracing::error!(scorer = scorer.name(), "{e}");
                return Err(e);
            }
        };

        let record = AnalysisRecord::new(self.input.clone(), score);
        tracing::debug!(
            scorer = scorer.name(),
            label = record.label().name(),
            compound = score.compound,
            "analyzed text"
        );
        self.history.append(record.clone());
        self.current = Some(record.clone());
        if self.clear_input_after_analyze {
            self.input.clear();
        }
        Ok(Outcome::Analyzed(record))
    }
}

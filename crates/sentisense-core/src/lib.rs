pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod lexicon;
pub mod scorer;
pub mod session;
pub mod types;

pub use classifier::classify;
pub use config::Config;
pub use error::ScoreError;
pub use history::HistoryStore;
pub use lexicon::Lexicon;
pub use scorer::{LexiconScorer, Scorer};
pub use session::{Action, Outcome, Session, SessionState};
pub use types::*;

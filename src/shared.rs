use thiserror::Error;

use crate::scoring::ScoreError;
use crate::stats::StatsError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Scoring error: {0}")]
    Score(#[from] ScoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StatsError),
}

impl AppError {
    /// Storage failures end the session; a bad scan only aborts that scan.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }

    /// Message shown to the player in place of a scan result
    pub fn user_message(&self) -> String {
        match self {
            AppError::Score(ScoreError::InvalidCharacter { character, .. }) => format!(
                "Sorry, that barcode could not be read (unsupported character '{}'). Try another scan.",
                character
            ),
            AppError::Storage(StatsError::StorageClosed) => {
                "Your stats are no longer available. Please restart the game.".to_string()
            }
            AppError::Storage(err) => format!("Your stats could not be saved: {}", err),
        }
    }
}

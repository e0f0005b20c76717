use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Unsupported character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

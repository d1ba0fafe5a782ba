use thiserror::Error;

/// Errors that can occur while preparing a roll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    /// Face count or die count was never chosen.
    #[error("You must select both parameters before you roll")]
    MissingParameters,
    /// Face count is not one of the offered options.
    #[error("Unsupported face count: {0}")]
    InvalidFaces(u32),
    /// Die count is outside 1..=15.
    #[error("Die count must be between 1 and 15, got {0}")]
    InvalidDice(u32),
}

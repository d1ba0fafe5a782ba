//! Dice rolling layer
//!
//! This module holds everything about dice that does not depend on the UI:
//! - Drawing values and driving roll sessions
//! - The roll history log and its sum annotations
//! - Domain errors

pub mod engine;
pub mod error;
pub mod history;

pub use engine::{RollParams, RollResults, RollSession, Selection};
pub use error::RollError;
pub use history::RollLog;

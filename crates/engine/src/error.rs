//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] returned when a free-text amount cannot be read.
//! - [`MissingAmount`] returned when a quick entry carries no number at all.
//! - [`MissingCategory`] returned when a quick entry is only a number.
//! - [`UnknownCategory`] returned when no alias matches, not even loosely.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`MissingAmount`]: EngineError::MissingAmount
//!  [`MissingCategory`]: EngineError::MissingCategory
//!  [`UnknownCategory`]: EngineError::UnknownCategory
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount not found in the entry")]
    MissingAmount,
    #[error("Category not found in the entry")]
    MissingCategory,
    #[error("\"{0}\" category not found!")]
    UnknownCategory(String),
}

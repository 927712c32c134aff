//! Error types for the Delve system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Errors are reserved for configuration and I/O problems. Game-rule
//! violations (attacking an ally, a full backpack) are ordinary outcomes
//! returned by the turn resolution layer, never errors.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Delve operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig {
            field,
            reason: reason.into(),
        })
    }

    /// Creates an unknown content error.
    #[must_use]
    pub fn unknown_content(table: &'static str, id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownContent {
            table,
            id: id.into(),
        })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A configuration value is out of range or inconsistent.
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A content table has no entry with the requested id.
    #[error("unknown {table} entry: {id}")]
    UnknownContent {
        /// The table that was searched.
        table: &'static str,
        /// The id that was not found.
        id: String,
    },

    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Encoding or decoding a snapshot failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Subsystem or operation name.
    pub source: Option<String>,
    /// Floor number, when the error relates to a level.
    pub floor: Option<u32>,
    /// Chain of operations leading to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source operation.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the floor number.
    #[must_use]
    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(floor) = self.floor {
                write!(f, " on floor {floor}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

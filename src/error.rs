//! Error types.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. The variants are
//! programmer errors (unknown or duplicate control names, malformed layouts);
//! device reads themselves never fail and fall back to released / `0.0`.

use std::fmt;
use thiserror::Error;

/// Which named collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Axis,
    Button,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Axis => f.write_str("axis"),
            ControlKind::Button => f.write_str("button"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    /// A value was requested for a control that was never created.
    #[error("no {kind} named \"{name}\"")]
    NotFound { kind: ControlKind, name: String },

    /// Strict creation of a name that is already registered.
    #[error("{kind} name \"{name}\" already in use")]
    AlreadyExists { kind: ControlKind, name: String },

    /// A layout entry failed validation.
    #[error("invalid influence on \"{control}\": {reason}")]
    InvalidInfluence { control: String, reason: String },

    #[error("JSON layout error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML layout: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to write TOML layout: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InputError>;

impl InputError {
    pub(crate) fn not_found(kind: ControlKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn already_exists(kind: ControlKind, name: &str) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid(control: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInfluence {
            control: control.to_string(),
            reason: reason.into(),
        }
    }
}

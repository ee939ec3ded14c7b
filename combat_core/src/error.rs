//! Engine error types
//!
//! Only caller misuse and invalid configuration are errors. Conditions that
//! can happen during a normal fight (no potion left, unknown effect name from
//! a floor script, an exhausted shield) are reported as failed events instead.

use crate::config::ConfigError;
use crate::status::EffectKind;
use thiserror::Error;

/// How an error should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The caller passed input the engine never accepts (e.g. a negative duration)
    CallerMisuse,
    /// Configuration data is invalid and must be fixed before combat starts
    Configuration,
    /// Combat can continue; the request is turned into a no-op event
    Recoverable,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CallerMisuse => "caller_misuse",
            Self::Configuration => "configuration",
            Self::Recoverable => "recoverable",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors raised at the engine API boundary
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid base duration {duration} for {kind}: durations must be non-negative")]
    InvalidDuration { kind: EffectKind, duration: i32 },
    #[error(
        "invalid intent weights {aggressive}/{defensive}/{unpredictable}: every weight must be positive"
    )]
    InvalidWeights {
        aggressive: u32,
        defensive: u32,
        unpredictable: u32,
    },
    #[error("unknown status effect '{0}'")]
    UnknownEffect(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::InvalidDuration { .. } => ErrorSeverity::CallerMisuse,
            EngineError::InvalidWeights { .. } | EngineError::Config(_) => {
                ErrorSeverity::Configuration
            }
            EngineError::UnknownEffect(_) => ErrorSeverity::Recoverable,
        }
    }
}

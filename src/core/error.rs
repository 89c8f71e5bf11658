//! Error taxonomy for the thermal field
//!
//! Accessors never fail. Only construction, backend selection and
//! snapshot decoding can produce a `ThermalError`.

use thiserror::Error;

use crate::backend::BackendKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermalError {
    /// Zero-sized grid, or a cell count that does not fit in memory.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// One backend could not be probed or could not build a grid.
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: BackendKind, reason: String },

    /// The facade could not produce a grid on any backend.
    #[error("thermal field initialization failed: {0}")]
    Initialization(#[source] Box<ThermalError>),

    #[error("malformed snapshot: {reason}")]
    MalformedSnapshot { reason: String },

    #[error("invalid engine config: {reason}")]
    InvalidConfig { reason: String },
}

impl ThermalError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ThermalError::MalformedSnapshot { reason: reason.into() }
    }

    pub(crate) fn initialization(cause: ThermalError) -> Self {
        ThermalError::Initialization(Box::new(cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_wraps_cause_in_message() {
        let err = ThermalError::initialization(ThermalError::InvalidDimension { width: 0, height: 4 });
        assert_eq!(
            err.to_string(),
            "thermal field initialization failed: invalid grid dimensions 0x4"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn backend_unavailable_names_backend() {
        let err = ThermalError::BackendUnavailable {
            backend: BackendKind::Optimized,
            reason: "disabled at build time".to_string(),
        };
        assert_eq!(err.to_string(), "optimized backend unavailable: disabled at build time");
    }
}

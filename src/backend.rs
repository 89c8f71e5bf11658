//! Backend selection
//!
//! A backend is a factory for `ThermalGrid`s. The selector picks one once,
//! from configuration plus a single probe, and only ever moves forward:
//!
//! ```text
//! Uninitialized ──probe ok──▶ Optimized ──construct fails──▶ Portable ──fails──▶ Failed
//!       └──────────probe fails / preference=portable─────────▶ Portable
//! ```
//!
//! There is no per-call retry of the optimized path.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ThermalError;
use crate::grid::{FastGrid, PortableGrid, ThermalGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Optimized,
    Portable,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Optimized => "optimized",
            BackendKind::Portable => "portable",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backend the host asks for. `Auto` tries optimized first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    #[default]
    Auto,
    Optimized,
    Portable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendState {
    Uninitialized,
    Optimized,
    Portable,
    Failed,
}

impl BackendState {
    pub fn kind(self) -> Option<BackendKind> {
        match self {
            BackendState::Optimized => Some(BackendKind::Optimized),
            BackendState::Portable => Some(BackendKind::Portable),
            BackendState::Uninitialized | BackendState::Failed => None,
        }
    }
}

/// Capability interface every backend implements.
pub trait ThermalBackend {
    fn kind(&self) -> BackendKind;

    /// Cheap availability check, run once at selection time.
    fn probe(&self) -> Result<(), ThermalError>;

    fn construct(
        &self,
        width: u32,
        height: u32,
        ambient_temperature: f64,
    ) -> Result<Box<dyn ThermalGrid>, ThermalError>;
}

/// Row kernel over SoA buffers. Available when built with `fast-kernel`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptimizedBackend;

impl ThermalBackend for OptimizedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Optimized
    }

    fn probe(&self) -> Result<(), ThermalError> {
        if cfg!(feature = "fast-kernel") {
            Ok(())
        } else {
            Err(ThermalError::BackendUnavailable {
                backend: BackendKind::Optimized,
                reason: "built without the fast-kernel feature".to_string(),
            })
        }
    }

    fn construct(
        &self,
        width: u32,
        height: u32,
        ambient_temperature: f64,
    ) -> Result<Box<dyn ThermalGrid>, ThermalError> {
        self.probe()?;
        Ok(Box::new(FastGrid::new(width, height, ambient_temperature)?))
    }
}

/// Per-cell reference kernel. Always available.
#[derive(Clone, Copy, Debug, Default)]
pub struct PortableBackend;

impl ThermalBackend for PortableBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Portable
    }

    fn probe(&self) -> Result<(), ThermalError> {
        Ok(())
    }

    fn construct(
        &self,
        width: u32,
        height: u32,
        ambient_temperature: f64,
    ) -> Result<Box<dyn ThermalGrid>, ThermalError> {
        Ok(Box::new(PortableGrid::new(width, height, ambient_temperature)?))
    }
}

pub struct BackendSelector {
    preference: BackendPreference,
    optimized: Box<dyn ThermalBackend>,
    portable: Box<dyn ThermalBackend>,
    state: BackendState,
}

impl BackendSelector {
    pub fn new(preference: BackendPreference) -> Self {
        Self::with_backends(preference, Box::new(OptimizedBackend), Box::new(PortableBackend))
    }

    /// Selector over caller-supplied backends (hosts with their own kernel,
    /// or tests that need a failing one).
    pub fn with_backends(
        preference: BackendPreference,
        optimized: Box<dyn ThermalBackend>,
        portable: Box<dyn ThermalBackend>,
    ) -> Self {
        Self {
            preference,
            optimized,
            portable,
            state: BackendState::Uninitialized,
        }
    }

    pub fn state(&self) -> BackendState {
        self.state
    }

    pub fn preference(&self) -> BackendPreference {
        self.preference
    }

    /// Resolve `Uninitialized` into a concrete backend. Later calls return
    /// the settled state unchanged.
    pub fn select_backend(&mut self) -> BackendState {
        if self.state != BackendState::Uninitialized {
            return self.state;
        }

        if self.preference != BackendPreference::Portable {
            match self.optimized.probe() {
                Ok(()) => {
                    info!("thermal backend: {}", self.optimized.kind());
                    self.state = BackendState::Optimized;
                    return self.state;
                }
                Err(err) => warn!("{err}; falling back to portable backend"),
            }
        }

        self.state = match self.portable.probe() {
            Ok(()) => {
                info!("thermal backend: {}", self.portable.kind());
                BackendState::Portable
            }
            Err(err) => {
                log::error!("{err}; no thermal backend available");
                BackendState::Failed
            }
        };
        self.state
    }

    /// Build a grid on the active backend, falling back to portable once if
    /// the optimized backend fails.
    ///
    /// Dimension errors are the caller's fault and never trigger fallback.
    pub fn construct(
        &mut self,
        width: u32,
        height: u32,
        ambient_temperature: f64,
    ) -> Result<Box<dyn ThermalGrid>, ThermalError> {
        match self.select_backend() {
            BackendState::Optimized => {
                match self.optimized.construct(width, height, ambient_temperature) {
                    Ok(grid) => Ok(grid),
                    Err(err @ ThermalError::InvalidDimension { .. }) => Err(err),
                    Err(err) => {
                        warn!("optimized construction failed ({err}); switching to portable backend");
                        self.state = BackendState::Portable;
                        self.construct_portable(width, height, ambient_temperature)
                    }
                }
            }
            BackendState::Portable => self.construct_portable(width, height, ambient_temperature),
            BackendState::Uninitialized | BackendState::Failed => {
                Err(ThermalError::BackendUnavailable {
                    backend: BackendKind::Portable,
                    reason: "no backend left after earlier failures".to_string(),
                })
            }
        }
    }

    fn construct_portable(
        &mut self,
        width: u32,
        height: u32,
        ambient_temperature: f64,
    ) -> Result<Box<dyn ThermalGrid>, ThermalError> {
        match self.portable.construct(width, height, ambient_temperature) {
            Ok(grid) => {
                debug!("portable grid {width}x{height} constructed");
                Ok(grid)
            }
            Err(err @ ThermalError::InvalidDimension { .. }) => Err(err),
            Err(err) => {
                log::error!("portable construction failed: {err}");
                self.state = BackendState::Failed;
                Err(err)
            }
        }
    }
}

impl fmt::Debug for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSelector")
            .field("preference", &self.preference)
            .field("state", &self.state)
            .finish()
    }
}

/// Backends that refuse to work, for exercising the fallback path.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub(crate) struct BrokenBackend {
        pub(crate) kind: BackendKind,
        pub(crate) probe_ok: bool,
    }

    impl ThermalBackend for BrokenBackend {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn probe(&self) -> Result<(), ThermalError> {
            if self.probe_ok {
                Ok(())
            } else {
                Err(ThermalError::BackendUnavailable {
                    backend: self.kind,
                    reason: "probe failed".to_string(),
                })
            }
        }

        fn construct(&self, _: u32, _: u32, _: f64) -> Result<Box<dyn ThermalGrid>, ThermalError> {
            Err(ThermalError::BackendUnavailable {
                backend: self.kind,
                reason: "construct failed".to_string(),
            })
        }
    }
}

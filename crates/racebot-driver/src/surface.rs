//! Track surface flag, the one-shot parameter latch and the store port.
//!
//! The simulator reports whether the track is asphalt or dirt. The first
//! recognized report switches the parameter set; every later report is
//! ignored for the rest of the run. A [`SurfaceStore`] lets an outside
//! collaborator remember the surface across separate runs (practice, then
//! qualifying, then race).

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use racebot_errors::SurfaceError;
use serde::{Deserialize, Serialize};

/// Track surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SurfaceType {
    /// Asphalt
    Road,
    /// Dirt
    Dirt,
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceType::Road => write!(f, "ROAD"),
            SurfaceType::Dirt => write!(f, "DIRT"),
        }
    }
}

impl FromStr for SurfaceType {
    type Err = SurfaceError;

    /// Parse the simulator's flag. Surrounding whitespace is ignored, case is
    /// not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ROAD" => Ok(SurfaceType::Road),
            "DIRT" => Ok(SurfaceType::Dirt),
            other => Err(SurfaceError::unrecognized(other)),
        }
    }
}

/// One-shot surface switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceLatch {
    applied: Option<SurfaceType>,
}

impl SurfaceLatch {
    /// Surface applied so far, if any.
    pub fn applied(&self) -> Option<SurfaceType> {
        self.applied
    }

    /// Latch `surface` unless a surface is already latched.
    ///
    /// Returns `true` when this call set the latch.
    pub fn apply(&mut self, surface: SurfaceType) -> bool {
        if self.applied.is_some() {
            return false;
        }
        self.applied = Some(surface);
        true
    }

    /// Feed a raw flag from the simulator.
    ///
    /// Once latched, every flag is ignored (`Ok(None)`).
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unrecognized`] for anything but ROAD or DIRT
    /// while the latch is still open.
    pub fn observe(&mut self, flag: &str) -> Result<Option<SurfaceType>, SurfaceError> {
        if self.applied.is_some() {
            return Ok(None);
        }
        let surface: SurfaceType = flag.parse()?;
        self.applied = Some(surface);
        Ok(Some(surface))
    }
}

/// Session type, deciding whether the stored surface is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStage {
    /// Practice session where the surface is discovered
    Warmup,
    /// Qualifying session
    Qualifying,
    /// Race session
    Race,
    /// Stage not reported
    #[default]
    Unknown,
}

impl RaceStage {
    /// Whether the driver should start from the stored surface.
    pub fn restores_surface(self) -> bool {
        !matches!(self, RaceStage::Warmup)
    }
}

/// Read/write point for the last known surface.
pub trait SurfaceStore: Send {
    /// Last stored surface, `None` when nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::LoadFailed`] when the backing medium cannot be
    /// read.
    fn load(&mut self) -> Result<Option<SurfaceType>, SurfaceError>;

    /// Remember `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::StoreFailed`] when the backing medium cannot
    /// be written.
    fn store(&mut self, surface: SurfaceType) -> Result<(), SurfaceError>;
}

/// In-memory store. Clones share the same slot, so a test or a session
/// runner can keep a handle and inspect what the driver wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySurfaceStore {
    slot: Arc<Mutex<Option<SurfaceType>>>,
}

impl MemorySurfaceStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `surface`.
    pub fn with_surface(surface: SurfaceType) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(surface))),
        }
    }

    /// Current content.
    pub fn get(&self) -> Option<SurfaceType> {
        *self.slot.lock()
    }
}

impl SurfaceStore for MemorySurfaceStore {
    fn load(&mut self) -> Result<Option<SurfaceType>, SurfaceError> {
        Ok(self.get())
    }

    fn store(&mut self, surface: SurfaceType) -> Result<(), SurfaceError> {
        *self.slot.lock() = Some(surface);
        Ok(())
    }
}

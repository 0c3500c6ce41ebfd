//! Run statistics: ticks per mode, brake events and the end-of-run report.

use racebot_abs::AbsKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::policy::DrivingMode;
use crate::selector::Transition;
use crate::surface::SurfaceType;

/// Default bound on recorded brake events, roughly 20 minutes at 50 Hz.
pub const DEFAULT_BRAKE_TRACE_CAPACITY: usize = 65_536;

/// Ticks spent in each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeCounts {
    /// Ticks in InsideTrack
    pub inside_track: u64,
    /// Ticks in OutOfTrack
    pub out_of_track: u64,
    /// Ticks in Stuck
    pub stuck: u64,
}

impl ModeCounts {
    /// Count one tick in `mode`.
    pub fn record(&mut self, mode: DrivingMode) {
        let slot = match mode {
            DrivingMode::InsideTrack => &mut self.inside_track,
            DrivingMode::OutOfTrack => &mut self.out_of_track,
            DrivingMode::Stuck => &mut self.stuck,
        };
        *slot = slot.saturating_add(1);
    }

    /// Ticks counted for `mode`.
    pub fn get(&self, mode: DrivingMode) -> u64 {
        match mode {
            DrivingMode::InsideTrack => self.inside_track,
            DrivingMode::OutOfTrack => self.out_of_track,
            DrivingMode::Stuck => self.stuck,
        }
    }

    /// Sum over all modes.
    pub fn total(&self) -> u64 {
        self.inside_track
            .saturating_add(self.out_of_track)
            .saturating_add(self.stuck)
    }
}

/// One tick during which the ABS saw a brake request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakeEvent {
    /// Tick index
    pub tick: u64,
    /// Slip error measured by the controller, absent when slip was not
    /// measurable
    pub slip_error: Option<f32>,
    /// Brake requested by the policy
    pub unfiltered: f32,
    /// Brake actually sent
    pub filtered: f32,
}

/// Bounded log of brake events. Events past the capacity are counted but
/// not stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrakeTrace {
    events: Vec<BrakeEvent>,
    capacity: usize,
    dropped: u64,
}

impl BrakeTrace {
    /// Empty trace holding at most `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Append an event, or count it as dropped once full.
    pub fn push(&mut self, event: BrakeEvent) {
        if self.events.len() < self.capacity {
            self.events.push(event);
            return;
        }
        if self.dropped == 0 {
            warn!(
                capacity = self.capacity,
                tick = event.tick,
                "Brake trace full, further events are dropped"
            );
        }
        self.dropped = self.dropped.saturating_add(1);
    }

    /// Recorded events in tick order.
    pub fn events(&self) -> &[BrakeEvent] {
        &self.events
    }

    /// Events that did not fit.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Maximum number of stored events.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Everything the facade accumulates over a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStats {
    /// Ticks processed, across restarts
    pub ticks: u64,
    /// Ticks per mode
    pub modes: ModeCounts,
    /// Mode changes in order
    pub transitions: Vec<Transition>,
    /// ABS brake events
    pub brakes: BrakeTrace,
    /// Distance raced reported by the last frame
    pub distance_raced: f32,
    /// Damage reported by the last frame
    pub damage: f32,
}

impl RunStats {
    /// Empty statistics with the given brake trace bound.
    pub fn new(brake_trace_capacity: usize) -> Self {
        Self {
            brakes: BrakeTrace::with_capacity(brake_trace_capacity),
            ..Self::default()
        }
    }

    /// Append a mode change. The log shares the brake trace bound.
    pub fn record_transition(&mut self, transition: Transition) {
        if self.transitions.len() < self.brakes.capacity() {
            self.transitions.push(transition);
        }
    }
}

/// Serializable end-of-run summary handed to the logging collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Ticks processed
    pub total_ticks: u64,
    /// Ticks per mode
    pub mode_ticks: ModeCounts,
    /// Mode changes in order
    pub transitions: Vec<Transition>,
    /// ABS brake events (empty without ABS)
    pub brake_events: Vec<BrakeEvent>,
    /// Brake events beyond the trace capacity
    pub dropped_brake_events: u64,
    /// Final distance raced
    pub distance_raced: f32,
    /// Final damage
    pub damage: f32,
    /// Surface latched during the run, if any
    pub surface: Option<SurfaceType>,
    /// ABS variant in use
    pub abs: AbsKind,
}

impl RunReport {
    /// Build the report from accumulated statistics.
    pub fn from_stats(stats: &RunStats, surface: Option<SurfaceType>, abs: AbsKind) -> Self {
        Self {
            total_ticks: stats.ticks,
            mode_ticks: stats.modes,
            transitions: stats.transitions.clone(),
            brake_events: stats.brakes.events().to_vec(),
            dropped_brake_events: stats.brakes.dropped(),
            distance_raced: stats.distance_raced,
            damage: stats.damage,
            surface,
            abs,
        }
    }

    /// Render as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

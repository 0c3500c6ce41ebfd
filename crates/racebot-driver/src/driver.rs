//! The driver facade.
//!
//! Owns the mode selector, the ABS controller, the parameters in force and
//! the run statistics. One [`Driver::tick`] call per simulator tick turns a
//! [`SensorFrame`] into an [`ActuatorCommand`].

use core::fmt;

use racebot_abs::{AbsController, AbsInput};
use racebot_errors::{ErrorSeverity, RacebotError, SurfaceError};
use tracing::{debug, error, info, warn};

use crate::command::ActuatorCommand;
use crate::config::DriverConfig;
use crate::frame::SensorFrame;
use crate::params::ParameterSet;
use crate::policy::{DrivingMode, PolicyContext};
use crate::selector::ModeSelector;
use crate::stats::{BrakeEvent, RunReport, RunStats};
use crate::surface::{RaceStage, SurfaceLatch, SurfaceStore, SurfaceType};

/// Reactive driving agent.
pub struct Driver {
    config: DriverConfig,
    params: ParameterSet,
    selector: ModeSelector,
    abs: AbsController,
    latch: SurfaceLatch,
    store: Option<Box<dyn SurfaceStore>>,
    stats: RunStats,
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("mode", &self.selector.mode())
            .field("abs", &self.abs.kind())
            .field("surface", &self.latch.applied())
            .field("ticks", &self.stats.ticks)
            .field("has_store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

impl Driver {
    /// Build a driver from a validated configuration. Starts in InsideTrack
    /// with the baseline parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Validation`] if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use racebot_driver::prelude::*;
    ///
    /// let mut driver = Driver::new(DriverConfig::default())?;
    /// let frame = SensorFrame::builder().speed_x(20.0).track([50.0; 19]).build();
    /// let cmd = driver.tick(&frame);
    /// assert!(cmd.is_valid());
    /// # Ok::<(), racebot_errors::RacebotError>(())
    /// ```
    pub fn new(config: DriverConfig) -> Result<Self, RacebotError> {
        config.validate()?;
        let abs = config.abs.build();
        let params = config.baseline;
        let stats = RunStats::new(config.brake_trace_capacity);
        info!(abs = %abs.kind(), "Driver created");
        Ok(Self {
            config,
            params,
            selector: ModeSelector::new(),
            abs,
            latch: SurfaceLatch::default(),
            store: None,
            stats,
        })
    }

    /// Build a driver wired to a surface store.
    ///
    /// For every stage but warmup the last stored surface is restored
    /// immediately. A failing store is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Validation`] if the configuration is invalid.
    pub fn with_store(
        config: DriverConfig,
        stage: RaceStage,
        mut store: Box<dyn SurfaceStore>,
    ) -> Result<Self, RacebotError> {
        let mut driver = Self::new(config)?;
        if stage.restores_surface() {
            match store.load() {
                Ok(Some(surface)) => {
                    info!(%surface, ?stage, "Restored track surface");
                    driver.switch_surface(surface);
                }
                Ok(None) => debug!(?stage, "No stored track surface"),
                Err(e) => report_surface_error(&e, "Failed to load track surface"),
            }
        }
        driver.store = Some(store);
        Ok(driver)
    }

    /// Process one tick.
    ///
    /// Runs the mode selector, the active policy and, in InsideTrack, the
    /// ABS. The returned command is always within range.
    pub fn tick(&mut self, frame: &SensorFrame) -> ActuatorCommand {
        let tick = self.stats.ticks;

        if let Some(transition) = self.selector.update(frame, &self.params.stuck, tick) {
            debug!(
                from = %transition.from,
                to = %transition.to,
                tick,
                "Driving mode changed"
            );
            if transition.from == DrivingMode::InsideTrack {
                self.abs.reset();
            }
            self.stats.record_transition(transition);
        }

        let mode = self.selector.mode();
        let ctx = PolicyContext {
            params: &self.params,
            accel: &self.config.accel_strategy,
            stuck_reference: self.selector.stuck_reference(),
        };
        let mut command = mode.drive(frame, &ctx);

        if mode == DrivingMode::InsideTrack {
            let unfiltered = command.brake;
            let out = self
                .abs
                .apply(&AbsInput::new(frame.speed_x, frame.wheel_spin, unfiltered));
            command.brake = out.brake;
            if self.abs.is_enabled() && unfiltered > 0.0 {
                self.stats.brakes.push(BrakeEvent {
                    tick,
                    slip_error: out.slip_error,
                    unfiltered,
                    filtered: out.brake,
                });
            }
        }

        self.stats.ticks = tick.saturating_add(1);
        self.stats.modes.record(mode);
        self.stats.distance_raced = frame.dist_raced;
        self.stats.damage = frame.damage;

        command.clamped()
    }

    /// Feed the simulator's surface flag.
    ///
    /// The first recognized flag switches to the matching parameter set and
    /// is written to the store. Anything else is ignored. Returns the
    /// surface applied by this call.
    pub fn observe_surface(&mut self, flag: &str) -> Option<SurfaceType> {
        match self.latch.observe(flag) {
            Ok(Some(surface)) => {
                info!(%surface, "Track surface recognized");
                self.params = *self.config.preset(Some(surface));
                if let Some(store) = self.store.as_mut()
                    && let Err(e) = store.store(surface)
                {
                    report_surface_error(&e, "Failed to store track surface");
                }
                Some(surface)
            }
            Ok(None) => None,
            Err(e) => {
                report_surface_error(&e, "Ignoring unrecognized surface flag");
                None
            }
        }
    }

    fn switch_surface(&mut self, surface: SurfaceType) {
        if self.latch.apply(surface) {
            self.params = *self.config.preset(Some(surface));
        }
    }

    /// Race restart: selector and ABS memory are cleared, statistics and the
    /// surface latch are kept.
    pub fn restart(&mut self) {
        info!(tick = self.stats.ticks, "Driver restart");
        self.selector.reset();
        self.abs.reset();
    }

    /// End the run and hand over the report.
    pub fn shutdown(self) -> RunReport {
        let report = self.report();
        info!(
            ticks = report.total_ticks,
            inside_track = report.mode_ticks.inside_track,
            out_of_track = report.mode_ticks.out_of_track,
            stuck = report.mode_ticks.stuck,
            brake_events = report.brake_events.len(),
            distance = report.distance_raced,
            "Driver shutdown"
        );
        report
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport::from_stats(&self.stats, self.latch.applied(), self.abs.kind())
    }

    /// Active mode.
    pub fn mode(&self) -> DrivingMode {
        self.selector.mode()
    }

    /// Parameters in force.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Latched surface.
    pub fn surface(&self) -> Option<SurfaceType> {
        self.latch.applied()
    }

    /// Mode selector state.
    pub fn selector(&self) -> &ModeSelector {
        &self.selector
    }

    /// ABS controller state.
    pub fn abs(&self) -> &AbsController {
        &self.abs
    }

    /// Accumulated statistics.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Configuration the driver was built with.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}

/// Log a surface error at the level its severity calls for.
fn report_surface_error(e: &SurfaceError, message: &str) {
    match e.severity() {
        ErrorSeverity::Info => debug!(error = %e, "{message}"),
        ErrorSeverity::Warning => warn!(error = %e, "{message}"),
        ErrorSeverity::Error => error!(error = %e, "{message}"),
    }
}

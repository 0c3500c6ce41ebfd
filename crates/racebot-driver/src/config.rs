//! Driver configuration: parameter bundles, ABS choice and throttle
//! strategy, loadable from JSON or YAML.

use std::path::Path;

use racebot_abs::{AbsController, NpidGains, NpidState, PidGains, PidState, ThresholdState};
use racebot_errors::{RacebotError, Result, ValidationError};
use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;
use crate::policy::AccelStrategy;
use crate::stats::DEFAULT_BRAKE_TRACE_CAPACITY;
use crate::surface::SurfaceType;

/// ABS variant and its tunables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbsConfig {
    /// No ABS
    #[default]
    Disabled,
    /// Threshold ABS
    Threshold(ThresholdState),
    /// Linear PID ABS
    Pid(PidGains),
    /// Nonlinear PID ABS
    Npid(NpidGains),
}

impl AbsConfig {
    /// Instantiate the controller with cleared memory.
    pub fn build(&self) -> AbsController {
        match *self {
            AbsConfig::Disabled => AbsController::Disabled,
            AbsConfig::Threshold(state) => AbsController::Threshold(state),
            AbsConfig::Pid(gains) => AbsController::Pid(PidState::new(gains)),
            AbsConfig::Npid(gains) => AbsController::Npid(NpidState::new(gains)),
        }
    }
}

/// Complete driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Parameters in force until a surface is recognized
    pub baseline: ParameterSet,
    /// Parameters for asphalt
    pub road: ParameterSet,
    /// Parameters for dirt
    pub dirt: ParameterSet,
    /// ABS variant
    pub abs: AbsConfig,
    /// InsideTrack throttle strategy
    pub accel_strategy: AccelStrategy,
    /// Maximum number of brake events kept for the run report
    pub brake_trace_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            baseline: ParameterSet::baseline(),
            road: ParameterSet::road(),
            dirt: ParameterSet::dirt(),
            abs: AbsConfig::default(),
            accel_strategy: AccelStrategy::default(),
            brake_trace_capacity: DEFAULT_BRAKE_TRACE_CAPACITY,
        }
    }
}

impl DriverConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Config`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RacebotError::config(format!("JSON parse error: {e}")))
    }

    /// Parse a YAML document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Config`] on malformed input.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| RacebotError::config(format!("YAML parse error: {e}")))
    }

    /// Load a file, picking the format from its extension (`.json`, else
    /// YAML), and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Io`] if the file cannot be read, then any
    /// parse or validation error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`RacebotError::Config`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RacebotError::config(format!("YAML write error: {e}")))
    }

    /// Check every bundle, the ABS tunables and the throttle strategy.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> core::result::Result<(), ValidationError> {
        self.baseline.validate()?;
        self.road.validate()?;
        self.dirt.validate()?;
        self.abs.build().validate()?;
        self.accel_strategy.validate()?;
        if self.brake_trace_capacity == 0 {
            return Err(ValidationError::out_of_range(
                "brake_trace_capacity",
                0,
                1,
                usize::MAX,
            ));
        }
        Ok(())
    }

    /// Parameters for `surface`, or the baseline when none is known.
    pub fn preset(&self, surface: Option<SurfaceType>) -> &ParameterSet {
        match surface {
            Some(SurfaceType::Road) => &self.road,
            Some(SurfaceType::Dirt) => &self.dirt,
            None => &self.baseline,
        }
    }

    /// Use `abs`.
    pub fn with_abs(mut self, abs: AbsConfig) -> Self {
        self.abs = abs;
        self
    }

    /// Use `strategy` for InsideTrack throttle.
    pub fn with_accel_strategy(mut self, strategy: AccelStrategy) -> Self {
        self.accel_strategy = strategy;
        self
    }

    /// Replace the baseline bundle.
    pub fn with_baseline(mut self, params: ParameterSet) -> Self {
        self.baseline = params;
        self
    }

    /// Replace the asphalt bundle.
    pub fn with_road(mut self, params: ParameterSet) -> Self {
        self.road = params;
        self
    }

    /// Replace the dirt bundle.
    pub fn with_dirt(mut self, params: ParameterSet) -> Self {
        self.dirt = params;
        self
    }

    /// Bound the brake trace.
    pub fn with_brake_trace_capacity(mut self, capacity: usize) -> Self {
        self.brake_trace_capacity = capacity;
        self
    }
}

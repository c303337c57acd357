//! Simulation parameters and their shared handle
//!
//! `SimulationParameters` is a plain value. Simulators read it through a
//! `SharedParameters` handle, taking one snapshot at the start of every step,
//! so an update made between steps applies from the next step on. Two
//! simulators only see each other's updates when they were built from clones
//! of the same handle.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Seconds per day, used by the "jump forward N days" helper
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G_SI: f64 = 6.67430e-11;

/// Tunables read by every force, integration and field operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    /// Magnitude of one step in seconds
    pub time_step: f64,
    /// Gravitational constant
    pub gravity_constant: f64,
    /// Barnes-Hut opening threshold (0 = always open, i.e. exact)
    pub barnes_hut_theta: f64,
    /// Half-extent of the Barnes-Hut root cube, in metres
    pub universe_size: f64,
    /// Integrate forward (true) or backward (false) in time
    pub time_direction_forward: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            time_step: 864_000.0,
            gravity_constant: G_SI,
            barnes_hut_theta: 0.5,
            universe_size: 1e12,
            time_direction_forward: true,
        }
    }
}

impl SimulationParameters {
    /// The time step with the direction applied
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::params::SimulationParameters;
    ///
    /// let mut params = SimulationParameters::default();
    /// assert_eq!(params.signed_time_step(), 864_000.0);
    ///
    /// params.time_direction_forward = false;
    /// assert_eq!(params.signed_time_step(), -864_000.0);
    /// ```
    pub fn signed_time_step(&self) -> f64 {
        if self.time_direction_forward {
            self.time_step
        } else {
            -self.time_step
        }
    }

    /// Returns a copy with `patch` applied, or the first validation error
    ///
    /// The patch is checked as a whole; `self` is never partially updated.
    pub fn patched(&self, patch: &ConfigPatch) -> Result<Self> {
        let mut next = *self;
        if let Some(v) = patch.time_step {
            next.time_step = v;
        }
        if let Some(v) = patch.gravity_constant {
            next.gravity_constant = v;
        }
        if let Some(v) = patch.barnes_hut_theta {
            next.barnes_hut_theta = v;
        }
        if let Some(v) = patch.universe_size {
            next.universe_size = v;
        }
        if let Some(v) = patch.time_direction_forward {
            next.time_direction_forward = v;
        }
        next.validate()?;
        Ok(next)
    }

    /// Checks every numeric field against its domain
    pub fn validate(&self) -> Result<()> {
        check("timeStep", self.time_step, |v| v > 0.0, "must be finite and positive")?;
        check(
            "gravityConstant",
            self.gravity_constant,
            |v| v >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "barnesHutTheta",
            self.barnes_hut_theta,
            |v| v >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "universeSize",
            self.universe_size,
            |v| v > 0.0,
            "must be finite and positive",
        )
    }
}

fn check(
    name: &'static str,
    value: f64,
    in_domain: impl Fn(f64) -> bool,
    reason: &'static str,
) -> Result<()> {
    if value.is_finite() && in_domain(value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

/// Partial update of `SimulationParameters`; absent fields are left alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity_constant: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barnes_hut_theta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universe_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_direction_forward: Option<bool>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cloneable handle onto one set of parameters
///
/// Clones point at the same underlying value. The engine never writes through
/// it except from `Simulator::configure`.
#[derive(Debug, Clone, Default)]
pub struct SharedParameters {
    inner: Arc<RwLock<SimulationParameters>>,
}

impl SharedParameters {
    /// Wraps `params` after checking them against the same domain as a patch
    pub fn new(params: SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(params)),
        })
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> SimulationParameters {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and applies a patch atomically, returning the new values
    pub fn apply(&self, patch: &ConfigPatch) -> Result<SimulationParameters> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let next = guard.patched(patch)?;
        *guard = next;
        Ok(next)
    }

    /// True when both handles refer to the same parameters
    pub fn shares_with(&self, other: &SharedParameters) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Number of whole steps covering `days` at the given step size
///
/// # Examples
///
/// ```
/// use gravsim::params::steps_for_days;
///
/// // 10 days at the default 10-day step
/// assert_eq!(steps_for_days(10.0, 864_000.0), 1);
/// assert_eq!(steps_for_days(365.0, 86_400.0), 365);
/// ```
pub fn steps_for_days(days: f64, time_step: f64) -> u64 {
    if time_step <= 0.0 || days <= 0.0 {
        return 0;
    }
    (days * SECONDS_PER_DAY / time_step).floor() as u64
}

//! Construction-time configuration for a particle field.
//!
//! Every animation variant is one `MotionParams` value; hosts either start
//! from a preset or load one from disk (with the `serde` feature) and tweak
//! individual fields.

use crate::constants::*;
use crate::error::ConfigError;
use crate::surface::{non_negative, positive, TargetSurface};

/// What happens once an attached particle has dwelt for `dwell_time`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "policy", rename_all = "snake_case")
)]
pub enum RespawnPolicy {
    /// Respawn on the first update after the dwell expires.
    Immediate,
    /// Respawn with this probability on every update after the dwell expires.
    /// Staggers recycling so the flow never pulses in sync.
    Probabilistic { per_frame: f32 },
}

impl Default for RespawnPolicy {
    fn default() -> Self {
        Self::Probabilistic {
            per_frame: RESPAWN_PER_FRAME,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MotionParams {
    pub particle_count: usize,
    pub core_radius: f32,
    pub start_radius_min: f32,
    pub start_radius_max: f32,
    pub stick_distance: f32,
    pub dwell_time: f32,
    pub spiral_factor: f32,
    pub base_inward_step: f32,
    pub max_step: f32,
    pub approach_boost: f32,
    pub ease_distance: f32,
    pub variance: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub spawn_delay_max: f32,
    pub orbit_duration: f32,
    pub orbit_speed: f32,
    pub ring_thickness: f32,
    pub settle_wobble: f32,
    pub respawn: RespawnPolicy,
    pub surface: TargetSurface,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::home()
    }
}

impl MotionParams {
    /// Dense point cloud flowing onto a torus around the core.
    pub fn home() -> Self {
        Self {
            particle_count: HOME_PARTICLE_COUNT,
            core_radius: CORE_RADIUS,
            start_radius_min: START_RADIUS_MIN,
            start_radius_max: START_RADIUS_MAX,
            stick_distance: STICK_DISTANCE,
            dwell_time: DWELL_TIME,
            spiral_factor: SPIRAL_FACTOR,
            base_inward_step: BASE_INWARD_STEP,
            max_step: MAX_STEP,
            approach_boost: APPROACH_BOOST,
            ease_distance: EASE_DISTANCE,
            variance: VARIANCE,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            spawn_delay_max: SPAWN_DELAY_MAX,
            orbit_duration: ORBIT_DURATION,
            orbit_speed: ORBIT_SPEED,
            ring_thickness: RING_THICKNESS,
            settle_wobble: SETTLE_WOBBLE,
            respawn: RespawnPolicy::default(),
            surface: TargetSurface::torus(),
        }
    }

    /// A handful of thought-balloon sprites settling into latitude bands.
    pub fn thoughts() -> Self {
        Self {
            particle_count: THOUGHTS_PARTICLE_COUNT,
            start_radius_min: CORE_RADIUS * 2.2,
            start_radius_max: CORE_RADIUS * 2.7,
            spawn_delay_max: 1.5,
            surface: TargetSurface::bands(),
            ..Self::home()
        }
    }

    /// Fast, short-dwell tuning: every particle cycles several times within
    /// a few seconds. Used for soak runs.
    pub fn burst() -> Self {
        Self {
            particle_count: BURST_PARTICLE_COUNT,
            start_radius_min: 2.2,
            start_radius_max: 3.2,
            dwell_time: 0.8,
            base_inward_step: 0.05,
            max_step: 0.12,
            spawn_delay_max: 1.0,
            orbit_duration: 0.6,
            orbit_speed: 0.9,
            surface: TargetSurface::bands(),
            ..Self::home()
        }
    }

    /// Look a preset up by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "home" => Some(Self::home()),
            "thoughts" => Some(Self::thoughts()),
            "burst" => Some(Self::burst()),
            _ => None,
        }
    }

    pub const PRESET_NAMES: [&'static str; 3] = ["home", "thoughts", "burst"];

    /// Upper bound on the lateral (spiral plus sway) displacement of a single
    /// spiral update.
    #[inline]
    pub fn max_spiral_step(&self) -> f32 {
        self.max_step * self.spiral_factor * (1.0 + self.variance)
    }

    /// Upper bound on the displacement of a single spiral or orbit update.
    #[inline]
    pub fn max_displacement(&self) -> f32 {
        self.max_step + self.max_spiral_step()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyPool);
        }
        positive("core_radius", self.core_radius)?;
        positive("start_radius_min", self.start_radius_min)?;
        range("start_radius", self.start_radius_min, self.start_radius_max)?;
        positive("stick_distance", self.stick_distance)?;
        positive("dwell_time", self.dwell_time)?;
        non_negative("spiral_factor", self.spiral_factor)?;
        positive("base_inward_step", self.base_inward_step)?;
        positive("max_step", self.max_step)?;
        non_negative("approach_boost", self.approach_boost)?;
        positive("ease_distance", self.ease_distance)?;
        non_negative("variance", self.variance)?;
        positive("speed_min", self.speed_min)?;
        range("speed", self.speed_min, self.speed_max)?;
        non_negative("spawn_delay_max", self.spawn_delay_max)?;
        non_negative("orbit_duration", self.orbit_duration)?;
        if !self.orbit_speed.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "orbit_speed",
                value: self.orbit_speed,
            });
        }
        non_negative("ring_thickness", self.ring_thickness)?;
        non_negative("settle_wobble", self.settle_wobble)?;
        if let RespawnPolicy::Probabilistic { per_frame } = self.respawn {
            if !(per_frame > 0.0 && per_frame <= 1.0) {
                return Err(ConfigError::InvalidProbability(per_frame));
            }
        }
        self.surface.validate()
    }
}

fn range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}

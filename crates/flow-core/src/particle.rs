//! Per-particle lifecycle and kinematics.
//!
//! A particle cycles `Delayed -> Orbiting -> Spiraling -> Attached` and is
//! then recycled in place by [`Particle::seed`]. All timing is expressed as
//! elapsed seconds compared against thresholds; nothing here blocks or
//! allocates.

use crate::constants::*;
use crate::params::{MotionParams, RespawnPolicy};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleState {
    /// Waiting for `spawn_delay` to pass; does not move.
    Delayed,
    /// Circling the core on its spawn ring.
    Orbiting,
    /// Spiralling inward toward `target`.
    Spiraling,
    /// Resting on `target` until the dwell expires and the slot is recycled.
    Attached,
}

/// What a single update did, for the owning field's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    Activated,
    BeganSpiral,
    Attached,
    Respawned,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub target: Vec3,
    pub speed: f32,
    pub state: ParticleState,
    pub spawn_delay: f32,
    pub orbit_angle: f32,
    pub orbit_radius: f32,
    pub orbit_started_at: f32,
    pub attached_at: f32,
    pub phase: f32,
    pub respawns: u32,
}

impl Particle {
    /// Blank slot. Call [`Particle::seed`] before the first update.
    pub fn new(index: usize) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            speed: 1.0,
            state: ParticleState::Delayed,
            spawn_delay: 0.0,
            orbit_angle: 0.0,
            orbit_radius: 0.0,
            orbit_started_at: 0.0,
            attached_at: 0.0,
            phase: index as f32,
            respawns: 0,
        }
    }

    /// (Re)spawn this particle: pick an orbit slot, a target on the surface,
    /// a speed and a spawn delay.
    pub fn seed<R: Rng + ?Sized>(&mut self, now: f32, params: &MotionParams, rng: &mut R) {
        self.orbit_angle = rng.gen::<f32>() * TAU;
        self.orbit_radius = uniform(rng, params.start_radius_min, params.start_radius_max);
        self.target = params.surface.sample(params.core_radius, rng);
        let reference = params.surface.reference_radius(params.core_radius);
        self.position = Vec3::new(
            self.orbit_radius * self.orbit_angle.cos(),
            self.target.y * (self.orbit_radius / reference),
            self.orbit_radius * self.orbit_angle.sin(),
        );
        self.speed = uniform(rng, params.speed_min, params.speed_max);
        self.spawn_delay = rng.gen::<f32>() * params.spawn_delay_max;
        self.attached_at = 0.0;
        self.orbit_started_at = now;
        self.state = if now > self.spawn_delay {
            ParticleState::Orbiting
        } else {
            ParticleState::Delayed
        };
    }

    /// Advance one frame. `elapsed` is the host's monotonic clock in seconds
    /// and `dt` the time since the previous update.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        elapsed: f32,
        dt: f32,
        params: &MotionParams,
        rng: &mut R,
    ) -> Transition {
        match self.state {
            ParticleState::Delayed => {
                if elapsed >= self.spawn_delay {
                    self.state = ParticleState::Orbiting;
                    self.orbit_started_at = elapsed;
                    Transition::Activated
                } else {
                    Transition::None
                }
            }
            ParticleState::Orbiting => self.orbit(elapsed, dt, params),
            ParticleState::Spiraling => self.spiral(elapsed, dt, params),
            ParticleState::Attached => self.dwell(elapsed, params, rng),
        }
    }

    fn orbit(&mut self, elapsed: f32, dt: f32, params: &MotionParams) -> Transition {
        if elapsed - self.orbit_started_at >= params.orbit_duration {
            self.state = ParticleState::Spiraling;
            return Transition::BeganSpiral;
        }
        // Arc length per update stays inside the same budget as a spiral step
        let budget = params.max_displacement();
        let advance = (params.orbit_speed * REFERENCE_FRAME_DT * frame_scale(dt))
            .min(budget / self.orbit_radius);
        self.orbit_angle = (self.orbit_angle + advance).rem_euclid(TAU);
        let pulse = ORBIT_PULSE * (elapsed * 2.5 + self.phase * 0.3).sin();
        let radius = self.orbit_radius * (1.0 + pulse * ORBIT_RADIUS_BREATH);
        let reference = params.surface.reference_radius(params.core_radius);
        let next = Vec3::new(
            radius * self.orbit_angle.cos(),
            self.target.y * (radius / reference) + pulse * params.ring_thickness * 0.5,
            radius * self.orbit_angle.sin(),
        );
        self.position += (next - self.position).clamp_length_max(budget);
        Transition::None
    }

    fn spiral(&mut self, elapsed: f32, dt: f32, params: &MotionParams) -> Transition {
        let to_target = self.target - self.position;
        let distance = to_target.length();
        if distance <= params.stick_distance {
            self.position = self.target;
            self.state = ParticleState::Attached;
            self.attached_at = elapsed;
            return Transition::Attached;
        }
        let (radial, tangent) = spiral_basis(to_target, distance);
        let inward = inward_step(distance, self.speed, dt, params);
        let lateral = self.lateral_offset(radial, tangent, inward, distance, elapsed, params);
        self.position += radial * inward + lateral;
        Transition::None
    }

    fn lateral_offset(
        &self,
        radial: Vec3,
        tangent: Vec3,
        inward: f32,
        distance: f32,
        elapsed: f32,
        params: &MotionParams,
    ) -> Vec3 {
        let intensity = (distance / SPIRAL_INTENSITY_DISTANCE).clamp(SPIRAL_INTENSITY_FLOOR, 1.0);
        let time_factor = (elapsed * 0.8 + self.phase * 0.91).sin() * 0.3 + 0.7;
        let modulation =
            0.85 + params.variance * ((elapsed * 1.4 + self.phase * 0.67).sin() * 0.4 + 0.6);
        let spiral = inward * params.spiral_factor * intensity * time_factor * modulation;
        let sway = spiral * PERP_SWAY * (elapsed * 2.1 + self.phase * 0.45).sin();
        let perp = radial.cross(tangent);
        (tangent * spiral + perp * sway).clamp_length_max(params.max_spiral_step())
    }

    fn dwell<R: Rng + ?Sized>(
        &mut self,
        elapsed: f32,
        params: &MotionParams,
        rng: &mut R,
    ) -> Transition {
        let age = elapsed - self.attached_at;
        if age > params.dwell_time {
            let respawn = match params.respawn {
                RespawnPolicy::Immediate => true,
                RespawnPolicy::Probabilistic { per_frame } => rng.gen::<f32>() < per_frame,
            };
            if respawn {
                self.seed(elapsed, params, rng);
                self.respawns += 1;
                return Transition::Respawned;
            }
        }
        let settle = params.settle_wobble
            * (-age.max(0.0) * SETTLE_DECAY_PER_SEC).exp()
            * (elapsed * 3.5 + self.phase * 0.4).sin();
        let held = self.target * (1.0 + settle);
        self.position += (held - self.position).clamp_length_max(params.max_displacement());
        Transition::None
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state != ParticleState::Delayed
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Normalized direction toward the target plus the spiral tangent around
/// [`UP`]. `distance` must be the length of `to_target` and non-zero.
pub fn spiral_basis(to_target: Vec3, distance: f32) -> (Vec3, Vec3) {
    let radial = to_target / distance;
    let tangent = UP.cross(radial);
    let tangent = if tangent.length_squared() < DEGENERATE_TANGENT_SQ {
        TANGENT_FALLBACK
    } else {
        tangent.normalize()
    };
    (radial, tangent)
}

/// Inward step for one update. Grows as the particle closes in, never exceeds
/// `max_step` and never overshoots the target.
pub fn inward_step(distance: f32, speed: f32, dt: f32, params: &MotionParams) -> f32 {
    let ease = 1.0 + params.approach_boost * (1.0 - (distance / params.ease_distance).min(1.0));
    (params.base_inward_step * speed * frame_scale(dt) * ease)
        .min(params.max_step)
        .min(distance)
}

/// How many reference frames `dt` stands for, capped at [`MAX_FRAME_SCALE`].
/// A NaN or negative `dt` counts as no time at all.
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    if dt.is_nan() {
        0.0
    } else {
        (dt / REFERENCE_FRAME_DT).clamp(0.0, MAX_FRAME_SCALE)
    }
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

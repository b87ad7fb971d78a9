//! The owned animation context: a fixed pool of particles, their shared
//! parameters and the random source that drives spawning.

use crate::constants::{MAX_FRAME_DT, REFERENCE_FRAME_DT};
use crate::error::ConfigError;
use crate::params::MotionParams;
use crate::particle::{Particle, ParticleState, Transition};
use glam::Vec3;
use rand::prelude::*;

/// One GPU-ready row per particle.
///
/// `state` is the discriminant of [`ParticleState`] as a float so shaders can
/// fade delayed/attached points without a second buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub state: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub frames: u64,
    pub activations: u64,
    pub attachments: u64,
    pub respawns: u64,
}

pub struct ParticleField {
    params: MotionParams,
    particles: Vec<Particle>,
    rng: StdRng,
    last_elapsed: Option<f32>,
    stats: FieldStats,
}

impl ParticleField {
    /// Validate `params`, allocate the pool and seed every particle at time 0.
    pub fn new(params: MotionParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let particles = (0..params.particle_count).map(Particle::new).collect();
        let mut field = Self {
            params,
            particles,
            rng: StdRng::seed_from_u64(seed),
            last_elapsed: None,
            stats: FieldStats::default(),
        };
        field.seed_all();
        log::debug!(
            "[field] particles={} seed={} respawn={:?}",
            field.particles.len(),
            seed,
            field.params.respawn
        );
        Ok(field)
    }

    /// Reseed the random source and restart every particle from time 0.
    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.last_elapsed = None;
        self.stats = FieldStats::default();
        for p in &mut self.particles {
            p.respawns = 0;
        }
        self.seed_all();
        log::debug!("[field] reset seed={seed}");
    }

    fn seed_all(&mut self) {
        for p in &mut self.particles {
            p.seed(0.0, &self.params, &mut self.rng);
        }
    }

    /// Advance the pool to `elapsed` seconds. The frame delta is derived from
    /// the previous call; the first call assumes one reference frame. Time
    /// running backwards is treated as a zero-length frame.
    pub fn update(&mut self, elapsed: f32) {
        let dt = match self.last_elapsed {
            Some(prev) => (elapsed - prev).clamp(0.0, MAX_FRAME_DT),
            None => REFERENCE_FRAME_DT,
        };
        self.step(elapsed, dt);
    }

    /// Advance the pool with an explicit frame delta.
    pub fn step(&mut self, elapsed: f32, dt: f32) {
        self.last_elapsed = Some(elapsed);
        self.stats.frames += 1;
        for p in &mut self.particles {
            match p.update(elapsed, dt, &self.params, &mut self.rng) {
                Transition::None | Transition::BeganSpiral => {}
                Transition::Activated => self.stats.activations += 1,
                Transition::Attached => self.stats.attachments += 1,
                Transition::Respawned => self.stats.respawns += 1,
            }
        }
    }

    #[inline]
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    pub fn count_in(&self, state: ParticleState) -> usize {
        self.particles.iter().filter(|p| p.state == state).count()
    }

    /// Fill `out` with one instance row per particle, reusing its allocation.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| ParticleInstance {
            pos: p.position.to_array(),
            state: p.state as u8 as f32,
        }));
    }
}

//! Ambient "brain" effects that sit beside the particle flow: the breathing
//! core, the neuron network inside it and the neurons' random flashes.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

/// Slow sinusoidal scale applied to the core mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreBreath {
    pub rate: f32,
    pub depth: f32,
}

impl Default for CoreBreath {
    fn default() -> Self {
        Self {
            rate: CORE_BREATH_RATE,
            depth: CORE_BREATH_DEPTH,
        }
    }
}

impl CoreBreath {
    #[inline]
    pub fn scale(&self, elapsed: f32) -> f32 {
        1.0 + (elapsed * self.rate).sin() * self.depth
    }
}

/// Countdown timers for a set of neurons. Each neuron fires when its timer
/// runs out and is rearmed with a fresh random interval.
pub struct FlashScheduler {
    timers: Vec<f32>,
    lit: Vec<f32>,
    rng: StdRng,
}

impl FlashScheduler {
    pub fn new(neurons: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let timers = (0..neurons)
            .map(|_| rng.gen::<f32>() * FLASH_INTERVAL_MAX)
            .collect();
        Self {
            timers,
            lit: vec![0.0; neurons],
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance all timers by `dt` and push the index of every neuron that
    /// fired this tick.
    pub fn tick(&mut self, dt: f32, out_fired: &mut Vec<usize>) {
        let dt = dt.max(0.0);
        for (i, (timer, lit)) in self.timers.iter_mut().zip(&mut self.lit).enumerate() {
            *lit = (*lit - dt).max(0.0);
            *timer -= dt;
            if *timer <= 0.0 {
                out_fired.push(i);
                *lit = FLASH_HOLD_SEC;
                *timer = FLASH_INTERVAL_MIN + self.rng.gen::<f32>() * FLASH_INTERVAL_MAX;
            }
        }
    }

    /// Remaining glow of a neuron in [0, 1]; 1 right after it fires.
    #[inline]
    pub fn intensity(&self, neuron: usize) -> f32 {
        self.lit
            .get(neuron)
            .map(|l| (l / FLASH_HOLD_SEC).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

/// Neurons scattered inside the brain outline, each wired to a handful of
/// others, plus the outline itself. Everything is in world units around the
/// core centre.
#[derive(Clone, Debug, PartialEq)]
pub struct BrainNetwork {
    pub neurons: Vec<Vec3>,
    /// Outgoing links per neuron; indices into `neurons`, never the neuron itself.
    pub links: Vec<SmallVec<[usize; BRAIN_LINKS_MAX]>>,
    pub outline: Vec<Vec3>,
}

impl BrainNetwork {
    pub fn new(neuron_count: usize, core_radius: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let neurons = brain_neurons(neuron_count, core_radius, &mut rng);
        let links = brain_links(neuron_count, &mut rng);
        Self {
            neurons,
            links,
            outline: brain_outline(core_radius),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Every link as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links
            .iter()
            .enumerate()
            .flat_map(|(i, to)| to.iter().map(move |&j| (i, j)))
    }
}

/// Outline control points scaled to a core of `core_radius`.
pub fn brain_outline(core_radius: f32) -> Vec<Vec3> {
    BRAIN_OUTLINE
        .iter()
        .map(|v| *v * core_radius * BRAIN_OUTLINE_SCALE)
        .collect()
}

/// Rejection-sample `count` neurons from the outline's bounding box, keeping
/// those within [`BRAIN_NEURON_SHELL`] core radii. A neuron that misses on
/// every attempt is pulled onto the shell.
pub fn brain_neurons<R: Rng + ?Sized>(count: usize, core_radius: f32, rng: &mut R) -> Vec<Vec3> {
    let (min, max) = BRAIN_OUTLINE
        .iter()
        .fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let scale = core_radius * BRAIN_OUTLINE_SCALE;
    let shell = core_radius * BRAIN_NEURON_SHELL;
    (0..count)
        .map(|_| {
            let mut pos = Vec3::ZERO;
            for _ in 0..BRAIN_PLACEMENT_ATTEMPTS {
                let unit = Vec3::new(rng.gen(), rng.gen(), rng.gen());
                pos = (min + unit * (max - min)) * scale;
                if pos.length() <= shell {
                    return pos;
                }
            }
            pos.clamp_length_max(shell)
        })
        .collect()
}

/// Wire each of `count` neurons to between [`BRAIN_LINKS_MIN`] and
/// [`BRAIN_LINKS_MAX`] distinct others (fewer when the network is too small).
pub fn brain_links<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
) -> Vec<SmallVec<[usize; BRAIN_LINKS_MAX]>> {
    (0..count)
        .map(|i| {
            let wanted = rng
                .gen_range(BRAIN_LINKS_MIN..=BRAIN_LINKS_MAX)
                .min(count.saturating_sub(1));
            let mut to: SmallVec<[usize; BRAIN_LINKS_MAX]> = SmallVec::new();
            while to.len() < wanted {
                let j = rng.gen_range(0..count);
                if j != i && !to.contains(&j) {
                    to.push(j);
                }
            }
            to
        })
        .collect()
}

//! Target surfaces that particles settle onto.
//!
//! Targets are never spread uniformly: both surfaces concentrate points into a
//! horizontal ring around the Y axis so attached particles read as a glowing
//! band wrapped around the core.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use std::f32::consts::{FRAC_PI_4, FRAC_PI_8, TAU};

/// One latitude band on the target sphere.
///
/// `center` and `thickness` are in band units: a centre of 1.0 sits at 45°
/// latitude and a thickness of 1.0 spans 22.5°.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatitudeBand {
    pub center: f32,
    pub thickness: f32,
    pub weight: f32,
}

impl LatitudeBand {
    pub const fn new(center: f32, thickness: f32, weight: f32) -> Self {
        Self {
            center,
            thickness,
            weight,
        }
    }

    /// Latitude in radians for a uniform roll in [0, 1).
    #[inline]
    pub fn latitude(&self, roll: f32) -> f32 {
        self.center * FRAC_PI_4 + (roll - 0.5) * self.thickness * FRAC_PI_8
    }

    /// Largest absolute latitude this band can produce.
    #[inline]
    pub fn max_abs_latitude(&self) -> f32 {
        self.center.abs() * FRAC_PI_4 + self.thickness.abs() * FRAC_PI_8 * 0.5
    }
}

pub type BandList = SmallVec<[LatitudeBand; 4]>;

/// Equatorial band carrying most of the weight, flanked by two thin rings.
pub fn default_bands() -> BandList {
    smallvec![
        LatitudeBand::new(0.0, 0.08, 0.7),
        LatitudeBand::new(0.15, 0.05, 0.15),
        LatitudeBand::new(-0.15, 0.05, 0.15),
    ]
}

/// Pick a band from a discrete weighted distribution.
///
/// `roll` is uniform in [0, 1). Zero-weight bands are never chosen. Returns
/// `None` only when no band carries positive weight.
pub fn pick_band(bands: &[LatitudeBand], roll: f32) -> Option<&LatitudeBand> {
    let total: f32 = bands.iter().map(|b| b.weight.max(0.0)).sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    let scaled = roll.clamp(0.0, 1.0) * total;
    let mut cumulative = 0.0;
    for band in bands {
        cumulative += band.weight.max(0.0);
        if scaled < cumulative {
            return Some(band);
        }
    }
    // roll == 1.0 or float drift: fall back to the last weighted band
    bands.iter().rev().find(|b| b.weight > 0.0)
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum TargetSurface {
    /// Sphere of radius `core_radius * radius_scale`, clustered into bands.
    Bands {
        radius_scale: f32,
        bands: BandList,
    },
    /// Horizontal torus around the Y axis. Only the outer `tube_arc` fraction
    /// of the tube receives targets.
    Torus {
        major_scale: f32,
        minor_scale: f32,
        tube_arc: f32,
    },
}

impl Default for TargetSurface {
    fn default() -> Self {
        Self::torus()
    }
}

impl TargetSurface {
    pub fn bands() -> Self {
        Self::Bands {
            radius_scale: BAND_RADIUS_SCALE,
            bands: default_bands(),
        }
    }

    pub fn torus() -> Self {
        Self::Torus {
            major_scale: TORUS_MAJOR_SCALE,
            minor_scale: TORUS_MINOR_SCALE,
            tube_arc: TORUS_TUBE_ARC,
        }
    }

    /// Radius used to map a target's height onto the orbit ring.
    pub fn reference_radius(&self, core_radius: f32) -> f32 {
        match self {
            Self::Bands { radius_scale, .. } => core_radius * radius_scale,
            Self::Torus { major_scale, .. } => core_radius * major_scale,
        }
    }

    /// Draw one target point.
    pub fn sample<R: Rng + ?Sized>(&self, core_radius: f32, rng: &mut R) -> Vec3 {
        match self {
            Self::Bands {
                radius_scale,
                bands,
            } => {
                let radius = core_radius * radius_scale;
                let theta = rng.gen::<f32>() * TAU;
                let band_roll = rng.gen::<f32>();
                let lat_roll = rng.gen::<f32>();
                let lat = pick_band(bands, band_roll)
                    .map(|b| b.latitude(lat_roll))
                    .unwrap_or(0.0);
                let ring = radius * lat.cos();
                Vec3::new(ring * theta.cos(), radius * lat.sin(), ring * theta.sin())
            }
            Self::Torus {
                major_scale,
                minor_scale,
                tube_arc,
            } => {
                let major = core_radius * major_scale;
                let minor = core_radius * minor_scale;
                let u = rng.gen::<f32>() * TAU;
                let v = (rng.gen::<f32>() - 0.5) * tube_arc * TAU;
                let ring = major + minor * v.cos();
                Vec3::new(ring * u.cos(), minor * v.sin(), ring * u.sin())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Bands {
                radius_scale,
                bands,
            } => {
                positive("bands.radius_scale", *radius_scale)?;
                if bands.is_empty() {
                    return Err(ConfigError::EmptyBands);
                }
                let weights_ok = bands.iter().all(|b| b.weight.is_finite() && b.weight >= 0.0);
                let total: f32 = bands.iter().map(|b| b.weight).sum();
                if !weights_ok || total <= 0.0 {
                    return Err(ConfigError::InvalidBandWeights);
                }
                for b in bands {
                    if !b.center.is_finite() {
                        return Err(ConfigError::NonFinite {
                            name: "bands.center",
                            value: b.center,
                        });
                    }
                    non_negative("bands.thickness", b.thickness)?;
                }
                Ok(())
            }
            Self::Torus {
                major_scale,
                minor_scale,
                tube_arc,
            } => {
                positive("torus.major_scale", *major_scale)?;
                non_negative("torus.minor_scale", *minor_scale)?;
                if minor_scale >= major_scale {
                    return Err(ConfigError::InvalidTorus {
                        major: *major_scale,
                        minor: *minor_scale,
                    });
                }
                if !(0.0..=1.0).contains(tube_arc) {
                    return Err(ConfigError::OutOfUnitRange {
                        name: "torus.tube_arc",
                        value: *tube_arc,
                    });
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

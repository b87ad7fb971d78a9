use glam::Vec3;

// Shared motion/visual tuning constants used by both web and native hosts.

// Frame timing
pub const REFERENCE_FRAME_DT: f32 = 1.0 / 60.0; // step sizes are expressed per reference frame
pub const MAX_FRAME_SCALE: f32 = 4.0; // a long frame advances at most this many reference frames
pub const MAX_FRAME_DT: f32 = 0.1; // field clamps host-reported frame gaps (tab switches, stalls)

// Core geometry
pub const CORE_RADIUS: f32 = 1.08;
pub const UP: Vec3 = Vec3::Y; // spiral tangent is computed against this axis
pub const TANGENT_FALLBACK: Vec3 = Vec3::X;
pub const DEGENERATE_TANGENT_SQ: f32 = 1e-6;

// Spawn ranges
pub const START_RADIUS_MIN: f32 = 3.0;
pub const START_RADIUS_MAX: f32 = 7.0;
pub const SPEED_MIN: f32 = 0.48;
pub const SPEED_MAX: f32 = 0.84;
pub const SPAWN_DELAY_MAX: f32 = 2.2;

// Spiral motion
pub const STICK_DISTANCE: f32 = 0.02;
pub const DWELL_TIME: f32 = 1.6;
pub const SPIRAL_FACTOR: f32 = 0.65;
pub const BASE_INWARD_STEP: f32 = 0.015;
pub const MAX_STEP: f32 = 0.06;
pub const APPROACH_BOOST: f32 = 0.6; // inward easing gained as a particle closes in
pub const EASE_DISTANCE: f32 = 1.2;
pub const VARIANCE: f32 = 0.8;
pub const SPIRAL_INTENSITY_FLOOR: f32 = 0.4;
pub const SPIRAL_INTENSITY_DISTANCE: f32 = 2.0;
pub const PERP_SWAY: f32 = 0.3; // out-of-plane sway relative to the spiral step

// Orbit phase
pub const ORBIT_DURATION: f32 = 1.2;
pub const ORBIT_SPEED: f32 = 0.6; // rad/s
pub const RING_THICKNESS: f32 = 0.15;
pub const ORBIT_PULSE: f32 = 0.08;
pub const ORBIT_RADIUS_BREATH: f32 = 0.03;

// Attachment
pub const SETTLE_WOBBLE: f32 = 0.03;
pub const SETTLE_DECAY_PER_SEC: f32 = 2.0;
pub const RESPAWN_PER_FRAME: f32 = 0.05;

// Default target surfaces
pub const BAND_RADIUS_SCALE: f32 = 1.1;
pub const TORUS_MAJOR_SCALE: f32 = 1.2;
pub const TORUS_MINOR_SCALE: f32 = 0.35;
pub const TORUS_TUBE_ARC: f32 = 0.3; // fraction of the tube circumference targets may land on

// Core breathing
pub const CORE_BREATH_RATE: f32 = 1.6; // rad/s
pub const CORE_BREATH_DEPTH: f32 = 0.025;

// Neuron flashes (seconds between flashes)
pub const FLASH_INTERVAL_MIN: f32 = 0.15;
pub const FLASH_INTERVAL_MAX: f32 = 2.5;
pub const FLASH_HOLD_SEC: f32 = 0.2;

// Brain network inside the core
pub const BRAIN_NEURON_COUNT: usize = 48;
pub const BRAIN_OUTLINE_SCALE: f32 = 0.55; // outline units -> core radii
pub const BRAIN_NEURON_SHELL: f32 = 0.6; // neurons stay within this many core radii
pub const BRAIN_PLACEMENT_ATTEMPTS: u32 = 10;
pub const BRAIN_LINKS_MIN: usize = 3;
pub const BRAIN_LINKS_MAX: usize = 5;
// Closed side-view outline of the brain, first point repeated at the end
pub const BRAIN_OUTLINE: [Vec3; 14] = [
    Vec3::new(-0.65, 0.18, 0.0),
    Vec3::new(-0.75, 0.38, 0.08),
    Vec3::new(-0.68, 0.65, 0.18),
    Vec3::new(-0.45, 0.78, 0.22),
    Vec3::new(0.0, 0.82, 0.18),
    Vec3::new(0.45, 0.75, 0.12),
    Vec3::new(0.68, 0.55, 0.05),
    Vec3::new(0.75, 0.28, -0.05),
    Vec3::new(0.65, 0.05, -0.12),
    Vec3::new(0.45, -0.18, -0.18),
    Vec3::new(0.0, -0.38, -0.22),
    Vec3::new(-0.35, -0.45, -0.18),
    Vec3::new(-0.55, -0.38, -0.12),
    Vec3::new(-0.65, 0.18, 0.0),
];

// Scene drift
pub const SCENE_DRIFT_RAD_PER_SEC: f32 = 0.048;

// Pool sizes of the bundled presets
pub const HOME_PARTICLE_COUNT: usize = 2000;
pub const THOUGHTS_PARTICLE_COUNT: usize = 20;
pub const BURST_PARTICLE_COUNT: usize = 100;

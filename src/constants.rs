// Canvas/page wiring and drawing constants used by the web frontend.

// DOM
pub const CANVAS_ID: &str = "flow-canvas";
pub const PRESET_ATTR: &str = "data-preset"; // home | thoughts | burst
pub const DEFAULT_PRESET: &str = "home";

// Palette
pub const BACKGROUND: &str = "#05070f";
pub const CORE_FILL: &str = "#1a2440";
pub const CORE_HALO: &str = "#89e4ff";
pub const PARTICLE_COLOR: &str = "#8fd3ff";
pub const NEURON_COLOR: &str = "#ffffe0";
pub const FLASH_COLOR: &str = "#ffff00";

// Sizing (CSS pixels, scaled by devicePixelRatio at draw time)
pub const POINT_SIZE_PX: f64 = 2.0;
pub const NEURON_SIZE_PX: f64 = 3.0;
pub const CORE_HALO_SCALE: f64 = 1.25;
pub const CORE_HALO_ALPHA: f64 = 0.25;
pub const CORE_VISUAL_SCALE: f32 = 0.96; // core is drawn slightly inside the attach surface

// Per-state opacity
pub const ALPHA_ORBITING: f64 = 0.55;
pub const ALPHA_SPIRALING: f64 = 0.95;
pub const ALPHA_ATTACHED: f64 = 0.8;

// Brain network
pub const BRAIN_LINE_COLOR: &str = "#99ccff";
pub const BRAIN_OUTLINE_WIDTH_PX: f64 = 1.5;
pub const BRAIN_LINK_WIDTH_PX: f64 = 0.5;
pub const BRAIN_LINK_ALPHA: f64 = 0.5;
pub const NEURON_IDLE_ALPHA: f64 = 0.35;
pub const BRAIN_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;
pub const FLASH_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// Stats logging cadence (frames)
pub const STATS_LOG_EVERY: u64 = 600;

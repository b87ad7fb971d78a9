//! Headless native runner: drives a particle field at a fixed frame rate and
//! logs lifecycle statistics.

use anyhow::{bail, Context, Result};
use clap::Parser;
use flow_core::{MotionParams, ParticleField, ParticleState};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flow-native")]
#[command(about = "Run the particle flow headless and report lifecycle statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Bundled preset used as the base parameter set
    #[arg(short, long, default_value = "home")]
    preset: String,

    /// JSON file whose top-level keys override the preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds
    #[arg(short, long, default_value_t = 10.0)]
    seconds: f32,

    /// Fixed frame rate of the simulation
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// RNG seed for the particle pool
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Write the final frame's instance rows (16-byte native-endian f32 rows) here
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Preset parameters with the keys of an optional JSON object laid over them.
fn resolve_params(preset: &str, config: Option<&str>) -> Result<MotionParams> {
    let base = MotionParams::preset(preset).with_context(|| {
        format!(
            "unknown preset {:?}, expected one of {:?}",
            preset,
            MotionParams::PRESET_NAMES
        )
    })?;
    let Some(text) = config else {
        return Ok(base);
    };

    let overrides: serde_json::Value = serde_json::from_str(text).context("config is not JSON")?;
    let serde_json::Value::Object(overrides) = overrides else {
        bail!("config must be a JSON object");
    };
    let mut merged = serde_json::to_value(&base)?;
    if let serde_json::Value::Object(fields) = &mut merged {
        fields.extend(overrides);
    }
    let params: MotionParams =
        serde_json::from_value(merged).context("config does not describe motion params")?;
    params.validate()?;
    Ok(params)
}

fn load_params(preset: &str, path: Option<&Path>) -> Result<MotionParams> {
    let text = path
        .map(|p| std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())))
        .transpose()?;
    resolve_params(preset, text.as_deref())
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct RunSummary {
    frames: u64,
    cycled: usize,
    bounding_radius: f32,
    any_nan: bool,
}

impl RunSummary {
    fn observe(&mut self, field: &ParticleField) {
        for pos in field.positions() {
            if pos.is_nan() {
                self.any_nan = true;
            } else {
                self.bounding_radius = self.bounding_radius.max(pos.length());
            }
        }
    }

    fn cycle_ratio(&self, pool: usize) -> f32 {
        if pool == 0 {
            0.0
        } else {
            self.cycled as f32 / pool as f32
        }
    }
}

fn log_second(second: u64, field: &ParticleField) {
    let stats = field.stats();
    log::info!(
        "[t={}s] delayed={} orbiting={} spiraling={} attached={} attachments={} respawns={}",
        second,
        field.count_in(ParticleState::Delayed),
        field.count_in(ParticleState::Orbiting),
        field.count_in(ParticleState::Spiraling),
        field.count_in(ParticleState::Attached),
        stats.attachments,
        stats.respawns
    );
}

fn run(field: &mut ParticleField, seconds: f32, fps: f32) -> Result<RunSummary> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("--fps must be a positive number, got {}", fps);
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        bail!("--seconds must be a non-negative number, got {}", seconds);
    }
    let dt = 1.0 / fps;
    let total = (seconds * fps).round() as u64;
    let per_second = (fps.round() as u64).max(1);

    let mut summary = RunSummary::default();
    for frame in 1..=total {
        field.step(frame as f32 * dt, dt);
        summary.observe(field);
        if frame % per_second == 0 {
            log_second(frame / per_second, field);
        }
    }
    summary.frames = total;
    summary.cycled = field.particles().iter().filter(|p| p.respawns > 0).count();
    Ok(summary)
}

/// Write one `ParticleInstance` row per particle to `path`; returns the byte count.
fn dump_instances(field: &ParticleField, path: &Path) -> Result<usize> {
    let mut rows = Vec::with_capacity(field.len());
    field.write_instances(&mut rows);
    let bytes: &[u8] = bytemuck::cast_slice(&rows);
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(bytes.len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let params = load_params(&cli.preset, cli.config.as_deref())?;
    log::info!(
        "preset={} particles={} surface={:?} respawn={:?}",
        cli.preset,
        params.particle_count,
        params.surface,
        params.respawn
    );
    let mut field = ParticleField::new(params, cli.seed)?;
    let summary = run(&mut field, cli.seconds, cli.fps)?;

    log::info!(
        "done: frames={} cycled={}/{} ({:.1}%) bounding_radius={:.3}",
        summary.frames,
        summary.cycled,
        field.len(),
        summary.cycle_ratio(field.len()) * 100.0,
        summary.bounding_radius
    );
    if summary.any_nan {
        bail!("a particle position became NaN");
    }
    if let Some(path) = cli.dump.as_deref() {
        let written = dump_instances(&field, path)?;
        log::info!("wrote {} bytes of instance rows to {}", written, path.display());
    }
    Ok(())
}

use crate::constants::*;
use flow_core::{BrainNetwork, Camera, FlashScheduler, ParticleField, ParticleState};
use glam::{Vec2, Vec3};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D renderer for the particle field, the breathing core and the
/// brain network inside it.
pub struct CanvasRenderer {
    ctx: web::CanvasRenderingContext2d,
    camera: Camera,
    brain: BrainNetwork,
    // Per-frame screen positions of the neurons
    projected: Vec<Option<(f64, f64)>>,
}

/// Everything a single frame draws.
pub struct FrameView<'a> {
    pub elapsed: f32,
    pub core_scale: f32,
    pub field: &'a ParticleField,
    pub flashes: &'a FlashScheduler,
}

impl CanvasRenderer {
    pub fn new(canvas: &web::HtmlCanvasElement, brain: BrainNetwork) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            ctx,
            camera: Camera::default(),
            projected: Vec::with_capacity(brain.len()),
            brain,
        })
    }

    pub fn draw(&mut self, width: u32, height: u32, dpr: f64, view: &FrameView<'_>) {
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);
        self.camera.aspect = (w / h) as f32;
        let cam = self.camera.with_drift(view.elapsed);
        let vp = cam.view_proj();
        let to_screen = |ndc: Vec2| -> (f64, f64) {
            (
                (ndc.x as f64 * 0.5 + 0.5) * w,
                (1.0 - (ndc.y as f64 * 0.5 + 0.5)) * h,
            )
        };

        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Core: screen radius from a point on the silhouette edge
        let core_radius = view.field.params().core_radius * CORE_VISUAL_SCALE * view.core_scale;
        let right = (cam.target - cam.eye).cross(cam.up).normalize_or_zero();
        if let (Some(c), Some(edge)) = (
            cam.project(&vp, Vec3::ZERO),
            cam.project(&vp, right * core_radius),
        ) {
            let (cx, cy) = to_screen(c);
            let (ex, ey) = to_screen(edge);
            let r = ((ex - cx).powi(2) + (ey - cy).powi(2)).sqrt();
            ctx.set_global_alpha(CORE_HALO_ALPHA);
            ctx.set_fill_style_str(CORE_HALO);
            fill_circle(ctx, cx, cy, r * CORE_HALO_SCALE);
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str(CORE_FILL);
            fill_circle(ctx, cx, cy, r);
        }

        // Brain network sits inside the core and breathes with it
        let scale = view.core_scale;
        ctx.set_stroke_style_str(BRAIN_LINE_COLOR);
        ctx.set_global_alpha(1.0);
        ctx.set_line_width(BRAIN_OUTLINE_WIDTH_PX * dpr);
        ctx.begin_path();
        let mut pen_down = false;
        for point in &self.brain.outline {
            match cam.project(&vp, *point * scale).map(to_screen) {
                Some((x, y)) if pen_down => ctx.line_to(x, y),
                Some((x, y)) => {
                    ctx.move_to(x, y);
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
        ctx.stroke();

        self.projected.clear();
        self.projected.extend(
            self.brain
                .neurons
                .iter()
                .map(|n| cam.project(&vp, *n * scale).map(to_screen)),
        );
        ctx.set_global_alpha(BRAIN_LINK_ALPHA);
        ctx.set_line_width(BRAIN_LINK_WIDTH_PX * dpr);
        ctx.begin_path();
        for (i, j) in self.brain.edges() {
            if let (Some((ax, ay)), Some((bx, by))) = (self.projected[i], self.projected[j]) {
                ctx.move_to(ax, ay);
                ctx.line_to(bx, by);
            }
        }
        ctx.stroke();

        let neuron_size = NEURON_SIZE_PX * dpr;
        ctx.set_global_alpha(NEURON_IDLE_ALPHA);
        ctx.set_fill_style_str(NEURON_COLOR);
        for (x, y) in self.projected.iter().flatten() {
            fill_circle(ctx, *x, *y, neuron_size);
        }
        ctx.set_fill_style_str(FLASH_COLOR);
        for (i, screen) in self.projected.iter().enumerate() {
            let glow = view.flashes.intensity(i);
            if glow <= 0.0 {
                continue;
            }
            if let Some((x, y)) = screen {
                ctx.set_global_alpha(glow as f64);
                fill_circle(ctx, *x, *y, neuron_size * (1.0 + glow as f64));
            }
        }

        // Particles, batched per state so alpha changes stay rare
        let size = POINT_SIZE_PX * dpr;
        ctx.set_fill_style_str(PARTICLE_COLOR);
        for (state, alpha) in [
            (ParticleState::Orbiting, ALPHA_ORBITING),
            (ParticleState::Spiraling, ALPHA_SPIRALING),
            (ParticleState::Attached, ALPHA_ATTACHED),
        ] {
            ctx.set_global_alpha(alpha);
            for p in view.field.particles().iter().filter(|p| p.state == state) {
                if let Some(ndc) = cam.project(&vp, p.position) {
                    let (x, y) = to_screen(ndc);
                    ctx.fill_rect(x - size * 0.5, y - size * 0.5, size, size);
                }
            }
        }
        ctx.set_global_alpha(1.0);
    }
}

fn fill_circle(ctx: &web::CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    ctx.begin_path();
    if ctx.arc(x, y, r.max(0.0), 0.0, TAU).is_ok() {
        ctx.fill();
    }
}

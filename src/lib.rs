#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use flow_core::constants::BRAIN_NEURON_COUNT;
use flow_core::{BrainNetwork, CoreBreath, FlashScheduler, MotionParams, ParticleField};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod render;

/// Resolve the canvas' `data-preset` attribute, falling back to the default
/// preset for missing or unknown names.
fn params_for(canvas: &web::HtmlCanvasElement) -> MotionParams {
    let name = dom::data_attribute(canvas, PRESET_ATTR).unwrap_or_else(|| DEFAULT_PRESET.into());
    match MotionParams::preset(&name) {
        Some(p) => p,
        None => {
            log::warn!(
                "unknown preset {:?}, expected one of {:?}; using {}",
                name,
                MotionParams::PRESET_NAMES,
                DEFAULT_PRESET
            );
            MotionParams::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flow-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::wire_canvas_resize(&canvas);

    let params = params_for(&canvas);
    let seed: u64 = rand::random();
    let core_radius = params.core_radius;
    let field = ParticleField::new(params, seed)?;
    log::info!(
        "[field] particles={} surface={:?}",
        field.len(),
        field.params().surface
    );

    let brain = BrainNetwork::new(BRAIN_NEURON_COUNT, core_radius, seed ^ BRAIN_SEED_SALT);
    let neurons = brain.len();
    let renderer = render::CanvasRenderer::new(&canvas, brain)?;
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        field,
        flashes: FlashScheduler::new(neurons, seed ^ FLASH_SEED_SALT),
        breath: CoreBreath::default(),
        renderer,
        canvas,
        started: now,
        last_instant: now,
        fired: Vec::with_capacity(neurons),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

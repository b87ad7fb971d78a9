use crate::constants::STATS_LOG_EVERY;
use crate::dom;
use crate::render::{CanvasRenderer, FrameView};
use flow_core::{CoreBreath, FlashScheduler, ParticleField};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: ParticleField,
    pub flashes: FlashScheduler,
    pub breath: CoreBreath,
    pub renderer: CanvasRenderer,
    pub canvas: web::HtmlCanvasElement,

    pub started: Instant,
    pub last_instant: Instant,
    pub fired: Vec<usize>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        self.field.update(elapsed);
        self.fired.clear();
        self.flashes.tick(dt_sec, &mut self.fired);

        let stats = self.field.stats();
        if stats.frames % STATS_LOG_EVERY == 0 {
            log::debug!(
                "[frame] t={:.1}s attached={} respawns={} flashes={}",
                elapsed,
                stats.attachments,
                stats.respawns,
                self.fired.len()
            );
        }

        let view = FrameView {
            elapsed,
            core_scale: self.breath.scale(elapsed),
            field: &self.field,
            flashes: &self.flashes,
        };
        self.renderer.draw(
            self.canvas.width(),
            self.canvas.height(),
            dom::device_pixel_ratio(),
            &view,
        );
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until the page goes away.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// web.rs - Browser glue
//
// Mounts the simulation on a <canvas>: sizes it to its container, listens
// for pointer moves and window resizes, and runs the animation-frame loop.
//
// Ownership: the frame closure owns the WaveWorld and the 2d context.
// Event closures only push intents into the shared queue.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, Window};

use crate::config::WaveConfig;
use crate::error::EngineError;
use crate::render::{self, Gradient, Surface};
use crate::sim::{Intent, IntentQueue, WaveWorld};

// ============================================================================
// Canvas surface
// ============================================================================

pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Surface for Canvas2d {
    fn clear(&mut self, w: f32, h: f32) {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ctx.line_to(x as f64, y as f64);
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        self.ctx.quadratic_curve_to(cpx as f64, cpy as f64, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, r: f32, start: f32, end: f32, anticlockwise: bool) {
        let drawn = self.ctx.arc_with_anticlockwise(
            x as f64, y as f64, r as f64, start as f64, end as f64, anticlockwise,
        );
        if let Err(e) = drawn {
            log::warn!("arc r={r} rejected: {e:?}");
        }
    }

    fn set_fill_gradient(&mut self, g: &Gradient) {
        let gradient =
            self.ctx.create_linear_gradient(g.x0 as f64, g.y0 as f64, g.x1 as f64, g.y1 as f64);
        for (offset, color) in g.stops {
            if let Err(e) = gradient.add_color_stop(offset, color) {
                log::warn!("bad gradient stop {color:?}: {e:?}");
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }
}

// ============================================================================
// Shared loop state
// ============================================================================

struct Shared {
    intents: RefCell<IntentQueue>,
    cancelled: Cell<bool>,
    frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    pending: Cell<Option<i32>>,
    // (particles, bubbles) after the last frame
    counts: Cell<(usize, usize)>,
}

impl Shared {
    fn new() -> Self {
        Self {
            intents: RefCell::new(IntentQueue::new()),
            cancelled: Cell::new(false),
            frame: RefCell::new(None),
            pending: Cell::new(None),
            counts: Cell::new((0, 0)),
        }
    }

    fn push(&self, intent: Intent) {
        self.intents.borrow_mut().push(intent);
    }

    fn take_intents(&self) -> Vec<Intent> {
        self.intents.borrow_mut().drain().collect()
    }

    fn request_frame(&self, window: &Window) -> Result<(), EngineError> {
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else { return Ok(()) };
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.pending.set(Some(id));
        Ok(())
    }
}

struct Listeners {
    pointer: Closure<dyn FnMut(MouseEvent)>,
    resize: Closure<dyn FnMut()>,
}

impl Listeners {
    fn new(canvas: &HtmlCanvasElement, container: &Element, shared: &Rc<Shared>) -> Self {
        let queue = shared.clone();
        let target = canvas.clone();
        let pointer = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            queue.push(Intent::PointerMove { x: x as f32, y: y as f32 });
        }) as Box<dyn FnMut(MouseEvent)>);

        let queue = shared.clone();
        let host = container.clone();
        let resize = Closure::wrap(Box::new(move || {
            let (width, height) = container_size(&host);
            queue.push(Intent::Resize { width, height });
        }) as Box<dyn FnMut()>);

        Self { pointer, resize }
    }

    /// Register both listeners. If either fails, both are removed again
    /// before the closures are dropped.
    fn attach(self, window: &Window, canvas: &HtmlCanvasElement) -> Result<Self, EngineError> {
        let pointer = self.pointer.as_ref().unchecked_ref();
        let resize = self.resize.as_ref().unchecked_ref();
        let added = canvas
            .add_event_listener_with_callback("mousemove", pointer)
            .and_then(|()| window.add_event_listener_with_callback("resize", resize));

        match added {
            Ok(()) => Ok(self),
            Err(e) => {
                self.detach(window, canvas);
                Err(e.into())
            }
        }
    }

    // Removing a listener that was never added is a no-op
    fn detach(self, window: &Window, canvas: &HtmlCanvasElement) {
        let pointer = self.pointer.as_ref().unchecked_ref();
        if let Err(e) = canvas.remove_event_listener_with_callback("mousemove", pointer) {
            log::warn!("failed to remove mousemove listener: {e:?}");
        }
        let resize = self.resize.as_ref().unchecked_ref();
        if let Err(e) = window.remove_event_listener_with_callback("resize", resize) {
            log::warn!("failed to remove resize listener: {e:?}");
        }
    }
}

fn container_size(container: &Element) -> (u32, u32) {
    (container.client_width().max(0) as u32, container.client_height().max(0) as u32)
}

// ============================================================================
// Public handle
// ============================================================================

/// A running wave animation bound to one canvas. Dropping it (or calling
/// `free()` from JS) tears everything down.
#[wasm_bindgen]
pub struct WaveCanvas {
    window: Window,
    canvas: HtmlCanvasElement,
    shared: Rc<Shared>,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl WaveCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, canvas_id: &str) -> Result<WaveCanvas, JsValue> {
        Self::mount(container_id, canvas_id, WaveConfig::default()).map_err(not_mounted)
    }

    /// Like `new`, with a JSON object overriding any WaveConfig fields.
    pub fn with_config(
        container_id: &str,
        canvas_id: &str,
        config_json: &str,
    ) -> Result<WaveCanvas, JsValue> {
        WaveConfig::from_json(config_json)
            .and_then(|config| Self::mount(container_id, canvas_id, config))
            .map_err(not_mounted)
    }

    /// Disturb the surface at canvas x. Applied on the next frame.
    pub fn impulse(&self, x: f32, force: f32) {
        self.shared.push(Intent::Impulse { x, force });
    }

    pub fn spawn_bubble(&self) {
        self.shared.push(Intent::SpawnBubble);
    }

    pub fn is_running(&self) -> bool {
        !self.shared.cancelled.get()
    }

    pub fn particle_count(&self) -> usize {
        self.shared.counts.get().0
    }

    pub fn bubble_count(&self) -> usize {
        self.shared.counts.get().1
    }

    /// Stop the loop and release every listener and pending frame.
    pub fn stop(&mut self) {
        if self.shared.cancelled.replace(true) {
            return;
        }
        if let Some(listeners) = self.listeners.take() {
            listeners.detach(&self.window, &self.canvas);
        }
        if let Some(id) = self.shared.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel frame {id}: {e:?}");
            }
        }
        // Breaks the closure -> Shared -> closure cycle
        drop(self.shared.frame.borrow_mut().take());
        log::info!("wave canvas stopped");
    }
}

impl WaveCanvas {
    fn mount(
        container_id: &str,
        canvas_id: &str,
        config: WaveConfig,
    ) -> Result<WaveCanvas, EngineError> {
        let window = web_sys::window().ok_or(EngineError::MissingWindow)?;
        let document = window.document().ok_or(EngineError::MissingWindow)?;

        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| EngineError::MissingElement(container_id.into()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| EngineError::MissingElement(canvas_id.into()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::NotACanvas(canvas_id.into()))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::NoContext)?;

        let (w, h) = container_size(&container);
        canvas.set_width(w);
        canvas.set_height(h);

        let world = WaveWorld::new(w, h, config, crate::random_seed());
        let shared = Rc::new(Shared::new());
        shared.push(Intent::SpawnBubble);

        let listeners = Listeners::new(&canvas, &container, &shared).attach(&window, &canvas)?;
        let mut handle = WaveCanvas { window, canvas, shared, listeners: Some(listeners) };

        // On failure the handle drops here and detaches the listeners
        handle.start(world, Canvas2d { ctx })?;

        log::info!("wave canvas mounted at {w}x{h}");
        Ok(handle)
    }

    fn start(&mut self, mut world: WaveWorld, mut surface: Canvas2d) -> Result<(), EngineError> {
        let state = self.shared.clone();
        let window = self.window.clone();
        let canvas = self.canvas.clone();

        let tick = Closure::wrap(Box::new(move |now: f64| {
            if state.cancelled.get() {
                let _ = state.frame.borrow_mut().take();
                return;
            }

            for intent in state.take_intents() {
                if let Intent::Resize { width, height } = intent {
                    canvas.set_width(width);
                    canvas.set_height(height);
                }
                world.apply(intent);
            }

            world.tick(now);
            render::draw_frame(&mut surface, &world);
            state.counts.set((world.field().len(), world.bubbles().len()));

            if let Err(e) = state.request_frame(&window) {
                log::error!("failed to schedule next frame: {e}");
            }
        }) as Box<dyn FnMut(f64)>);

        *self.shared.frame.borrow_mut() = Some(tick);
        self.shared.request_frame(&self.window)
    }
}

impl Drop for WaveCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

fn not_mounted(err: EngineError) -> JsValue {
    log::warn!("wave canvas not mounted: {err}");
    err.into()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture(id: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        container.set_id(&format!("{id}-box"));
        container.set_attribute("style", "width: 600px; height: 400px").unwrap();
        let canvas = document.create_element("canvas").unwrap();
        canvas.set_id(&format!("{id}-canvas"));
        container.append_child(&canvas).unwrap();
        document.body().unwrap().append_child(&container).unwrap();
    }

    #[wasm_bindgen_test]
    fn mount_sizes_canvas_to_container() {
        fixture("mount");
        let mut wave = WaveCanvas::new("mount-box", "mount-canvas").unwrap();

        assert_eq!((wave.canvas.width(), wave.canvas.height()), (600, 400));
        assert!(wave.is_running());

        wave.stop();
        assert!(!wave.is_running());
        assert!(wave.shared.frame.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn missing_elements_abort_mounting() {
        assert!(WaveCanvas::new("no-such-box", "no-such-canvas").is_err());

        fixture("plain");
        assert!(WaveCanvas::new("plain-box", "plain-box").is_err());
    }

    #[wasm_bindgen_test]
    fn bad_config_is_rejected() {
        fixture("config");
        let json = r#"{ "friction": 1.0 }"#;
        assert!(WaveCanvas::with_config("config-box", "config-canvas", json).is_err());
    }

    fn parts(id: &str) -> (Window, HtmlCanvasElement, Element) {
        fixture(id);
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let container = document.get_element_by_id(&format!("{id}-box")).unwrap();
        let canvas = document
            .get_element_by_id(&format!("{id}-canvas"))
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        (window, canvas, container)
    }

    fn move_pointer(canvas: &HtmlCanvasElement) {
        let event = MouseEvent::new("mousemove").unwrap();
        canvas.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn pointer_moves_queue_until_detached() {
        let (window, canvas, container) = parts("route");
        let shared = Rc::new(Shared::new());
        let listeners = Listeners::new(&canvas, &container, &shared)
            .attach(&window, &canvas)
            .unwrap();

        move_pointer(&canvas);
        let queued = shared.take_intents();
        assert_eq!(queued.len(), 1);
        assert!(matches!(queued[0], Intent::PointerMove { .. }));

        listeners.detach(&window, &canvas);
        move_pointer(&canvas);
        assert!(shared.take_intents().is_empty());
    }

    #[wasm_bindgen_test]
    fn detaching_unregistered_listeners_is_harmless() {
        let (window, canvas, container) = parts("unattached");
        let shared = Rc::new(Shared::new());

        Listeners::new(&canvas, &container, &shared).detach(&window, &canvas);
        move_pointer(&canvas);
        assert!(shared.take_intents().is_empty());
    }

    #[wasm_bindgen_test]
    fn stopped_canvas_ignores_pointer_moves() {
        let (_, canvas, _) = parts("stopped");
        let mut wave = WaveCanvas::new("stopped-box", "stopped-canvas").unwrap();
        wave.stop();
        wave.shared.take_intents();

        move_pointer(&canvas);
        assert!(wave.shared.take_intents().is_empty());
    }
}

// canvas.rs - Browser glue
//
// Canvas 2D backend for the Surface trait, plus the exported wasm type
// that owns the renderer, wires pointer/resize listeners, and drives the
// requestAnimationFrame loop. Event handlers only mutate renderer state;
// drawing happens exclusively inside the frame callback.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent};

use crate::field::FieldRenderer;
use crate::render::{Rgb, Surface};

/// Surface backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_line_cap("round");
        Self { ctx }
    }

    fn css(color: Rgb, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, alpha)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, w: f32, h: f32) {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn stroke_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb, alpha: f32, width: f32) {
        self.ctx.set_stroke_style_str(&Self::css(color, alpha));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32) {
        self.ctx.set_fill_style_str(&Self::css(color, alpha));
        self.ctx.begin_path();
        self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU).ok();
        self.ctx.fill();
    }
}

struct Inner {
    renderer: FieldRenderer,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
}

impl Inner {
    /// Adopt the canvas's CSS box as both backing-store and viewport size.
    fn sync_size(&mut self) {
        let w = self.canvas.client_width().max(0) as u32;
        let h = self.canvas.client_height().max(0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.renderer.resize(w as f32, h as f32);
    }

    fn tick(&mut self) {
        // A hidden container measures 0x0; keep re-measuring so the field
        // appears as soon as the canvas gets a real box.
        if self.renderer.width() <= 0.0 || self.renderer.height() <= 0.0 {
            self.sync_size();
        }
        self.renderer.frame(&mut self.surface);
    }
}

/// Animated vector field bound to one canvas element.
#[wasm_bindgen]
pub struct FieldBackground {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl FieldBackground {
    /// Bind to a canvas. Fails if the element cannot supply a 2D context;
    /// callers that tolerate a missing background simply skip construction.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<FieldBackground, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut inner = Inner {
            renderer: FieldRenderer::new(0.0, 0.0),
            surface: CanvasSurface::new(ctx),
            canvas,
        };
        inner.sync_size();

        let bg = FieldBackground { inner: Rc::new(RefCell::new(inner)) };
        bg.attach_listeners()?;
        Ok(bg)
    }

    /// Look the canvas up by element id. Returns an error (not a panic)
    /// when the element is absent, so pages without the background stay
    /// untouched.
    pub fn mount(canvas_id: &str) -> Result<FieldBackground, JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        Self::new(canvas)
    }

    /// Begin the self-rescheduling frame loop. Runs until stop(); each
    /// callback does exactly one compute + draw and re-registers itself.
    pub fn start(&self) -> Result<(), JsValue> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.renderer.is_running() {
                return Ok(());
            }
            inner.renderer.start();
        }

        let handle = self.inner.clone();
        let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let slot2 = slot.clone();

        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let mut inner = handle.borrow_mut();
            if !inner.renderer.is_running() {
                // Not rescheduling ends the loop; start() re-enters it.
                return;
            }
            inner.tick();
            drop(inner);

            if let Some(cb) = slot2.borrow().as_ref() {
                request_frame(cb.as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = slot.borrow().as_ref() {
            request_frame(cb.as_ref().unchecked_ref());
        }
        Ok(())
    }

    /// Stop rescheduling. The frame in flight finishes normally.
    pub fn stop(&self) {
        self.inner.borrow_mut().renderer.stop();
    }

    /// Run one frame synchronously (for JS-driven stepping).
    pub fn frame(&self) {
        self.inner.borrow_mut().tick();
    }

    /// Re-measure the canvas box. Also called by the attached window
    /// resize listener.
    pub fn resize(&self) {
        self.inner.borrow_mut().sync_size();
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        self.inner.borrow_mut().renderer.pointer_move(x, y);
    }

    pub fn pointer_leave(&self) {
        self.inner.borrow_mut().renderer.pointer_leave();
    }

    fn attach_listeners(&self) -> Result<(), JsValue> {
        let canvas = self.inner.borrow().canvas.clone();

        {
            let handle = self.inner.clone();
            let on_move = Closure::wrap(Box::new(move |e: PointerEvent| {
                handle
                    .borrow_mut()
                    .renderer
                    .pointer_move(e.offset_x() as f32, e.offset_y() as f32);
            }) as Box<dyn FnMut(PointerEvent)>);
            canvas.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref())?;
            on_move.forget();
        }

        {
            let handle = self.inner.clone();
            let on_leave = Closure::wrap(Box::new(move |_: PointerEvent| {
                handle.borrow_mut().renderer.pointer_leave();
            }) as Box<dyn FnMut(PointerEvent)>);
            canvas.add_event_listener_with_callback("pointerleave", on_leave.as_ref().unchecked_ref())?;
            on_leave.forget();
        }

        if let Some(window) = web_sys::window() {
            let handle = self.inner.clone();
            let on_resize = Closure::wrap(Box::new(move || {
                handle.borrow_mut().sync_size();
            }) as Box<dyn FnMut()>);
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
            on_resize.forget();
        }

        Ok(())
    }
}

fn request_frame(cb: &js_sys::Function) {
    if let Some(window) = web_sys::window() {
        window.request_animation_frame(cb).ok();
    }
}

// Browser host for the orb field: owns the canvas and its 2D context, turns
// window events into field calls and keeps the requestAnimationFrame loop alive.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::ParticleField;

/// Attribute a page can put on the canvas to override field settings.
pub const CONFIG_ATTRIBUTE: &str = "data-aurora";

#[wasm_bindgen]
pub struct AuroraCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField,
    pending_size: Option<(u32, u32)>,
}

#[wasm_bindgen]
impl AuroraCanvas {
    /// Binds to `canvas` at its current pixel size, using the JSON in its
    /// `data-aurora` attribute if present.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<AuroraCanvas, JsValue> {
        let config = match canvas.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => FieldConfig::from_json(&json)?,
            None => FieldConfig::default(),
        };
        Ok(Self::build(canvas, &config)?)
    }

    pub fn with_config(canvas: HtmlCanvasElement, config_json: &str) -> Result<AuroraCanvas, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        Ok(Self::build(canvas, &config)?)
    }

    /// Records the latest surface size; applied at the start of the next tick.
    pub fn request_resize(&mut self, width: u32, height: u32) {
        self.pending_size = Some((width, height));
    }

    /// Pointer position in canvas pixels.
    pub fn repel(&mut self, x: f64, y: f64) {
        self.field.repel(x, y);
    }

    /// Pointer position in viewport coordinates, e.g. `MouseEvent.clientX/Y`.
    pub fn repel_client(&mut self, client_x: f64, client_y: f64) {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        self.field.repel(
            (client_x - rect.left()) * scale_x,
            (client_y - rect.top()) * scale_y,
        );
    }

    pub fn tick(&mut self) {
        #[cfg(feature = "frame_timers")]
        let _timer = crate::utils::Timer::new("AuroraCanvas::tick");
        if let Some((width, height)) = self.pending_size.take() {
            self.apply_size(width, height);
        }
        self.field.frame(&mut self.context);
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }
}

impl AuroraCanvas {
    fn build(canvas: HtmlCanvasElement, config: &FieldConfig) -> Result<AuroraCanvas, FieldError> {
        let context = context_2d(&canvas)?;
        let field = ParticleField::new(canvas.width(), canvas.height(), config)?;
        Ok(AuroraCanvas {
            canvas,
            context,
            field,
            pending_size: None,
        })
    }

    fn apply_size(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.field.resize(width, height);
        log::debug!("orb field resized to {}x{}", width, height);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
    canvas
        .get_context("2d")
        .map_err(|err| FieldError::SurfaceUnavailable(format!("{:?}", err)))?
        .ok_or_else(|| FieldError::SurfaceUnavailable("no 2d context".to_owned()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| FieldError::SurfaceUnavailable("context is not 2d".to_owned()))
}

fn window_size(window: &Window) -> Option<(u32, u32)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as u32, height as u32))
}

fn request_animation_frame(window: &Window, f: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(f.as_ref().unchecked_ref())
}

/// Starts the background animation on the canvas with id `canvas_id`, sized
/// to the window. Pages without the canvas or a 2D context are left alone.
#[wasm_bindgen]
pub fn start_aurora(canvas_id: &str) -> Result<(), JsValue> {
    crate::initialize();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = match document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(canvas) => canvas,
        None => {
            log::info!("no canvas #{}, skipping orb animation", canvas_id);
            return Ok(());
        }
    };

    if let Some((width, height)) = window_size(&window) {
        canvas.set_width(width);
        canvas.set_height(height);
    }

    let aurora = match AuroraCanvas::new(canvas) {
        Ok(aurora) => Rc::new(RefCell::new(aurora)),
        Err(err) => {
            log::info!("orb animation disabled: {:?}", err);
            return Ok(());
        }
    };

    {
        let aurora = aurora.clone();
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some((width, height)) = window_size(&resize_window) {
                aurora.borrow_mut().request_resize(width, height);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    {
        let aurora = aurora.clone();
        let on_pointer = Closure::wrap(Box::new(move |event: MouseEvent| {
            aurora
                .borrow_mut()
                .repel_client(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;
        on_pointer.forget();
    }

    // The frame callback re-registers itself through `next`.
    let next: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let first = next.clone();
    let frame_window = window.clone();
    *first.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        aurora.borrow_mut().tick();
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(err) = request_animation_frame(&frame_window, callback) {
                log::warn!("requestAnimationFrame failed, stopping: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = first.borrow().as_ref() {
        request_animation_frame(&window, callback)?;
    }
    Ok(())
}

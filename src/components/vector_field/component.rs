//! Leptos component wrapping the vector-field canvas.
//!
//! The component creates an HTML canvas element and wires up mouse event
//! handlers for pointer-proximity interaction. An animation loop runs via
//! `requestAnimationFrame`, advancing the simulation and renderer each frame.
//! A `ResizeObserver` on the host container rebuilds the surface and
//! resamples the glyph when dimensions change, and `on_cleanup` cancels the
//! pending frame and detaches everything exactly once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, ResizeObserver, Window};

use super::config::FieldConfig;
use super::field::{PointerState, VectorField};
use super::render;
use super::rng::FieldRng;
use super::sampler;
use super::theme::FieldTheme;

/// Lifecycle of the animation driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverPhase {
	Uninitialized,
	Running,
	TornDown,
}

/// Bundles the simulation with the pointer mailbox and visual configuration.
struct FieldContext {
	field: VectorField,
	pointer: PointerState,
	theme: FieldTheme,
	text: String,
}

fn device_pixel_ratio(window: &Window) -> f64 {
	let dpr = window.device_pixel_ratio();
	if dpr > 0.0 { dpr } else { 1.0 }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// CSS (render-space) size for the canvas: explicit props win, fullscreen
/// tracks the window, otherwise the parent container decides.
fn css_size(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		(
			window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(800.0),
			window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(600.0),
		)
	} else {
		(
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		)
	}
}

/// Sizes the backing buffer to `css × dpr`, pins the CSS size, and re-applies
/// the DPR scale (resizing the buffer resets the context transform).
fn configure_surface(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	dpr: f64,
) {
	canvas.set_width((width * dpr) as u32);
	canvas.set_height((height * dpr) as u32);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
	let _ = ctx.scale(dpr, dpr);
}

/// Samples the current text at the current surface size and swaps in the new
/// particle generation.
fn resample(
	c: &mut FieldContext,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	dpr: f64,
) {
	let anchors = sampler::sample_text(
		ctx,
		&c.text,
		canvas.width(),
		canvas.height(),
		dpr,
		c.field.config(),
	);
	c.field.repopulate(&anchors, &c.theme);
	info!(
		"glyph-field: sampled {} particles from {:?}",
		c.field.particles.len(),
		c.text
	);
}

/// Renders an interactive particle vector field on a canvas element.
///
/// The given text is rasterized and decomposed into particles that swarm
/// toward their glyph positions while reacting to the pointer and a periodic
/// radial pulse. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport. Explicit
/// `width`/`height` override automatic sizing.
#[component]
pub fn VectorFieldCanvas(
	#[prop(into)] text: Signal<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = None)] theme: Option<FieldTheme>,
	#[prop(default = None)] config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let observer: Rc<RefCell<Option<ResizeObserver>>> = Rc::new(RefCell::new(None));
	let raf_handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let phase: Rc<Cell<DriverPhase>> = Rc::new(Cell::new(DriverPhase::Uninitialized));

	let (context_init, animate_init, resize_cb_init, observer_init, raf_init, phase_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		observer.clone(),
		raf_handle.clone(),
		phase.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if phase_init.get() != DriverPhase::Uninitialized {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let dpr = device_pixel_ratio(&window);

		let Some(ctx) = context_2d(&canvas) else {
			// No drawing surface: render nothing rather than erroring.
			warn!("glyph-field: 2d context unavailable, field disabled");
			return;
		};

		let (w, h) = css_size(&canvas, &window, fullscreen, width, height);
		configure_surface(&canvas, &ctx, w, h, dpr);

		let field = VectorField::new(
			config.clone().unwrap_or_default(),
			w,
			h,
			FieldRng::new(js_sys::Date::now() as u64),
		);
		let pointer_radius = field.config().pointer_radius;
		let mut initial = FieldContext {
			field,
			pointer: PointerState::new(pointer_radius),
			theme: theme.clone().unwrap_or_default(),
			text: text.get_untracked(),
		};
		resample(&mut initial, &canvas, &ctx, dpr);
		*context_init.borrow_mut() = Some(initial);

		let (context_resize, canvas_resize, ctx_resize, phase_resize) = (
			context_init.clone(),
			canvas.clone(),
			ctx.clone(),
			phase_init.clone(),
		);
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if phase_resize.get() == DriverPhase::TornDown {
				return;
			}
			let win: Window = web_sys::window().unwrap();
			let ndpr = device_pixel_ratio(&win);
			let (nw, nh) = css_size(&canvas_resize, &win, fullscreen, width, height);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				if nw == c.field.width() && nh == c.field.height() {
					return;
				}
				configure_surface(&canvas_resize, &ctx_resize, nw, nh, ndpr);
				c.field.resize(nw, nh);
				resample(c, &canvas_resize, &ctx_resize, ndpr);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			if let Ok(obs) = ResizeObserver::new(cb.as_ref().unchecked_ref()) {
				if let Some(parent) = canvas.parent_element() {
					obs.observe(&parent);
				}
				*observer_init.borrow_mut() = Some(obs);
			}
		}

		let (context_anim, animate_inner, phase_anim, raf_anim) = (
			context_init.clone(),
			animate_init.clone(),
			phase_init.clone(),
			raf_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if phase_anim.get() == DriverPhase::TornDown {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let FieldContext {
					field,
					pointer,
					theme,
					..
				} = c;
				field.tick(timestamp, pointer);
				render::render(field, &ctx, theme, timestamp);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(handle) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					raf_anim.set(Some(handle));
				}
			}
		}));
		phase_init.set(DriverPhase::Running);
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_init.set(Some(handle));
			}
		}
	});

	// Text changes resample in place; the driver keeps running.
	let (context_text, phase_text) = (context.clone(), phase.clone());
	Effect::new(move |_| {
		let current = text.get();
		if phase_text.get() != DriverPhase::Running {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut c) = *context_text.borrow_mut() {
			if c.text == current {
				return;
			}
			c.text = current;
			let window: Window = web_sys::window().unwrap();
			if let Some(ctx) = context_2d(&canvas) {
				resample(c, &canvas, &ctx, device_pixel_ratio(&window));
			}
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.pointer.set(x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.pointer.clear();
		}
	};

	let (animate_cleanup, resize_cleanup, observer_cleanup, raf_cleanup, phase_cleanup) = (
		animate.clone(),
		resize_cb.clone(),
		observer.clone(),
		raf_handle.clone(),
		phase.clone(),
	);
	// The cleanup captures `!Send` wasm/`Rc` state, but leptos' `on_cleanup`
	// requires `Send + Sync`. Wrapping the closure in `SendWrapper` satisfies
	// the bound; it is sound here because the app is single-threaded CSR wasm.
	let cleanup = SendWrapper::new(move || {
		if phase_cleanup.get() == DriverPhase::TornDown {
			return;
		}
		phase_cleanup.set(DriverPhase::TornDown);
		if let Some(handle) = raf_cleanup.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		if let Some(obs) = observer_cleanup.borrow_mut().take() {
			obs.disconnect();
		}
		animate_cleanup.borrow_mut().take();
		resize_cleanup.borrow_mut().take();
	});
	on_cleanup(move || (cleanup.take())());

	view! {
		<canvas
			node_ref=canvas_ref
			class="vector-field-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}

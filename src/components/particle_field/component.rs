//! Leptos component mounting the particle field on a canvas.
//!
//! The component creates an HTML canvas behind the page content, forwards
//! window pointer and resize events into [`FieldState`], and drives it from a
//! `requestAnimationFrame` loop. Everything registered here is released when
//! the component's owner is disposed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::state::FieldState;

type Shared<T> = Rc<RefCell<T>>;

/// A DOM event listener that stays registered for as long as it is held.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn register(
		target: &EventTarget,
		event: &'static str,
		callback: Closure<dyn FnMut(Event)>,
	) -> Option<Self> {
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Everything the running animation holds on to.
struct Mounted {
	frame_id: Rc<Cell<Option<i32>>>,
	animate: Shared<Option<Closure<dyn FnMut()>>>,
	_listeners: Vec<Listener>,
}

impl Drop for Mounted {
	fn drop(&mut self) {
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// The frame closure holds itself; dropping it here breaks the cycle.
		self.animate.borrow_mut().take();
		info!("particle-field: unmounted");
	}
}

/// Renders the interactive particle field on a canvas element.
///
/// The canvas fills its positioned parent and ignores pointer events itself;
/// interaction is read from window-level events so it works underneath
/// foreground content. Pass `config` to override the default tuning.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(optional)] config: FieldConfig,
	#[prop(default = "")] class: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted = StoredValue::new_local(None::<Mounted>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		// Replacing the previous mount tears it down first.
		mounted.set_value(mount(&window, canvas, config.clone()));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=format!("particle-field-canvas {class}")
			style="position: absolute; inset: 0; z-index: 0; display: block; pointer-events: none;"
		/>
	}
}

fn mount(window: &Window, canvas: HtmlCanvasElement, config: FieldConfig) -> Option<Mounted> {
	let (w, h) = surface_size(window, &canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let state: Shared<FieldState> = Rc::new(RefCell::new(FieldState::new(config, w, h)));
	info!(
		"particle-field: mounted {}x{} with {} particles",
		w,
		h,
		state.borrow().field.len()
	);

	let mut listeners = Vec::with_capacity(4);

	let (state_mm, canvas_mm) = (state.clone(), canvas.clone());
	listeners.extend(Listener::register(
		window,
		"mousemove",
		Closure::new(move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let (x, y) = local_point(&canvas_mm, ev);
			if let Ok(mut s) = state_mm.try_borrow_mut() {
				s.pointer_move(x, y);
			}
		}),
	));

	let (state_md, canvas_md) = (state.clone(), canvas.clone());
	listeners.extend(Listener::register(
		window,
		"mousedown",
		Closure::new(move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let (x, y) = local_point(&canvas_md, ev);
			if let Ok(mut s) = state_md.try_borrow_mut() {
				s.pointer_down(x, y);
			}
		}),
	));

	let (state_rs, canvas_rs) = (state.clone(), canvas.clone());
	listeners.extend(Listener::register(
		window,
		"resize",
		Closure::new(move |_: Event| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = surface_size(&win, &canvas_rs);
			if let Ok(mut s) = state_rs.try_borrow_mut() {
				if s.width == nw && s.height == nh {
					return;
				}
				canvas_rs.set_width(nw as u32);
				canvas_rs.set_height(nh as u32);
				s.resize(nw, nh);
			}
		}),
	));

	if let Some(root) = window.document().and_then(|d| d.document_element()) {
		let state_ml = state.clone();
		listeners.extend(Listener::register(
			&root,
			"mouseleave",
			Closure::new(move |_: Event| {
				if let Ok(mut s) = state_ml.try_borrow_mut() {
					s.pointer_leave();
				}
			}),
		));
	}

	let frame_id = Rc::new(Cell::new(None));
	let animate: Shared<Option<Closure<dyn FnMut()>>> = Rc::new(RefCell::new(None));
	let (animate_inner, frame_inner) = (animate.clone(), frame_id.clone());
	let mut ctx = context_2d(&canvas);
	if ctx.is_none() {
		warn!("particle-field: 2d context unavailable, drawing deferred");
	}

	*animate.borrow_mut() = Some(Closure::new(move || {
		if ctx.is_none() {
			ctx = context_2d(&canvas);
		}
		if let (Some(ctx), Ok(mut s)) = (ctx.as_ref(), state.try_borrow_mut()) {
			s.frame(ctx);
		}
		frame_inner.set(request_frame(&animate_inner));
	}));
	frame_id.set(request_frame(&animate));

	Some(Mounted {
		frame_id,
		animate,
		_listeners: listeners,
	})
}

fn request_frame(animate: &Shared<Option<Closure<dyn FnMut()>>>) -> Option<i32> {
	let cb = animate.borrow();
	let cb = cb.as_ref()?;
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Size of the canvas' parent, or the viewport when it has none.
fn surface_size(window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.or_else(|| {
			Some((
				window.inner_width().ok()?.as_f64()?,
				window.inner_height().ok()?.as_f64()?,
			))
		})
		.unwrap_or((0.0, 0.0))
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

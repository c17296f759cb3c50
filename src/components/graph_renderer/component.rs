//! Leptos component wiring the renderer to an HTML canvas.
//!
//! The component creates the canvas, attaches a [`ForceGraphSystem`] to a
//! [`Renderer`], and drives both from `requestAnimationFrame`. A press on the
//! canvas starts a drag; moves are then tracked on the canvas and the release
//! on the window, so a drag that leaves the canvas still ends cleanly.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::GraphConfig;
use super::events::RendererEvent;
use super::geometry::Point;
use super::interaction::{PointerOutcome, Tracking};
use super::labels::DataLabels;
use super::render::Renderer;
use super::surface::CanvasSurface;
use super::system::ForceGraphSystem;
use super::types::GraphData;

type CanvasRenderer = Renderer<CanvasSurface, ForceGraphSystem, DataLabels>;
type SharedRenderer = Rc<RefCell<Option<CanvasRenderer>>>;

/// Simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;

/// Move and release handlers that are attached only while a drag is in progress.
struct DragListeners {
	on_move: Closure<dyn FnMut(MouseEvent)>,
	on_up: Closure<dyn FnMut(MouseEvent)>,
}

impl DragListeners {
	fn apply(&self, canvas: &HtmlCanvasElement, tracking: Tracking) {
		let Some(window) = web_sys::window() else {
			return;
		};
		match tracking {
			Tracking::Begin => {
				let _ = canvas.add_event_listener_with_callback(
					"mousemove",
					self.on_move.as_ref().unchecked_ref(),
				);
				let _ = window
					.add_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
			}
			Tracking::End => {
				let _ = canvas.remove_event_listener_with_callback(
					"mousemove",
					self.on_move.as_ref().unchecked_ref(),
				);
				let _ = window.remove_event_listener_with_callback(
					"mouseup",
					self.on_up.as_ref().unchecked_ref(),
				);
			}
			Tracking::Unchanged => {}
		}
	}
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn finish(ev: &MouseEvent, outcome: PointerOutcome) {
	if outcome.prevent_default {
		ev.prevent_default();
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|w| w.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|h| h.as_f64())
			.unwrap_or(600.0),
	)
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// Nodes can be dragged; a press and release without dragging reports the
/// node's name through `on_node_click`. The component sizes itself to its
/// parent container by default; set `fullscreen = true` to fill the viewport
/// and follow window resizes. Explicit `width`/`height` override both.
#[component]
pub fn GraphRendererCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let renderer: SharedRenderer = Rc::new(RefCell::new(None));
	let drag: Rc<RefCell<Option<DragListeners>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (renderer_init, drag_init, animate_init, resize_cb_init) =
		(renderer.clone(), drag.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// New data for a mounted canvas only swaps the simulation.
		if let Some(r) = renderer_init.borrow_mut().as_mut() {
			let (w, h) = r.surface_mut().size();
			let tracking = r.init(ForceGraphSystem::new(&graph, config.simulation.clone()), w, h);
			if let Some(ref listeners) = *drag_init.borrow() {
				listeners.apply(&canvas, tracking);
			}
			return;
		}

		let Some(window) = web_sys::window() else {
			warn!("graph-renderer: no window, canvas stays blank");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
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
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("graph-renderer: 2d context unavailable, canvas stays blank");
			return;
		};

		let mut r = Renderer::new(
			CanvasSurface::new(ctx, w, h),
			DataLabels,
			config.renderer.clone(),
		);
		r.init(ForceGraphSystem::new(&graph, config.simulation.clone()), w, h);
		let _ = r.on(move |event| match event {
			RendererEvent::NodeClick(click) => {
				info!("graph-renderer: node clicked: {}", click.name);
				if let Some(cb) = on_node_click {
					cb.run(click.name.clone());
				}
			}
		});
		*renderer_init.borrow_mut() = Some(r);

		let (renderer_move, canvas_move) = (renderer_init.clone(), canvas.clone());
		let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			if let Some(ref mut r) = *renderer_move.borrow_mut() {
				finish(&ev, r.pointer_move(canvas_point(&canvas_move, &ev)));
			}
		});
		let (renderer_up, canvas_up, drag_up) =
			(renderer_init.clone(), canvas.clone(), drag_init.clone());
		let on_up = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let outcome = match *renderer_up.borrow_mut() {
				Some(ref mut r) => r.pointer_up(canvas_point(&canvas_up, &ev)),
				None => return,
			};
			finish(&ev, outcome);
			if let Some(ref listeners) = *drag_up.borrow() {
				listeners.apply(&canvas_up, outcome.tracking);
			}
		});
		*drag_init.borrow_mut() = Some(DragListeners { on_move, on_up });

		if fullscreen {
			let (renderer_resize, canvas_resize) = (renderer_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut r) = *renderer_resize.borrow_mut() {
					r.surface_mut().resize(nw, nh);
					r.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (renderer_anim, animate_inner) = (renderer_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut r) = *renderer_anim.borrow_mut() {
				if let Some(system) = r.system_mut() {
					system.tick(FRAME_DT);
				}
				r.redraw();
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), &*animate_inner.borrow()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
		info!("graph-renderer: mounted {w}x{h} canvas");
	});

	let (renderer_md, drag_md) = (renderer.clone(), drag.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let outcome = match *renderer_md.borrow_mut() {
			Some(ref mut r) => r.pointer_down(canvas_point(&canvas, &ev)),
			None => return,
		};
		finish(&ev, outcome);
		if let Some(ref listeners) = *drag_md.borrow() {
			listeners.apply(&canvas, outcome.tracking);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-renderer-canvas"
			on:mousedown=on_mousedown
			style="display: block; cursor: grab;"
		/>
	}
}

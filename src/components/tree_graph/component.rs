use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::model::layout::TreeGraph;
use crate::model::theme::Theme;

use super::export;
use super::render;
use super::state::TreeGraphState;

const FRAME_DT: f64 = 0.016;
/// Fits issued after new data arrives; the first frames may still be sizing the canvas.
const FIT_DELAYS_MS: [u64; 2] = [50, 300];
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Handle for issuing view commands to a mounted [`TreeGraphCanvas`].
///
/// Commands are best effort: before the canvas has initialised (or while a
/// frame holds the state) they are dropped with a debug log.
#[derive(Clone, Default)]
pub struct GraphController {
	state: Rc<RefCell<Option<TreeGraphState>>>,
}

impl GraphController {
	fn with_state(&self, command: &str, f: impl FnOnce(&mut TreeGraphState)) {
		match self.state.try_borrow_mut() {
			Ok(mut guard) => match guard.as_mut() {
				Some(state) => f(state),
				None => debug!("{command} ignored: canvas not initialised"),
			},
			Err(_) => debug!("{command} ignored: canvas busy"),
		}
	}

	pub fn zoom_in(&self) {
		self.with_state("zoom in", TreeGraphState::zoom_in);
	}

	pub fn zoom_out(&self) {
		self.with_state("zoom out", TreeGraphState::zoom_out);
	}

	pub fn fit_view(&self) {
		self.with_state("fit view", TreeGraphState::fit_view);
	}

	/// Animate the view to centre graph point `(x, y)` at the current zoom.
	pub fn center_on(&self, x: f64, y: f64) {
		self.with_state("center", |s| {
			let k = s.transform.k;
			s.center_on(x, y, k);
		});
	}

	pub fn highlight(&self, id: Option<&str>) {
		self.with_state("highlight", |s| {
			if !s.set_highlight(id) {
				debug!("highlight target {id:?} is not in the current graph");
			}
		});
	}

	/// Download the current tree, including node drags and highlight, as a PNG.
	pub fn export_png(&self, theme: Theme) {
		let mut result = Ok(());
		self.with_state("export", |s| {
			result = export::download_png(&s.graph, s.highlight, &theme.palette());
		});
		if let Err(err) = result {
			warn!("PNG export failed: {err:?}");
		}
	}
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn TreeGraphCanvas(
	#[prop(into)] data: Signal<Option<TreeGraph>>,
	#[prop(into)] highlight: Signal<Option<String>>,
	#[prop(into)] theme: Signal<Theme>,
	controller: GraphController,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = controller.state.clone();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
		let Some(ctx) = ctx else {
			warn!("Canvas 2d context unavailable; tree view disabled");
			return;
		};

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let graph = data.get_untracked().unwrap_or_default();
		*state_init.borrow_mut() = Some(TreeGraphState::new(graph, w, h));
		debug!("Tree canvas initialised at {w}x{h}");

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				let (w, h) = container_size(&canvas);
				if (w, h) != (s.width, s.height) {
					canvas.set_width(w as u32);
					canvas.set_height(h as u32);
					s.resize(w, h);
				}
				if s.is_animating() {
					s.tick(FRAME_DT);
				}
				render::render(s, &ctx, &theme.get_untracked().palette());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_data, controller_data) = (state.clone(), controller.clone());
	Effect::new(move |_| {
		let Some(graph) = data.get() else {
			return;
		};
		if let Ok(mut guard) = state_data.try_borrow_mut() {
			if let Some(s) = guard.as_mut() {
				s.set_graph(graph);
			}
		}
		for delay in FIT_DELAYS_MS {
			let c = controller_data.clone();
			set_timeout(move || c.fit_view(), Duration::from_millis(delay));
		}
	});

	let controller_hl = controller.clone();
	Effect::new(move |_| {
		let id = highlight.get();
		controller_hl.highlight(id.as_deref());
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if s.minimap_jump(x, y) {
				return;
			}
			match s.node_at_position(x, y) {
				Some(idx) => s.begin_drag(idx, x, y),
				None => s.begin_pan(x, y),
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_moved(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.release_pointer();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.release_pointer();
		}
	};

	let (state_dc, controller_dc) = (state.clone(), controller.clone());
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let target = state_dc.borrow().as_ref().and_then(|s| {
			if s.minimap().is_some_and(|m| m.contains(x, y)) {
				return None;
			}
			s.node_at_position(x, y)
				.map(|idx| s.graph.center_of(&s.graph.nodes[idx]))
		});
		if let Some((cx, cy)) = target {
			controller_dc.center_on(cx, cy);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="tree-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

use crate::model::layout::TreeGraph;

use super::minimap::Minimap;
use super::scale::{FIT_PADDING, ViewTransform, ZOOM_STEP, ease_out_cubic};

/// Length of the animated pan used by `center_on`.
pub const CENTER_DURATION: f64 = 0.8;
/// Zoom level the view settles at when focusing a search hit.
pub const FOCUS_ZOOM: f64 = 1.2;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
pub struct Transition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
}

pub struct TreeGraphState {
	pub graph: TreeGraph,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: Option<usize>,
	pub width: f64,
	pub height: f64,
	transition: Option<Transition>,
}

impl TreeGraphState {
	pub fn new(graph: TreeGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: None,
			width,
			height,
			transition: None,
		};
		state.fit_view();
		state
	}

	/// Swap in a freshly built graph; drops drag, highlight and any running transition.
	pub fn set_graph(&mut self, graph: TreeGraph) {
		self.graph = graph;
		self.drag = DragState::default();
		self.highlight = None;
		self.transition = None;
		self.fit_view();
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let (w, h) = self.graph.node_size;
		// last drawn wins, so search from the top of the stack
		let on_top = self.highlight.filter(|&i| {
			self.graph
				.nodes
				.get(i)
				.is_some_and(|n| gx >= n.x && gx <= n.x + w && gy >= n.y && gy <= n.y + h)
		});
		on_top.or_else(|| {
			self.graph
				.nodes
				.iter()
				.rposition(|n| gx >= n.x && gx <= n.x + w && gy >= n.y && gy <= n.y + h)
		})
	}

	pub fn zoom_in(&mut self) {
		self.zoom_centered(ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_centered(1.0 / ZOOM_STEP);
	}

	fn zoom_centered(&mut self, factor: f64) {
		self.transition = None;
		self.transform = self
			.transform
			.zoom_about(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Wheel zoom around the cursor.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.transition = None;
		self.transform = self.transform.zoom_about(sx, sy, factor);
	}

	pub fn fit_view(&mut self) {
		self.transition = None;
		if let Some(bounds) = self.graph.bounds() {
			self.transform = ViewTransform::fit(&bounds, self.width, self.height, FIT_PADDING);
		}
	}

	/// Start an eased pan/zoom that ends with graph point `(x, y)` in the middle of the view.
	pub fn center_on(&mut self, x: f64, y: f64, zoom: f64) {
		let to = ViewTransform::centered_on(x, y, zoom, self.width, self.height);
		self.transition = Some(Transition {
			from: self.transform,
			to,
			elapsed: 0.0,
		});
	}

	/// Highlight the node with `id` and focus the view on it; `None` clears.
	///
	/// Returns false when `id` names no node in the current graph.
	pub fn set_highlight(&mut self, id: Option<&str>) -> bool {
		let Some(id) = id else {
			self.highlight = None;
			return true;
		};
		let Some(idx) = self.graph.index_of(id) else {
			self.highlight = None;
			return false;
		};
		self.highlight = Some(idx);
		let (cx, cy) = self.graph.center_of(&self.graph.nodes[idx]);
		self.center_on(cx, cy, self.transform.k.max(FOCUS_ZOOM));
		true
	}

	/// Overview panel for the current graph, view and canvas size.
	pub fn minimap(&self) -> Option<Minimap> {
		Minimap::compute(&self.graph, &self.transform, self.width, self.height)
	}

	/// Pan to the graph point under a click on the minimap.
	///
	/// Returns false, leaving the view alone, when the click is outside the panel.
	pub fn minimap_jump(&mut self, sx: f64, sy: f64) -> bool {
		let Some((gx, gy)) = self.minimap().and_then(|m| m.target(sx, sy)) else {
			return false;
		};
		let k = self.transform.k;
		self.center_on(gx, gy, k);
		true
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		let Some(transition) = self.transition.as_mut() else {
			return;
		};
		transition.elapsed += dt;
		let t = (transition.elapsed / CENTER_DURATION).min(1.0);
		self.transform = transition.from.lerp(&transition.to, ease_out_cubic(t));
		if t >= 1.0 {
			self.transition = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		let Some(node) = self.graph.nodes.get(idx) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: node.x,
			node_start_y: node.y,
		};
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.transition = None;
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			let Some(node) = self.drag.node_idx.and_then(|i| self.graph.nodes.get_mut(i)) else {
				return;
			};
			node.x = self.drag.node_start_x + (sx - self.drag.start_x) / self.transform.k;
			node.y = self.drag.node_start_y + (sy - self.drag.start_y) / self.transform.k;
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	pub fn release_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}
}

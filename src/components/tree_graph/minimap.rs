//! Corner overview of the whole tree with the visible area framed.

use crate::model::layout::{Bounds, TreeGraph};

use super::scale::ViewTransform;

/// Panel size in canvas pixels.
pub const MINIMAP_SIZE: (f64, f64) = (200.0, 150.0);
const MINIMAP_MARGIN: f64 = 12.0;
const MINIMAP_PADDING: f64 = 8.0;

/// Where the overview panel goes and how graph space maps into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
	/// Panel rectangle in canvas pixels, bottom-right corner.
	pub panel: Bounds,
	/// Graph units to canvas pixels inside the panel.
	pub overview: ViewTransform,
	/// Part of the graph the main view currently shows, in graph units.
	pub viewport: Bounds,
}

fn union(a: &Bounds, b: &Bounds) -> Bounds {
	let (x, y) = (a.x.min(b.x), a.y.min(b.y));
	Bounds {
		x,
		y,
		width: (a.x + a.width).max(b.x + b.width) - x,
		height: (a.y + a.height).max(b.y + b.height) - y,
	}
}

impl Minimap {
	/// Layout for a `width` x `height` canvas viewed through `view`.
	///
	/// `None` for an empty graph or a canvas too small to spare the corner.
	pub fn compute(graph: &TreeGraph, view: &ViewTransform, width: f64, height: f64) -> Option<Self> {
		let (mw, mh) = MINIMAP_SIZE;
		if width < mw * 2.0 || height < mh * 2.0 {
			return None;
		}
		let tree = graph.bounds()?;
		let (x0, y0) = view.screen_to_graph(0.0, 0.0);
		let (x1, y1) = view.screen_to_graph(width, height);
		let viewport = Bounds {
			x: x0,
			y: y0,
			width: x1 - x0,
			height: y1 - y0,
		};

		let panel = Bounds {
			x: width - mw - MINIMAP_MARGIN,
			y: height - mh - MINIMAP_MARGIN,
			width: mw,
			height: mh,
		};
		let mut overview = ViewTransform::overview(&union(&tree, &viewport), mw, mh, MINIMAP_PADDING);
		overview.x += panel.x;
		overview.y += panel.y;
		Some(Self {
			panel,
			overview,
			viewport,
		})
	}

	pub fn contains(&self, sx: f64, sy: f64) -> bool {
		let p = &self.panel;
		sx >= p.x && sx <= p.x + p.width && sy >= p.y && sy <= p.y + p.height
	}

	/// Graph point under canvas pixel `(sx, sy)` if it falls on the panel.
	pub fn target(&self, sx: f64, sy: f64) -> Option<(f64, f64)> {
		self.contains(sx, sy)
			.then(|| self.overview.screen_to_graph(sx, sy))
	}
}

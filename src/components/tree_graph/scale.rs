//! View transform math: screen = graph * k + (x, y).

use crate::model::layout::Bounds;

/// Smallest allowed zoom.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom.
pub const MAX_ZOOM: f64 = 4.0;
/// Factor applied by one zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;
/// Screen pixels kept free around the tree by fit-to-view.
pub const FIT_PADDING: f64 = 40.0;
/// Background dot spacing in graph units at zoom 1.
pub const GRID_GAP: f64 = 20.0;
/// Dots closer than this on screen are thinned out.
const MIN_GRID_GAP_PX: f64 = 8.0;

/// Translation and zoom mapping graph space to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Graph-space point under canvas pixel `(sx, sy)`.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Canvas pixel showing graph point `(gx, gy)`.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Zoom by `factor`, keeping the graph point under `(sx, sy)` fixed.
	pub fn zoom_about(&self, sx: f64, sy: f64, factor: f64) -> Self {
		let k = clamp_zoom(self.k * factor);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// Transform placing graph point `(gx, gy)` at the centre of a `width` x `height` view.
	pub fn centered_on(gx: f64, gy: f64, k: f64, width: f64, height: f64) -> Self {
		let k = clamp_zoom(k);
		Self {
			x: width / 2.0 - gx * k,
			y: height / 2.0 - gy * k,
			k,
		}
	}

	/// Transform scaling `bounds` to fill a `width` x `height` area, centred,
	/// with no zoom limits. Used for thumbnails such as the minimap.
	pub fn overview(bounds: &Bounds, width: f64, height: f64, padding: f64) -> Self {
		let avail_w = (width - 2.0 * padding).max(1.0);
		let avail_h = (height - 2.0 * padding).max(1.0);
		let k = (avail_w / bounds.width.max(1.0)).min(avail_h / bounds.height.max(1.0));
		let (cx, cy) = bounds.center();
		Self {
			x: width / 2.0 - cx * k,
			y: height / 2.0 - cy * k,
			k,
		}
	}

	/// Transform showing all of `bounds` inside the view with `padding` to spare.
	///
	/// Never zooms in past 1.0 so small trees keep their natural size.
	pub fn fit(bounds: &Bounds, width: f64, height: f64, padding: f64) -> Self {
		let k = Self::overview(bounds, width, height, padding).k.min(1.0);
		let (cx, cy) = bounds.center();
		Self::centered_on(cx, cy, k, width, height)
	}

	/// Screen spacing of the background dots and the offset of the first
	/// dot on each axis, so the grid pans and zooms with the tree.
	pub fn grid(&self) -> (f64, f64, f64) {
		let mut gap = GRID_GAP * self.k;
		while gap < MIN_GRID_GAP_PX {
			gap *= 2.0;
		}
		(gap, self.x.rem_euclid(gap), self.y.rem_euclid(gap))
	}

	/// Component-wise interpolation towards `to`.
	pub fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Limit a zoom factor to `MIN_ZOOM..=MAX_ZOOM`.
pub fn clamp_zoom(k: f64) -> f64 {
	k.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Ease-out curve over `0.0..=1.0`; fast start, gentle stop.
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn screen_and_graph_round_trip() {
		let t = ViewTransform { x: 30.0, y: -10.0, k: 2.0 };
		let (gx, gy) = t.screen_to_graph(50.0, 70.0);
		assert_eq!((gx, gy), (10.0, 40.0));
		assert_eq!(t.graph_to_screen(gx, gy), (50.0, 70.0));
	}

	#[test]
	fn zoom_keeps_anchor_point_fixed() {
		let t = ViewTransform { x: 100.0, y: 50.0, k: 1.0 };
		let before = t.screen_to_graph(300.0, 200.0);
		let zoomed = t.zoom_about(300.0, 200.0, 1.5);
		let after = zoomed.screen_to_graph(300.0, 200.0);
		assert!(close(before.0, after.0) && close(before.1, after.1));
		assert!(close(zoomed.k, 1.5));
	}

	#[test]
	fn zoom_is_clamped() {
		let t = ViewTransform::default();
		assert_eq!(t.zoom_about(0.0, 0.0, 100.0).k, MAX_ZOOM);
		assert_eq!(t.zoom_about(0.0, 0.0, 0.0001).k, MIN_ZOOM);
	}

	#[test]
	fn fit_centres_bounds_and_shrinks_large_trees() {
		let bounds = Bounds { x: 0.0, y: 0.0, width: 2000.0, height: 400.0 };
		let t = ViewTransform::fit(&bounds, 1080.0, 600.0, 40.0);
		assert!(close(t.k, 0.5));
		let (sx, sy) = t.graph_to_screen(1000.0, 200.0);
		assert!(close(sx, 540.0) && close(sy, 300.0));

		let small = Bounds { x: 0.0, y: 0.0, width: 100.0, height: 50.0 };
		assert_eq!(ViewTransform::fit(&small, 800.0, 600.0, 40.0).k, 1.0);
	}

	#[test]
	fn overview_is_not_clamped() {
		let huge = Bounds { x: 0.0, y: 0.0, width: 100_000.0, height: 1000.0 };
		let t = ViewTransform::overview(&huge, 200.0, 150.0, 0.0);
		assert!(close(t.k, 0.002));
		let (sx, sy) = t.graph_to_screen(50_000.0, 500.0);
		assert!(close(sx, 100.0) && close(sy, 75.0));
		assert_eq!(ViewTransform::fit(&huge, 200.0, 150.0, 0.0).k, MIN_ZOOM);
	}

	#[test]
	fn grid_follows_pan_and_zoom() {
		let t = ViewTransform { x: 45.0, y: -5.0, k: 1.0 };
		assert_eq!(t.grid(), (20.0, 5.0, 15.0));

		let zoomed = ViewTransform { x: 0.0, y: 0.0, k: 2.0 };
		assert_eq!(zoomed.grid().0, 40.0);

		let far = ViewTransform { x: 0.0, y: 0.0, k: 0.1 };
		let (gap, _, _) = far.grid();
		assert!(close(gap, 8.0));
	}

	#[test]
	fn easing_hits_endpoints() {
		assert_eq!(ease_out_cubic(0.0), 0.0);
		assert_eq!(ease_out_cubic(1.0), 1.0);
		assert!(ease_out_cubic(0.5) > 0.5);
	}
}

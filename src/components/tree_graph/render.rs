use std::collections::HashMap;

use web_sys::CanvasRenderingContext2d;

use crate::model::layout::{GraphNode, TreeGraph};
use crate::model::theme::Palette;

use super::minimap::Minimap;
use super::state::TreeGraphState;

const CORNER_RADIUS: f64 = 8.0;
const LABEL_FONT: &str = "13px sans-serif";

pub fn render(state: &TreeGraphState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	ctx.set_fill_style_str(palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx, palette);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let (w, h) = state.graph.node_size;
	let visible = |node: &GraphNode| {
		let (left, top) = state.transform.graph_to_screen(node.x, node.y);
		let (right, bottom) = state.transform.graph_to_screen(node.x + w, node.y + h);
		right >= 0.0 && bottom >= 0.0 && left <= state.width && top <= state.height
	};
	draw_tree(ctx, &state.graph, state.highlight, palette, state.transform.k, &visible);
	ctx.restore();

	if let Some(minimap) = state.minimap() {
		draw_minimap(ctx, &minimap, &state.graph, state.highlight, palette);
	}
}

/// Dotted background in screen space, aligned to the graph grid.
fn draw_grid(state: &TreeGraphState, ctx: &CanvasRenderingContext2d, palette: &Palette) {
	let (gap, ox, oy) = state.transform.grid();
	let dot = (1.5 * state.transform.k).clamp(1.0, 2.0);
	ctx.set_fill_style_str(palette.grid);
	ctx.begin_path();
	let mut x = ox;
	while x < state.width {
		let mut y = oy;
		while y < state.height {
			ctx.rect(x - dot / 2.0, y - dot / 2.0, dot, dot);
			y += gap;
		}
		x += gap;
	}
	ctx.fill();
}

/// Overview panel: every node as a plain box, plus the main view's frame.
fn draw_minimap(
	ctx: &CanvasRenderingContext2d,
	minimap: &Minimap,
	graph: &TreeGraph,
	highlight: Option<usize>,
	palette: &Palette,
) {
	let p = &minimap.panel;
	let o = &minimap.overview;
	ctx.save();
	ctx.set_fill_style_str(palette.minimap);
	ctx.fill_rect(p.x, p.y, p.width, p.height);
	ctx.set_stroke_style_str(palette.minimap_frame);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(p.x, p.y, p.width, p.height);
	ctx.begin_path();
	ctx.rect(p.x, p.y, p.width, p.height);
	ctx.clip();

	let (w, h) = graph.node_size;
	let (bw, bh) = ((w * o.k).max(1.0), (h * o.k).max(1.0));
	for (idx, node) in graph.nodes.iter().enumerate() {
		let (sx, sy) = o.graph_to_screen(node.x, node.y);
		let fill = if Some(idx) == highlight { palette.highlight } else { node.fill() };
		ctx.set_fill_style_str(fill);
		ctx.fill_rect(sx, sy, bw, bh);
	}

	let v = &minimap.viewport;
	let (vx, vy) = o.graph_to_screen(v.x, v.y);
	ctx.set_line_width(1.5);
	ctx.stroke_rect(vx, vy, v.width * o.k, v.height * o.k);
	ctx.restore();
}

/// Draw edges, then nodes, then the highlighted node on top, in graph units.
///
/// `k` is the zoom the caller applied, used to keep strokes a constant screen width.
pub fn draw_tree(
	ctx: &CanvasRenderingContext2d,
	graph: &TreeGraph,
	highlight: Option<usize>,
	palette: &Palette,
	k: f64,
	visible: &dyn Fn(&GraphNode) -> bool,
) {
	let by_id: HashMap<&str, &GraphNode> = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	draw_edges(ctx, graph, &by_id, palette, k);

	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for (idx, node) in graph.nodes.iter().enumerate() {
		if Some(idx) != highlight && visible(node) {
			draw_node(ctx, graph, node, palette);
		}
	}

	let Some(node) = highlight.and_then(|i| graph.nodes.get(i)) else {
		return;
	};
	let (w, h) = graph.node_size;
	ctx.save();
	ctx.set_shadow_color("rgba(0, 0, 0, 0.35)");
	ctx.set_shadow_blur(12.0);
	draw_node(ctx, graph, node, palette);
	ctx.restore();
	rounded_rect(ctx, node.x - 2.0, node.y - 2.0, w + 4.0, h + 4.0, CORNER_RADIUS + 2.0);
	ctx.set_stroke_style_str(palette.highlight);
	ctx.set_line_width(3.0 / k.max(0.25));
	ctx.stroke();
}

fn draw_edges(
	ctx: &CanvasRenderingContext2d,
	graph: &TreeGraph,
	by_id: &HashMap<&str, &GraphNode>,
	palette: &Palette,
	k: f64,
) {
	let (w, h) = graph.node_size;
	ctx.set_stroke_style_str(palette.edge);
	ctx.set_line_width(1.5 / k.max(0.25));
	ctx.begin_path();
	for edge in &graph.edges {
		let (Some(src), Some(tgt)) = (by_id.get(edge.source.as_str()), by_id.get(edge.target.as_str()))
		else {
			continue;
		};
		let (x1, y1) = (src.x + w / 2.0, src.y + h);
		let (x2, y2) = (tgt.x + w / 2.0, tgt.y);
		let mid = (y1 + y2) / 2.0;
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(x1, mid, x2, mid, x2, y2);
	}
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, graph: &TreeGraph, node: &GraphNode, palette: &Palette) {
	let (w, h) = graph.node_size;
	rounded_rect(ctx, node.x, node.y, w, h, CORNER_RADIUS);
	ctx.set_fill_style_str(node.fill());
	ctx.fill();
	ctx.set_fill_style_str(palette.label);
	let _ = ctx.fill_text(&node.label, node.x + w / 2.0, node.y + h / 2.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

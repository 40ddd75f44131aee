use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement};

use crate::model::layout::{GraphNode, TreeGraph};
use crate::model::theme::Palette;

use super::render::draw_tree;

pub const EXPORT_FILENAME: &str = "json-tree.png";
const EXPORT_PADDING: f64 = 20.0;
/// Keeps huge trees under common browser canvas size limits.
const MAX_EXPORT_SIDE: f64 = 8192.0;

/// Render the whole tree off-screen and download it as a PNG.
pub fn download_png(
	graph: &TreeGraph,
	highlight: Option<usize>,
	palette: &Palette,
) -> Result<(), JsValue> {
	let bounds = graph
		.bounds()
		.ok_or_else(|| JsValue::from_str("nothing to export"))?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let full_w = bounds.width + 2.0 * EXPORT_PADDING;
	let full_h = bounds.height + 2.0 * EXPORT_PADDING;
	let k = (MAX_EXPORT_SIDE / full_w).min(MAX_EXPORT_SIDE / full_h).min(1.0);

	let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
	canvas.set_width((full_w * k).ceil() as u32);
	canvas.set_height((full_h * k).ceil() as u32);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
		.dyn_into()?;

	ctx.set_fill_style_str(palette.background);
	ctx.fill_rect(0.0, 0.0, full_w * k, full_h * k);
	ctx.scale(k, k)?;
	ctx.translate(EXPORT_PADDING - bounds.x, EXPORT_PADDING - bounds.y)?;
	draw_tree(&ctx, graph, highlight, palette, k, &|_: &GraphNode| true);

	let url = canvas.to_data_url_with_type("image/png")?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(EXPORT_FILENAME);
	anchor.click();
	log::info!(
		"Exported {EXPORT_FILENAME} ({}x{})",
		canvas.width(),
		canvas.height()
	);
	Ok(())
}

use leptos::prelude::*;

use crate::components::search_bar::SearchBar;
use crate::components::tree_graph::{GraphController, TreeGraphCanvas};
use crate::model::layout::TreeGraph;
use crate::model::theme::Theme;

/// Tree canvas with its search, zoom and export controls.
///
/// The canvas stays mounted while there is no graph so its render loop and
/// controller survive regeneration; it is just hidden.
#[component]
pub fn Preview(
	#[prop(into)] graph: Signal<Option<TreeGraph>>,
	#[prop(into)] highlight: Signal<Option<String>>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(into)] search_status: Signal<Option<String>>,
	on_search: Callback<String>,
) -> impl IntoView {
	let controller = GraphController::default();
	let has_graph = move || graph.with(Option::is_some);
	let (zoom_in, zoom_out, fit, export) = (
		controller.clone(),
		controller.clone(),
		controller.clone(),
		controller.clone(),
	);

	view! {
		<div class="preview-section">
			<h2>"JSON Tree Visualization"</h2>
			<Show when=move || !has_graph()>
				<p>"Paste your JSON and click “Generate Tree” 🌳"</p>
			</Show>
			<div class="preview-body" style:display=move || if has_graph() { "block" } else { "none" }>
				<SearchBar status=search_status on_search=on_search />
				<div class="flow-container">
					<TreeGraphCanvas data=graph highlight=highlight theme=theme controller=controller />
					<div class="flow-controls">
						<button title="Zoom in" on:click=move |_| zoom_in.zoom_in()>"+"</button>
						<button title="Zoom out" on:click=move |_| zoom_out.zoom_out()>"−"</button>
						<button title="Fit view" on:click=move |_| fit.fit_view()>"⤢"</button>
					</div>
				</div>
				<button
					class="download-btn"
					on:click=move |_| export.export_png(theme.get_untracked())
				>
					"📸 Download as PNG"
				</button>
			</div>
		</div>
	}
}

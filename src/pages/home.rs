use std::time::Duration;

use leptos::prelude::*;
use log::info;

use crate::components::json_input::JsonInput;
use crate::components::preview::Preview;
use crate::components::theme_toggle::ThemeToggle;
use crate::model::layout::TreeGraph;
use crate::model::theme::Theme;
use crate::model::workspace::Workspace;

/// How long a search status stays on screen.
const STATUS_TTL: Duration = Duration::from_millis(2500);

/// The visualizer: JSON input on one side, tree preview on the other.
#[component]
pub fn Home() -> impl IntoView {
	let theme = expect_context::<RwSignal<Theme>>();
	let workspace = RwSignal::new(Workspace::default());
	let input = RwSignal::new(String::new());

	// Mirrors of the workspace that notify on every generate/search, even when
	// the value is unchanged, so regenerating refits and re-searching recentres.
	let graph = RwSignal::new(None::<TreeGraph>);
	let highlight = RwSignal::new(None::<String>);
	let status = RwSignal::new(None::<String>);
	let status_seq = RwSignal::new(0u64);

	let error = Memo::new(move |_| workspace.with(|w| w.error().map(ToString::to_string)));

	let on_generate = Callback::new(move |()| {
		let text = input.get_untracked();
		workspace.update(|w| {
			if let Ok(g) = w.generate(&text) {
				info!("Generated tree with {} nodes", g.nodes.len());
			}
		});
		graph.set(workspace.with_untracked(|w| w.graph().cloned()));
		highlight.set(None);
		status.set(None);
	});

	let on_search = Callback::new(move |query: String| {
		let outcome = workspace.try_update(|w| w.search(&query));
		let Some(outcome) = outcome else {
			return;
		};
		highlight.set(workspace.with_untracked(|w| w.highlight().map(str::to_owned)));
		status.set(Some(outcome.status_message()));

		let seq = status_seq.get_untracked() + 1;
		status_seq.set(seq);
		set_timeout(
			move || {
				if status_seq.get_untracked() == seq {
					status.set(None);
				}
			},
			STATUS_TTL,
		);
	});

	let year = js_sys::Date::new_0().get_full_year();

	view! {
		<div class=move || format!("app {}", theme.get().as_str())>
			<header class="app-header">
				<h1>"JSON Tree Visualizer"</h1>
				<ThemeToggle theme=theme />
			</header>

			<main class="app-main">
				<JsonInput text=input error=error on_generate=on_generate />
				<Preview
					graph=graph
					highlight=highlight
					theme=theme
					search_status=status
					on_search=on_search
				/>
			</main>

			<footer class="app-footer">
				<p>{format!("© {year} JSON Visualizer")}</p>
			</footer>
		</div>
	}
}

use leptos::prelude::*;

use crate::model::theme::Theme;

#[component]
pub fn ThemeToggle(theme: RwSignal<Theme>) -> impl IntoView {
	view! {
		<button class="theme-toggle" on:click=move |_| theme.update(|t| *t = t.toggle())>
			{move || theme.get().toggle_label()}
		</button>
	}
}

use leptos::prelude::*;
use web_sys::KeyboardEvent;

#[component]
pub fn SearchBar(
	#[prop(into)] status: Signal<Option<String>>,
	on_search: Callback<String>,
) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let submit = move || on_search.run(query.get_untracked());

	view! {
		<div class="search-bar">
			<input
				type="text"
				class="search-input"
				placeholder="$.user.name or items[0].name"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
				on:keydown=move |ev: KeyboardEvent| {
					if ev.key() == "Enter" {
						submit();
					}
				}
			/>
			<button class="search-btn" on:click=move |_| submit()>
				"Search"
			</button>
			{move || status.get().map(|msg| view! { <span class="search-status">{msg}</span> })}
		</div>
	}
}

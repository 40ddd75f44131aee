use leptos::prelude::*;

/// Raw JSON entry with its validation message and the generate action.
#[component]
pub fn JsonInput(
	text: RwSignal<String>,
	#[prop(into)] error: Signal<Option<String>>,
	on_generate: Callback<()>,
) -> impl IntoView {
	view! {
		<div class="input-section">
			<h2>"Enter JSON Data"</h2>
			<textarea
				class="input-section-box"
				placeholder="Paste your JSON here..."
				spellcheck="false"
				prop:value=move || text.get()
				on:input=move |ev| text.set(event_target_value(&ev))
			/>
			{move || error.get().map(|msg| view! { <p class="error-msg">{msg}</p> })}
			<button class="generate-btn" on:click=move |_| on_generate.run(())>
				"Generate Tree"
			</button>
		</div>
	}
}

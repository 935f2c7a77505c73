use leptos::prelude::*;

#[component]
pub fn Initializing() -> impl IntoView {
	view! { <div class="Initializing">"Starting renderer..."</div> }
}

/// Shown in place of the drawing surface when the renderer could not start.
#[component]
pub fn ErrorMessage(#[prop(into)] error: String) -> impl IntoView {
	view! {
		<div class="ErrorMessage" role="alert">
			<b>"Drawing is unavailable."</b>
			<p>{error}</p>
		</div>
	}
}

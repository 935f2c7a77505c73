use crate::components::*;
use crate::settings::Settings;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_query_map};

#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let settings =
		query.with_untracked(|query| Settings::from_lookup(|key| query.get(key).map(|v| v.to_string())));
	let paint = RwSignal::new(settings.paint);

	view! {
		<Title text="Draw"/>
		<div class="Home">
			<DrawingCanvas settings paint/>
			<BrushControls paint/>
		</div>
	}
}

#[component]
pub fn NotFound() -> impl IntoView {
	let path = use_location().pathname.get_untracked();

	view! {
		<Title text="Not found"/>
		<div class="NotFound">
			<div>{format!("Not found: {path}")}</div>
			<A href="/">"Return home"</A>
		</div>
	}
}

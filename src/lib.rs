pub(crate) mod util;

mod components;
pub mod engine;
pub mod geom;
mod pages;
pub mod render;
pub mod settings;
pub mod shaders;

mod wgpu_context;
pub use wgpu_context::*;


use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Title formatter=|page: String| format!("Daub - {page}")/>

		// Inject metadata in the <head> tag.
		<Meta charset="UTF-8"/>
		<Meta name="viewport" content="width=device-width, initial-scale=1.0"/>

		<Router>
			<Routes fallback=|| view! { <pages::NotFound/> }>
				<Route path=path!("/") view=pages::Home/>
			</Routes>
		</Router>
	}
}

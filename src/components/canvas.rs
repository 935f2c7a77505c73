use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;

use crate::components::fallback;
use crate::engine::{InputEvent, PaintState, Session, StepOutcome};
use crate::geom::Viewport;
use crate::render::DrawingSurface;
use crate::settings::Settings;
use crate::util::*;

/// Matches the canvas's backing store to its displayed size and returns that size.
fn fit_to_display(canvas: &web_sys::HtmlCanvasElement) -> Viewport {
	let width = canvas.client_width().max(0) as u32;
	let height = canvas.client_height().max(0) as u32;
	if canvas.width() != width {
		canvas.set_width(width);
	}
	if canvas.height() != height {
		canvas.set_height(height);
	}
	Viewport::new(width, height)
}

#[component]
pub fn DrawingCanvas(settings: Settings, paint: RwSignal<PaintState>) -> impl IntoView {
	let node_ref = NodeRef::<leptos::html::Canvas>::new();
	let session = Rc::new(RefCell::new(Session::new(settings.paint)));
	let surface: Rc<RefCell<Option<DrawingSurface>>> = Rc::default();
	let init_error = RwSignal::new(None::<String>);
	let initializing = RwSignal::new(true);

	let dispatch = {
		let session = session.clone();
		move |event: InputEvent| {
			let outcome = session.borrow_mut().step(event);
			if outcome != StepOutcome::Ignored {
				tracing::trace!(%event, ?outcome, "input");
			}
		}
	};

	// The sliders only ever write the signal; the session picks up changes here.
	Effect::new({
		let dispatch = dispatch.clone();
		move |_| dispatch(InputEvent::Paint(paint.get()))
	});

	let resize = {
		let dispatch = dispatch.clone();
		let surface = surface.clone();
		move |canvas: &web_sys::HtmlCanvasElement| {
			let viewport = fit_to_display(canvas);
			dispatch(InputEvent::Resize {
				width: viewport.width,
				height: viewport.height,
			});
			if let Some(surface) = surface.borrow_mut().as_mut() {
				surface.set_viewport(viewport);
			}
		}
	};

	Effect::new({
		let resize = resize.clone();
		let surface = surface.clone();
		let background = settings.background;
		move |_| {
			let Some(canvas) = node_ref.get() else {
				return;
			};
			resize(&canvas);
			let surface = surface.clone();
			spawn_local(async move {
				match DrawingSurface::new(canvas, background).await {
					Ok(created) => {
						*surface.borrow_mut() = Some(created);
					}
					Err(error) => {
						tracing::error!(%error, "failed to initialize renderer");
						init_error.set(Some(error.to_string()));
					}
				}
				initializing.set(false);
			});
		}
	});

	let handle = window_event_listener(leptos::ev::resize, move |_| {
		if let Some(canvas) = node_ref.get_untracked() {
			resize(&canvas);
		}
	});
	let handle = SendWrapper::new(handle);
	on_cleanup(move || handle.take().remove());

	let tick = {
		let session = session.clone();
		let surface = surface.clone();
		move || {
			if let Some(surface) = surface.borrow().as_ref() {
				surface.draw(session.borrow().scene());
			}
		}
	};
	set_interval_and_clean_up(tick, settings.frame_interval()).ok_or_log();

	let pointerdown = {
		let dispatch = dispatch.clone();
		move |e: leptos::ev::PointerEvent| {
			if e.button() != 0 {
				return;
			}
			e.set_pointer_capture();
			e.prevent_default();
			dispatch(InputEvent::PointerDown(e.surface_position()));
		}
	};

	let pointermove = {
		let dispatch = dispatch.clone();
		move |e: leptos::ev::PointerEvent| dispatch(InputEvent::PointerMove(e.surface_position()))
	};

	let pointerup = {
		let dispatch = dispatch.clone();
		move |e: leptos::ev::PointerEvent| {
			e.release_pointer_capture();
			dispatch(InputEvent::PointerUp);
		}
	};

	let pointercancel = move |_: leptos::ev::PointerEvent| dispatch(InputEvent::PointerCancel);

	let touchstart = move |e: leptos::ev::TouchEvent| {
		e.prevent_default();
	};

	view! {
		<div class="DrawingCanvas">
			<canvas
				class="RenderSurface"
				node_ref=node_ref
				on:pointerdown=pointerdown
				on:pointermove=pointermove
				on:pointerup=pointerup
				on:pointercancel=pointercancel
				on:touchstart=touchstart
			></canvas>
			{move || initializing.get().then(|| view! { <fallback::Initializing/> })}
			{move || init_error.get().map(|error| view! { <fallback::ErrorMessage error/> })}
		</div>
	}
}

use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub trait ResultExt<T> {
	/// Logs the error, if any, and discards it.
	fn ok_or_log(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
	fn ok_or_log(self) -> Option<T> {
		self.inspect_err(|error| tracing::error!(%error)).ok()
	}
}

#[derive(thiserror::Error, Debug)]
#[error("javascript error {0}")]
pub struct JsError(String);

impl From<wasm_bindgen::JsValue> for JsError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		JsError(format!("{:?}", value))
	}
}

/// Calls `cb` every `duration` until the current reactive owner is cleaned up.
pub fn set_interval_and_clean_up(
	cb: impl Fn() + 'static,
	duration: std::time::Duration,
) -> Result<(), JsError> {
	let handle = set_interval_with_handle(cb, duration)?;
	on_cleanup(move || handle.clear());
	Ok(())
}

pub trait PointerCapture {
	fn set_pointer_capture(&self) -> bool;
	fn release_pointer_capture(&self) -> bool;
}

impl PointerCapture for leptos::ev::PointerEvent {
	fn set_pointer_capture(&self) -> bool {
		self
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
			.and_then(|target| {
				target
					.set_pointer_capture(self.pointer_id())
					.map_err(JsError::from)
					.ok_or_log()
			})
			.is_some()
	}

	fn release_pointer_capture(&self) -> bool {
		self
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
			.and_then(|target| {
				target
					.release_pointer_capture(self.pointer_id())
					.map_err(JsError::from)
					.ok_or_log()
			})
			.is_some()
	}
}

pub trait SurfacePosition {
	/// Position relative to the top-left corner of the event target, in pixels.
	fn surface_position(&self) -> glam::Vec2;
}

impl SurfacePosition for leptos::ev::PointerEvent {
	fn surface_position(&self) -> glam::Vec2 {
		glam::Vec2::new(self.offset_x() as f32, self.offset_y() as f32)
	}
}

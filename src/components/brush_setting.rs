use glam::Vec3;
use leptos::prelude::*;

use crate::engine::PaintState;

pub const MIN_STROKE_WIDTH: f32 = 0.01;
pub const MAX_STROKE_WIDTH: f32 = 0.5;

#[component]
pub fn BrushSetting(#[prop(into)] name: String, children: Children) -> impl IntoView {
	view! {
		<div class="BrushSetting">
			<span class="BrushSettingName">{name}</span>
			{children()}
		</div>
	}
}

/// Parses the value of a range input. Browsers always report a number, but the DOM hands it over
/// as text.
fn parse_slider_value(text: &str) -> Option<f32> {
	match text.parse::<f32>() {
		Ok(value) if value.is_finite() => Some(value),
		Ok(value) => {
			tracing::warn!(value, "non-finite slider value");
			None
		}
		Err(error) => {
			tracing::warn!(%error, text, "unparseable slider value");
			None
		}
	}
}

#[component]
pub fn Slider(
	min: f32,
	max: f32,
	#[prop(default = 0.001)] step: f32,
	#[prop(into)] value: Signal<f32>,
	on_input: Callback<f32>,
) -> impl IntoView {
	let input = move |ev: leptos::ev::Event| {
		if let Some(value) = parse_slider_value(&event_target_value(&ev)) {
			on_input.run(value);
		}
	};

	view! {
		<input
			type="range"
			min=min.to_string()
			max=max.to_string()
			step=step.to_string()
			prop:value=move || value.get().to_string()
			on:input=input
		/>
	}
}

#[component]
fn ColorChannel(#[prop(into)] name: String, paint: RwSignal<PaintState>, channel: usize) -> impl IntoView {
	let value = Signal::derive(move || paint.with(|p| p.color()[channel]));
	let on_input = Callback::new(move |v: f32| {
		paint.update(|p| {
			let mut color = p.color();
			color[channel] = v;
			p.set_color(color);
		})
	});
	view! {
		<BrushSetting name>
			<Slider min=0.0 max=1.0 value on_input/>
		</BrushSetting>
	}
}

fn css_color(color: Vec3) -> String {
	let [r, g, b] = (color * 255.0).round().to_array();
	format!("rgb({r}, {g}, {b})")
}

/// Sliders for the stroke width and color.
#[component]
pub fn BrushControls(paint: RwSignal<PaintState>) -> impl IntoView {
	let width = Signal::derive(move || paint.with(|p| p.width()));
	let set_width = Callback::new(move |w: f32| paint.update(|p| p.set_width(w)));
	let swatch = move || format!("background-color: {}", paint.with(|p| css_color(p.color())));

	view! {
		<div class="BrushControls">
			<BrushSetting name="Size">
				<Slider min=MIN_STROKE_WIDTH max=MAX_STROKE_WIDTH value=width on_input=set_width/>
			</BrushSetting>
			<ColorChannel name="Red" paint channel=0/>
			<ColorChannel name="Green" paint channel=1/>
			<ColorChannel name="Blue" paint channel=2/>
			<div class="Swatch" style=swatch></div>
		</div>
	}
}

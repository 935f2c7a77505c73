use std::time::Duration;

use crate::engine::PaintState;

pub const DEFAULT_TARGET_FPS: f64 = 144.0;
pub const MIN_TARGET_FPS: f64 = 1.0;
pub const MAX_TARGET_FPS: f64 = 1000.0;

/// Startup configuration. Defaults can be overridden from the page's query string, e.g.
/// `?fps=60&background=%23202020&width=0.05&color=teal`.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct Settings {
	#[builder(default = DEFAULT_TARGET_FPS)]
	pub target_fps: f64,
	#[builder(default = wgpu::Color::WHITE)]
	pub background: wgpu::Color,
	#[builder(default)]
	pub paint: PaintState,
}

impl Default for Settings {
	fn default() -> Self {
		Self::builder().build()
	}
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("{key}: expected a number, got {value:?}")]
	InvalidNumber { key: &'static str, value: String },

	#[error("{key}: {value} is out of range")]
	OutOfRange { key: &'static str, value: f64 },

	#[error("{key}: invalid color {value:?}")]
	InvalidColor {
		key: &'static str,
		value: String,
		#[source]
		source: csscolorparser::ParseColorError,
	},
}

static_assertions::assert_impl_all!(SettingsError: std::error::Error, Send, Sync);

fn parse_positive(key: &'static str, value: &str) -> Result<f64, SettingsError> {
	let number: f64 = value.trim().parse().map_err(|_| SettingsError::InvalidNumber {
		key,
		value: value.to_owned(),
	})?;
	if !number.is_finite() || number <= 0.0 {
		return Err(SettingsError::OutOfRange { key, value: number });
	}
	Ok(number)
}

fn parse_color(key: &'static str, value: &str) -> Result<[f64; 3], SettingsError> {
	let color = csscolorparser::parse(value).map_err(|source| SettingsError::InvalidColor {
		key,
		value: value.to_owned(),
		source,
	})?;
	let [r, g, b, _] = color.to_array();
	Ok([r as f64, g as f64, b as f64])
}

impl Settings {
	pub const KEYS: [&'static str; 4] = ["fps", "background", "width", "color"];

	/// Time between two frame ticks. Rates outside `MIN_TARGET_FPS..=MAX_TARGET_FPS` (which only the
	/// builder can produce) fall back to the default rate.
	pub fn frame_interval(&self) -> Duration {
		let fps = if (MIN_TARGET_FPS..=MAX_TARGET_FPS).contains(&self.target_fps) {
			self.target_fps
		} else {
			tracing::warn!(fps = self.target_fps, "target fps out of range, using default");
			DEFAULT_TARGET_FPS
		};
		Duration::from_secs_f64(1.0 / fps)
	}

	/// Applies a single override. On error, the setting is left unchanged.
	pub fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
		match key {
			"fps" => {
				let fps = parse_positive("fps", value)?;
				if !(MIN_TARGET_FPS..=MAX_TARGET_FPS).contains(&fps) {
					return Err(SettingsError::OutOfRange { key: "fps", value: fps });
				}
				self.target_fps = fps;
			}
			"background" => {
				let [r, g, b] = parse_color("background", value)?;
				self.background = wgpu::Color { r, g, b, a: 1.0 };
			}
			"width" => {
				// Positive as f64 can still round to 0 or overflow to infinity as f32.
				let width = parse_positive("width", value)? as f32;
				if !width.is_finite() || width <= 0.0 {
					return Err(SettingsError::OutOfRange {
						key: "width",
						value: width as f64,
					});
				}
				self.paint.set_width(width);
			}
			"color" => {
				let [r, g, b] = parse_color("color", value)?;
				self.paint.set_color(glam::DVec3::new(r, g, b).as_vec3());
			}
			_ => tracing::debug!(key, "ignoring unknown setting"),
		}
		Ok(())
	}

	/// Builds settings from defaults plus whatever `lookup` returns for each of `KEYS`. Invalid
	/// overrides are logged and skipped.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut settings = Self::default();
		for key in Self::KEYS {
			let Some(value) = lookup(key) else {
				continue;
			};
			if let Err(error) = settings.apply(key, &value) {
				tracing::warn!(%error, "ignoring invalid setting");
			}
		}
		tracing::debug!(?settings, "settings");
		settings
	}
}

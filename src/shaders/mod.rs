use crate::render::Shader;

#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to compile shader {label}: {message}")]
pub struct ShaderError {
	pub label: String,
	pub message: String,
}

static_assertions::assert_impl_all!(ShaderError: std::error::Error, Send, Sync);

/// Compiles `source` and builds a pipeline layout without bind groups. Compilation runs inside a
/// validation error scope so that a bad shader surfaces as an error instead of a device panic.
#[tracing::instrument(skip(device, source), err)]
pub async fn create_shader(
	device: &wgpu::Device,
	label: &str,
	source: &str,
) -> Result<Shader, ShaderError> {
	device.push_error_scope(wgpu::ErrorFilter::Validation);
	let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
		label: Some(label),
		source: wgpu::ShaderSource::Wgsl(source.into()),
	});
	if let Some(error) = device.pop_error_scope().await {
		return Err(ShaderError {
			label: label.to_owned(),
			message: error.to_string(),
		});
	}

	let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
		label: Some(label),
		bind_group_layouts: &[],
		push_constant_ranges: &[],
	});
	Ok(Shader { module, layout })
}

/// Flat-colored triangles: position in device coordinates, one RGB color per vertex.
pub mod quad {
	pub const SOURCE: &str = include_str!("quad.wgsl");
	pub const ENTRY_VS_MAIN: &str = "vs_main";
	pub const ENTRY_FS_MAIN: &str = "fs_main";

	pub async fn create_shader(
		device: &wgpu::Device,
	) -> Result<crate::render::Shader, super::ShaderError> {
		super::create_shader(device, "quad", SOURCE).await
	}
}

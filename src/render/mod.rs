use std::num::NonZero;

use bon::builder;
use thiserror::Error;

use crate::engine::Vertex;
use crate::shaders::ShaderError;
use crate::WgpuContextError;

mod frame;
pub use frame::*;

mod surface;
pub use surface::*;

#[derive(Debug)]
pub struct Shader {
	pub module: wgpu::ShaderModule,
	pub layout: wgpu::PipelineLayout,
}

/// Errors that prevent rendering from starting. None of these are recoverable.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
	#[error(transparent)]
	Context(#[from] WgpuContextError),

	#[error(transparent)]
	Shader(#[from] ShaderError),

	#[error("failed to create pipeline: {0}")]
	Pipeline(String),

	#[error("surface is not supported by the adapter")]
	UnsupportedSurface,
}

static_assertions::assert_impl_all!(RenderError: std::error::Error, Send, Sync);

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
	wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x3];

/// Layout of a `Vertex` in a vertex buffer: position at location 0, color at location 1, five
/// floats per vertex.
pub const QUAD_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
	array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
	step_mode: wgpu::VertexStepMode::Vertex,
	attributes: &VERTEX_ATTRIBUTES,
};

/// Creates a pipeline drawing unculled triangle lists. Strokes can run in any direction, so
/// triangles arrive with either winding.
#[builder(finish_fn = create)]
pub fn render_pipeline<'a>(
	#[builder(finish_fn)] device: &wgpu::Device,
	label: Option<&str>,
	layout: Option<&wgpu::PipelineLayout>,
	vertex: wgpu::VertexState<'a>,
	fragment: Option<wgpu::FragmentState<'a>>,
	depth_stencil: Option<wgpu::DepthStencilState>,
	#[builder(default)] multisample: wgpu::MultisampleState,
	multiview: Option<NonZero<u32>>,
	cache: Option<&wgpu::PipelineCache>,
) -> wgpu::RenderPipeline {
	device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
		label,
		layout,
		vertex,
		fragment,
		primitive: wgpu::PrimitiveState {
			topology: wgpu::PrimitiveTopology::TriangleList,
			strip_index_format: None,
			front_face: wgpu::FrontFace::Ccw,
			cull_mode: None,
			polygon_mode: wgpu::PolygonMode::Fill,
			unclipped_depth: false,
			conservative: false,
		},
		depth_stencil,
		multisample,
		multiview,
		cache,
	})
}

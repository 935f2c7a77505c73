use wgpu::util::DeviceExt;

use super::{render_pipeline, RenderError, QUAD_VERTEX_LAYOUT};
use crate::engine::{Quad, Scene};
use crate::shaders;

/// Clears the target and draws every quad of a scene, in order.
#[derive(Debug)]
pub struct FrameRenderer {
	pipeline: wgpu::RenderPipeline,
	background: wgpu::Color,
}

impl FrameRenderer {
	#[tracing::instrument(skip(device), err)]
	pub async fn new(
		device: &wgpu::Device,
		texture_format: wgpu::TextureFormat,
		background: wgpu::Color,
	) -> Result<Self, RenderError> {
		use shaders::quad::*;
		let shader = create_shader(device).await?;

		device.push_error_scope(wgpu::ErrorFilter::Validation);
		let pipeline = render_pipeline()
			.label("quad")
			.layout(&shader.layout)
			.vertex(wgpu::VertexState {
				module: &shader.module,
				entry_point: ENTRY_VS_MAIN,
				compilation_options: Default::default(),
				buffers: &[QUAD_VERTEX_LAYOUT],
			})
			.fragment(wgpu::FragmentState {
				module: &shader.module,
				entry_point: ENTRY_FS_MAIN,
				compilation_options: Default::default(),
				targets: &[Some(wgpu::ColorTargetState {
					format: texture_format,
					blend: Some(wgpu::BlendState::REPLACE),
					write_mask: wgpu::ColorWrites::ALL,
				})],
			})
			.create(device);
		if let Some(error) = device.pop_error_scope().await {
			return Err(RenderError::Pipeline(error.to_string()));
		}

		Ok(Self {
			pipeline,
			background,
		})
	}

	pub fn background(&self) -> wgpu::Color {
		self.background
	}

	/// Renders `scene` into `view`.
	///
	/// Every quad gets a fresh vertex buffer each frame. That keeps the renderer stateless but
	/// scales linearly with the length of the session.
	pub fn render(
		&self,
		device: &wgpu::Device,
		queue: &wgpu::Queue,
		view: &wgpu::TextureView,
		scene: &Scene,
	) {
		let buffers: Vec<_> = scene
			.iter()
			.map(|quad| {
				device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
					label: Some("quad"),
					contents: quad.as_bytes(),
					usage: wgpu::BufferUsages::VERTEX,
				})
			})
			.collect();

		let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
			label: Some("Frame Encoder"),
		});

		{
			let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
				label: Some("Frame Pass"),
				color_attachments: &[Some(wgpu::RenderPassColorAttachment {
					view,
					resolve_target: None,
					ops: wgpu::Operations {
						load: wgpu::LoadOp::Clear(self.background),
						store: wgpu::StoreOp::Store,
					},
				})],
				..Default::default()
			});
			render_pass.set_pipeline(&self.pipeline);
			for buffer in &buffers {
				render_pass.set_vertex_buffer(0, buffer.slice(..));
				render_pass.draw(0..Quad::VERTEX_COUNT, 0..1);
			}
		}
		queue.submit([encoder.finish()]);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::build_quad;
	use crate::test::WgpuTestContext;
	use glam::{Vec2, Vec3};

	const SIZE: u32 = 64;

	fn pixel(data: &[u8], x: u32, y: u32) -> [u8; 4] {
		let i = ((y * SIZE + x) * 4) as usize;
		[data[i], data[i + 1], data[i + 2], data[i + 3]]
	}

	#[test]
	fn empty_scene_clears_to_background() {
		let Some(context) = WgpuTestContext::new() else {
			return;
		};
		let format = wgpu::TextureFormat::Rgba8Unorm;
		let renderer =
			pollster::block_on(FrameRenderer::new(context.device(), format, wgpu::Color::BLACK))
				.unwrap();

		let texture = context.render_target(SIZE, SIZE, format);
		let view = texture.create_view(&Default::default());
		renderer.render(context.device(), context.queue(), &view, &Scene::new());

		let data = context.get_texture_data(&texture);
		assert_eq!(pixel(&data, 0, 0), [0, 0, 0, 255]);
		assert_eq!(pixel(&data, SIZE / 2, SIZE / 2), [0, 0, 0, 255]);
	}

	#[test]
	fn draws_quads_over_background() {
		let Some(context) = WgpuTestContext::new() else {
			return;
		};
		let format = wgpu::TextureFormat::Rgba8Unorm;
		let renderer =
			pollster::block_on(FrameRenderer::new(context.device(), format, wgpu::Color::WHITE))
				.unwrap();

		// Centered on (-0.5, 0): covers x in [-1, 0] and y in [-0.1, 0.1].
		let mut scene = Scene::new();
		scene.append(build_quad(
			Vec2::new(-0.5, 0.0),
			Vec2::new(0.5, 0.0),
			0.4,
			Vec3::new(1.0, 0.0, 0.0),
		));
		// Drawn later, so it wins where the two overlap.
		scene.append(build_quad(
			Vec2::new(-0.25, 0.0),
			Vec2::new(-0.15, 0.0),
			0.4,
			Vec3::new(0.0, 0.0, 1.0),
		));

		let texture = context.render_target(SIZE, SIZE, format);
		let view = texture.create_view(&Default::default());
		renderer.render(context.device(), context.queue(), &view, &scene);

		let data = context.get_texture_data(&texture);
		assert_eq!(pixel(&data, 4, SIZE / 2), [255, 0, 0, 255]);
		assert_eq!(pixel(&data, 24, SIZE / 2), [0, 0, 255, 255]);
		assert_eq!(pixel(&data, 48, SIZE / 2), [255, 255, 255, 255]);
		assert_eq!(pixel(&data, 4, 4), [255, 255, 255, 255]);
	}
}

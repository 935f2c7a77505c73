use super::{FrameRenderer, RenderError};
use crate::engine::Scene;
use crate::geom::Viewport;
use crate::WgpuContext;

/// A canvas-backed surface together with everything needed to draw a scene onto it.
pub struct DrawingSurface {
	context: WgpuContext,
	surface: wgpu::Surface<'static>,
	config: wgpu::SurfaceConfiguration,
	renderer: FrameRenderer,
}

impl std::fmt::Debug for DrawingSurface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DrawingSurface")
			.field("config", &self.config)
			.field("renderer", &self.renderer)
			.finish_non_exhaustive()
	}
}

impl DrawingSurface {
	/// Acquires a graphics context for `canvas` and prepares the pipeline. Any failure here is
	/// fatal; there is no fallback renderer.
	#[tracing::instrument(skip(canvas), err)]
	pub async fn new(
		canvas: web_sys::HtmlCanvasElement,
		background: wgpu::Color,
	) -> Result<Self, RenderError> {
		let viewport = Viewport::new(canvas.width().max(1), canvas.height().max(1));
		let (context, surface) = WgpuContext::for_canvas(canvas).await?;

		let config = surface
			.get_default_config(context.adapter(), viewport.width, viewport.height)
			.ok_or(RenderError::UnsupportedSurface)?;
		surface.configure(context.device(), &config);

		let renderer = FrameRenderer::new(context.device(), config.format, background).await?;

		Ok(Self {
			context,
			surface,
			config,
			renderer,
		})
	}

	pub fn viewport(&self) -> Viewport {
		Viewport::new(self.config.width, self.config.height)
	}

	/// Resizes the surface. Empty viewports are skipped since a surface cannot be configured with
	/// zero extent.
	pub fn set_viewport(&mut self, viewport: Viewport) {
		if viewport.is_empty() {
			tracing::debug!(%viewport, "skipping empty viewport");
			return;
		}
		if viewport == self.viewport() {
			return;
		}
		self.config.width = viewport.width;
		self.config.height = viewport.height;
		self.reconfigure();
	}

	fn reconfigure(&self) {
		tracing::info!(width = self.config.width, height = self.config.height, "configure surface");
		self.surface.configure(self.context.device(), &self.config);
	}

	fn current_texture(&self) -> Option<wgpu::SurfaceTexture> {
		match self.surface.get_current_texture() {
			Ok(surface_texture) => Some(surface_texture),
			Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
				tracing::warn!(?err, "surface needs reconfiguring");
				self.reconfigure();
				self
					.surface
					.get_current_texture()
					.inspect_err(|err| tracing::error!(?err, "failed to get output texture"))
					.ok()
			}
			Err(err) => {
				tracing::error!(?err, "failed to get output texture");
				None
			}
		}
	}

	/// Draws one frame. Frames that cannot acquire a texture are skipped.
	pub fn draw(&self, scene: &Scene) {
		let Some(surface_texture) = self.current_texture() else {
			return;
		};
		let view = surface_texture
			.texture
			.create_view(&wgpu::TextureViewDescriptor::default());
		self
			.renderer
			.render(self.context.device(), self.context.queue(), &view, scene);
		surface_texture.present();
	}
}

use tracing::*;

#[derive(Clone, Debug, thiserror::Error)]
pub enum WgpuContextError {
	#[error("request adapter error")]
	RequestAdapterError,

	#[error("request device error {0}")]
	RequestDeviceError(String),

	#[error("failed to create surface {0}")]
	CreateSurfaceError(String),

	#[error("unsupported platform")]
	UnsupportedPlatform,
}

static_assertions::assert_impl_all!(WgpuContextError: std::error::Error, Send, Sync);

impl From<wgpu::RequestDeviceError> for WgpuContextError {
	fn from(value: wgpu::RequestDeviceError) -> Self {
		WgpuContextError::RequestDeviceError(format!("{}", value))
	}
}

impl From<wgpu::CreateSurfaceError> for WgpuContextError {
	fn from(value: wgpu::CreateSurfaceError) -> Self {
		WgpuContextError::CreateSurfaceError(format!("{}", value))
	}
}

/// Backends to try for a canvas, in order. WebGPU first, then WebGL2 for browsers without it.
pub const CANVAS_BACKENDS: [wgpu::Backends; 2] = [wgpu::Backends::BROWSER_WEBGPU, wgpu::Backends::GL];

#[derive(Debug)]
pub struct WgpuContext {
	adapter: wgpu::Adapter,
	device: wgpu::Device,
	queue: wgpu::Queue,
}

#[cfg(target_arch = "wasm32")]
fn create_canvas_surface(
	instance: &wgpu::Instance,
	canvas: web_sys::HtmlCanvasElement,
) -> Result<wgpu::Surface<'static>, WgpuContextError> {
	Ok(instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?)
}

#[cfg(not(target_arch = "wasm32"))]
fn create_canvas_surface(
	_instance: &wgpu::Instance,
	_canvas: web_sys::HtmlCanvasElement,
) -> Result<wgpu::Surface<'static>, WgpuContextError> {
	Err(WgpuContextError::UnsupportedPlatform)
}

/// The GL backend can only enumerate adapters through an existing surface; WebGPU adapters are
/// independent of it.
fn adapter_needs_surface(backends: wgpu::Backends) -> bool {
	backends.contains(wgpu::Backends::GL)
}

async fn request_adapter(
	instance: &wgpu::Instance,
	compatible_surface: Option<&wgpu::Surface<'_>>,
) -> Result<wgpu::Adapter, WgpuContextError> {
	instance
		.request_adapter(&wgpu::RequestAdapterOptions {
			compatible_surface,
			..Default::default()
		})
		.await
		.ok_or(WgpuContextError::RequestAdapterError)
}

impl WgpuContext {
	/// Creates a headless context on whatever adapter is available.
	#[tracing::instrument(err)]
	pub async fn new() -> Result<Self, WgpuContextError> {
		let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
			flags: wgpu::InstanceFlags::from_build_config().with_env(),
			..Default::default()
		});

		let adapter = request_adapter(&instance, None).await?;

		let (device, queue) = Self::request_device(&adapter).await?;

		Ok(Self {
			adapter,
			device,
			queue,
		})
	}

	/// Creates a context able to present to `canvas`, along with the surface for it. Each of
	/// `CANVAS_BACKENDS` is tried in turn and only the last failure is returned.
	#[tracing::instrument(skip_all, err)]
	pub async fn for_canvas(
		canvas: web_sys::HtmlCanvasElement,
	) -> Result<(Self, wgpu::Surface<'static>), WgpuContextError> {
		let mut last_error = WgpuContextError::RequestAdapterError;
		for backends in CANVAS_BACKENDS {
			match Self::for_canvas_with_backends(canvas.clone(), backends).await {
				Ok(result) => {
					info!(?backends, adapter = ?result.0.adapter.get_info(), "graphics context ready");
					return Ok(result);
				}
				Err(error) => {
					warn!(?backends, %error, "graphics backend unavailable");
					last_error = error;
				}
			}
		}
		Err(last_error)
	}

	async fn for_canvas_with_backends(
		canvas: web_sys::HtmlCanvasElement,
		backends: wgpu::Backends,
	) -> Result<(Self, wgpu::Surface<'static>), WgpuContextError> {
		let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
			backends,
			flags: wgpu::InstanceFlags::from_build_config(),
			..Default::default()
		});

		// A canvas hands out only one kind of context. Taking a WebGPU context before the device
		// exists would leave nothing for the WebGL2 attempt.
		let (adapter, surface) = if adapter_needs_surface(backends) {
			let surface = create_canvas_surface(&instance, canvas.clone())?;
			(request_adapter(&instance, Some(&surface)).await?, Some(surface))
		} else {
			(request_adapter(&instance, None).await?, None)
		};
		let (device, queue) = Self::request_device(&adapter).await?;
		let surface = match surface {
			Some(surface) => surface,
			None => create_canvas_surface(&instance, canvas)?,
		};

		Ok((
			Self {
				adapter,
				device,
				queue,
			},
			surface,
		))
	}

	async fn request_device(
		adapter: &wgpu::Adapter,
	) -> Result<(wgpu::Device, wgpu::Queue), WgpuContextError> {
		Ok(adapter
			.request_device(
				&wgpu::DeviceDescriptor {
					label: Some("daub"),
					required_limits: wgpu::Limits::downlevel_webgl2_defaults()
						.using_resolution(adapter.limits()),
					..Default::default()
				},
				None,
			)
			.await?)
	}

	pub fn adapter(&self) -> &wgpu::Adapter {
		&self.adapter
	}

	pub fn device(&self) -> &wgpu::Device {
		&self.device
	}

	pub fn queue(&self) -> &wgpu::Queue {
		&self.queue
	}
}

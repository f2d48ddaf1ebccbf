//! GPU context bring-up.
//!
//! Owns the instance-to-queue chain plus the surface configuration. Created
//! once when the window first appears and kept for the life of the
//! application; the only mutation afterwards is reconfiguring the surface on
//! resize.

use std::sync::Arc;

use winit::window::Window;

use crate::error::EngineError;

/// Number of frames the presentation engine may queue ahead of the GPU.
pub const FRAMES_IN_FLIGHT: usize = 3;

/// Handles to the GPU and the presentable surface.
pub struct GpuContext {
    /// The window the surface presents into.
    pub window: Arc<Window>,
    /// The presentable surface.
    pub surface: wgpu::Surface<'static>,
    /// Current surface configuration; kept in sync with the window size.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The logical device.
    pub device: wgpu::Device,
    /// The submission queue.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Brings up the full GPU stack for `window`, blocking on the async
    /// adapter and device requests.
    pub fn new(window: Arc<Window>) -> Result<Self, EngineError> {
        pollster::block_on(Self::new_async(window))
    }

    async fn new_async(window: Arc<Window>) -> Result<Self, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::empty(),
            backend_options: wgpu::BackendOptions::from_env_or_default(),
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("rendering with adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: FRAMES_IN_FLIGHT as u32,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            window,
            surface,
            surface_config,
            device,
            queue,
        })
    }

    /// Reconfigures the surface for a new size. Zero dimensions are clamped
    /// away; some platforms report them mid-minimize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Width-over-height ratio of the current surface.
    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height as f32
    }
}

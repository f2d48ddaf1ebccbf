//! Crate-wide error types.
//!
//! All fatal conditions funnel into [`EngineError`] and bubble up to the
//! process boundary, where `main` reports them and exits non-zero. The one
//! recoverable condition — a stale/out-of-date surface — never appears here;
//! it is handled inside the frame scheduler by rebuilding the
//! surface-dependent resources.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures raised during setup, asset loading, or frame execution.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The winit event loop could not be created or run.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The OS refused to create a window.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// The presentable surface could not be created for the window.
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No graphics adapter satisfied the renderer's requirements.
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The selected adapter refused to create a logical device.
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The texture atlas could not be read or decoded.
    #[error("failed to load texture atlas {path:?}: {source}")]
    AtlasLoad {
        /// Path the atlas was expected at.
        path: PathBuf,
        /// Underlying decode or I/O failure.
        source: image::ImageError,
    },

    /// A shader source file could not be read.
    #[error("failed to load shader {path:?}: {source}")]
    ShaderLoad {
        /// Path the shader was expected at.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// An unexpected per-frame failure outside the recoverable stale-surface
    /// path (e.g. the surface reported out-of-memory on acquire).
    #[error("frame execution failed: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

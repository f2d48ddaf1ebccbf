#![warn(missing_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Monochunk
//!
//! A minimal voxel renderer built with Rust and WGPU: one fixed chunk of
//! blocks, meshed with per-face visibility culling and flown through with a
//! free-look camera.
//!
//! ## Key Modules
//!
//! * `world` - Block types and the fixed-size block grid
//! * `mesh` - Face-culled mesh generation and GPU upload
//! * `camera` - Free-fly camera and the model/view/projection matrices
//! * `render` - GPU context, pipeline, textures, and frame scheduling
//! * `app` - Window lifecycle and the event-driven render loop
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(error) = monochunk::run() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

use winit::event_loop::EventLoop;

pub mod app;
pub mod camera;
pub mod error;
pub mod input;
pub mod mesh;
pub mod render;
pub mod world;

pub use error::EngineError;

/// Starts the renderer and blocks until the window closes or an
/// unrecoverable error ends the loop.
pub fn run() -> Result<(), EngineError> {
    let event_loop = EventLoop::new()?;

    let mut app = app::App::default();
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

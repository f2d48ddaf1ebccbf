//! Application lifecycle: window creation, event handling, and the
//! per-frame drive loop.

use std::path::Path;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::camera::Camera;
use crate::error::EngineError;
use crate::input::InputCollector;
use crate::mesh::{generate_mesh, ChunkMesh};
use crate::render::{ChunkPipeline, FrameOutcome, FrameScheduler, GpuContext, Texture};
use crate::world::BlockGrid;

const ATLAS_PATH: &str = "assets/textures/atlas.png";
const SHADER_PATH: &str = "assets/shaders/chunk.wgsl";

/// Everything needed to render once the window and GPU are up.
struct RunningState {
    ctx: GpuContext,
    pipeline: ChunkPipeline,
    mesh: ChunkMesh,
    scheduler: FrameScheduler,
    camera: Camera,
    input: InputCollector,
}

impl RunningState {
    fn new(window: Arc<Window>) -> Result<Self, EngineError> {
        let ctx = GpuContext::new(window)?;

        let pipeline = ChunkPipeline::new(
            &ctx.device,
            ctx.surface_config.format,
            Path::new(SHADER_PATH),
        )?;
        let atlas = Texture::load_atlas(&ctx.device, &ctx.queue, Path::new(ATLAS_PATH))?;

        let grid = BlockGrid::generate();
        let mesh_data = generate_mesh(&grid);
        log::info!(
            "chunk meshed: {} quads, {} vertices",
            mesh_data.quad_count(),
            mesh_data.vertices.len()
        );
        let mesh = ChunkMesh::upload(&ctx.device, &mesh_data);

        let scheduler = FrameScheduler::new(&ctx, &pipeline, &atlas);
        let camera = Camera::new(ctx.aspect_ratio());

        let center = center_of(&ctx.window);
        let input = InputCollector::new((center.x, center.y));

        Ok(Self {
            ctx,
            pipeline,
            mesh,
            scheduler,
            camera,
            input,
        })
    }

    /// Renders one frame from the current input snapshot. The scheduler
    /// applies the snapshot to the camera only once a surface image is in
    /// hand, so a skipped frame moves nothing; after a rendered frame the
    /// pointer is moved back to the viewport center so the next snapshot's
    /// look delta is measured from center again. A skipped frame leaves
    /// the pointer alone — its snapshot was never consumed.
    fn redraw(&mut self) -> Result<(), EngineError> {
        let snapshot = self.input.snapshot();
        let outcome = self.scheduler.render_frame(
            &mut self.ctx,
            &self.pipeline,
            &self.mesh,
            &mut self.camera,
            &snapshot,
        )?;
        if outcome == FrameOutcome::Skipped {
            return Ok(());
        }

        let center = center_of(&self.ctx.window);
        if self
            .ctx
            .window
            .set_cursor_position(PhysicalPosition::new(center.x, center.y))
            .is_ok()
        {
            self.input.set_pointer((center.x, center.y));
        }
        Ok(())
    }
}

fn center_of(window: &Window) -> PhysicalPosition<f64> {
    let size = window.inner_size();
    PhysicalPosition::new(size.width as f64 / 2.0, size.height as f64 / 2.0)
}

/// Top-level event handler passed to the winit event loop.
#[derive(Default)]
pub struct App {
    state: Option<RunningState>,
    /// First unrecoverable error; set just before the loop exits and
    /// reported by `run`.
    pub fatal: Option<EngineError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{error}");
        if self.fatal.is_none() {
            self.fatal = Some(error);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes().with_title("monochunk");
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(error) => return self.fail(event_loop, error.into()),
        };

        // Mouse-look wants the cursor captive and invisible. Grab support
        // varies by platform; a denied grab still renders fine.
        if let Err(error) = window.set_cursor_grab(CursorGrabMode::Confined) {
            log::warn!("cursor grab unavailable: {error}");
        }
        window.set_cursor_visible(false);

        match RunningState::new(window) {
            Ok(state) => self.state = Some(state),
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            if let WindowEvent::CloseRequested = event {
                event_loop.exit();
            }
            return;
        };

        state.input.intake_input(&event);

        match event {
            WindowEvent::Resized(_) => {
                state.scheduler.request_resize();
            }
            WindowEvent::Focused(is_focused) => {
                if !is_focused {
                    state.input.reset();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = state.redraw() {
                    self.fail(event_loop, error);
                }
            }
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.ctx.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Let in-flight frames drain before GPU resources drop.
        if let Some(state) = &self.state {
            state.scheduler.wait_idle(&state.ctx);
        }
    }
}

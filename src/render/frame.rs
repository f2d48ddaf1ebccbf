//! Per-frame scheduling: frames in flight, fences, and the acquire /
//! record / submit / present cycle.
//!
//! The renderer keeps a small ring of frame slots, each with its own
//! uniform buffer, bind group, and fence. A frame reuses its slot's
//! resources only after the fence confirms the GPU finished the previous
//! submission that used them, so the CPU can run up to the ring's length
//! ahead of the GPU without overwriting live data.

use std::sync::{Arc, Condvar, Mutex};

use crate::camera::Camera;
use crate::error::EngineError;
use crate::input::InputSnapshot;
use crate::mesh::ChunkMesh;
use crate::render::context::{GpuContext, FRAMES_IN_FLIGHT};
use crate::render::pipeline::ChunkPipeline;
use crate::render::texture::Texture;

/// Clear color for the color attachment, a light sky blue.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.537,
    g: 0.906,
    b: 1.0,
    a: 1.0,
};

/// A host-visible fence signaled from the GPU's completion callback.
///
/// Starts signaled so a slot's first frame never blocks. Waiting parks the
/// thread on a condvar until the matching `signal` call; wgpu's
/// `on_submitted_work_done` callback fires on another thread, which is why
/// this is an `Arc` internally and `Clone` hands out handles to it.
#[derive(Clone)]
pub struct GpuFence {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl GpuFence {
    /// Creates a fence in the signaled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(true), Condvar::new())),
        }
    }

    /// Blocks until the fence is signaled. Returns immediately if it
    /// already is.
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let mut signaled = lock.lock().unwrap();
        while !*signaled {
            signaled = cvar.wait(signaled).unwrap();
        }
    }

    /// Puts the fence back in the unsignaled state ahead of a submission.
    pub fn reset(&self) {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap() = false;
    }

    /// Marks the fence signaled and wakes any waiter.
    pub fn signal(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }
}

impl Default for GpuFence {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycles through the frame-slot indices.
pub struct FlightRing {
    current: usize,
    len: usize,
}

impl FlightRing {
    /// Creates a ring over `len` slots, starting at slot 0.
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    /// The slot the next frame will use.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Moves to the next slot, wrapping at the end.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.len;
    }
}

/// How a frame ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was drawn and presented; its input snapshot was consumed.
    Rendered,
    /// The frame was dropped before recording (stale surface or acquire
    /// timeout). Nothing was consumed: the camera did not move and the
    /// input snapshot carries over to the next frame.
    Skipped,
}

/// What to do with the result of a surface acquire.
#[derive(Debug, PartialEq, Eq)]
enum AcquireAction {
    /// Skip this frame and rebuild the surface before the next one.
    SkipAndRebuild,
    /// Skip this frame; the surface is fine.
    Skip,
    /// Unrecoverable, propagate.
    Fail,
}

fn classify_acquire_error(error: &wgpu::SurfaceError) -> AcquireAction {
    match error {
        // The surface no longer matches the window; reconfigure and retry
        // next frame.
        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => AcquireAction::SkipAndRebuild,
        // The presentation engine stalled; nothing is wrong with the
        // surface itself.
        wgpu::SurfaceError::Timeout => AcquireAction::Skip,
        wgpu::SurfaceError::OutOfMemory | wgpu::SurfaceError::Other => AcquireAction::Fail,
    }
}

/// Resources owned by one frame in flight.
struct FrameSlot {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    fence: GpuFence,
}

impl FrameSlot {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        atlas: &Texture,
        index: usize,
    ) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("Frame {index} MVP Buffer")),
            size: std::mem::size_of::<crate::camera::MvpUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("Frame {index} Bind Group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });
        Self {
            uniform_buffer,
            bind_group,
            fence: GpuFence::new(),
        }
    }
}

/// Drives the per-frame render cycle.
pub struct FrameScheduler {
    slots: Vec<FrameSlot>,
    ring: FlightRing,
    depth_texture: Texture,
    resize_pending: bool,
}

impl FrameScheduler {
    /// Creates the frame slots and the initial depth texture. The first
    /// frame performs a surface rebuild so every size-dependent resource
    /// starts from the same dimensions.
    pub fn new(ctx: &GpuContext, pipeline: &ChunkPipeline, atlas: &Texture) -> Self {
        let slots = (0..FRAMES_IN_FLIGHT)
            .map(|index| FrameSlot::new(&ctx.device, &pipeline.bind_group_layout, atlas, index))
            .collect();
        let depth_texture =
            Texture::create_depth_texture(&ctx.device, &ctx.surface_config, "Chunk Depth Texture");
        Self {
            slots,
            ring: FlightRing::new(FRAMES_IN_FLIGHT),
            depth_texture,
            resize_pending: true,
        }
    }

    /// Notes that the window changed size. The surface is rebuilt at the
    /// start of the next frame rather than immediately, after the frame
    /// slot's fence has been waited on.
    pub fn request_resize(&mut self) {
        self.resize_pending = true;
    }

    fn rebuild_surface(&mut self, ctx: &mut GpuContext, camera: &mut Camera) {
        let size = ctx.window.inner_size();
        ctx.resize(size.width, size.height);
        self.depth_texture =
            Texture::create_depth_texture(&ctx.device, &ctx.surface_config, "Chunk Depth Texture");
        camera.modify_aspect_ratio(ctx.aspect_ratio());
        self.resize_pending = false;
        log::debug!(
            "surface rebuilt at {}x{}",
            ctx.surface_config.width,
            ctx.surface_config.height
        );
    }

    /// Renders one frame.
    ///
    /// Waits for the slot's fence, performs any pending surface rebuild,
    /// and acquires a surface image. Only then is the input snapshot
    /// applied to the camera and the result uploaded into the slot's
    /// uniform buffer, so a skipped frame moves nothing; the draw is then
    /// recorded, submitted, and presented, and the ring advances. Acquire
    /// failures that indicate a stale surface skip the frame and flag a
    /// rebuild; a skipped frame is not an error.
    pub fn render_frame(
        &mut self,
        ctx: &mut GpuContext,
        pipeline: &ChunkPipeline,
        mesh: &ChunkMesh,
        camera: &mut Camera,
        snapshot: &InputSnapshot,
    ) -> Result<FrameOutcome, EngineError> {
        let slot_index = self.ring.current();
        self.slots[slot_index].fence.wait();

        if self.resize_pending {
            self.rebuild_surface(ctx, camera);
        }

        let frame = match ctx.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(error) => match classify_acquire_error(&error) {
                AcquireAction::SkipAndRebuild => {
                    self.resize_pending = true;
                    return Ok(FrameOutcome::Skipped);
                }
                AcquireAction::Skip => return Ok(FrameOutcome::Skipped),
                AcquireAction::Fail => return Err(EngineError::Frame(error)),
            },
        };
        if frame.suboptimal {
            self.resize_pending = true;
        }

        camera.process_input(
            snapshot,
            (ctx.surface_config.width, ctx.surface_config.height),
        );

        let slot = &self.slots[slot_index];
        ctx.queue
            .write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&camera.uniform()));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Chunk Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Chunk Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&pipeline.render_pipeline);
            render_pass.set_bind_group(0, &slot.bind_group, &[]);
            mesh.draw(&mut render_pass);
        }

        slot.fence.reset();
        ctx.queue.submit(std::iter::once(encoder.finish()));
        let fence = slot.fence.clone();
        ctx.queue.on_submitted_work_done(move || fence.signal());

        frame.present();
        self.ring.advance();
        Ok(FrameOutcome::Rendered)
    }

    /// Blocks until every in-flight frame has finished on the GPU. Called
    /// before teardown so resources are not destroyed mid-frame.
    pub fn wait_idle(&self, ctx: &GpuContext) {
        if let Err(error) = ctx.device.poll(wgpu::PollType::Wait) {
            log::warn!("device drain during teardown failed: {error}");
        }
        for slot in &self.slots {
            slot.fence.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn fence_starts_signaled() {
        let fence = GpuFence::new();
        // Must not block.
        fence.wait();
    }

    #[test]
    fn reset_fence_blocks_until_signaled() {
        let fence = GpuFence::new();
        fence.reset();

        let (tx, rx) = mpsc::channel();
        let waiter = fence.clone();
        let handle = std::thread::spawn(move || {
            waiter.wait();
            tx.send(()).unwrap();
        });

        // The waiter must still be parked.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        fence.signal();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        handle.join().unwrap();
    }

    #[test]
    fn signal_is_sticky_across_waits() {
        let fence = GpuFence::new();
        fence.reset();
        fence.signal();
        fence.wait();
        fence.wait();
    }

    #[test]
    fn ring_cycles_through_all_slots() {
        let mut ring = FlightRing::new(3);
        let order: Vec<usize> = (0..7)
            .map(|_| {
                let slot = ring.current();
                ring.advance();
                slot
            })
            .collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn stale_surface_errors_trigger_a_rebuild() {
        assert_eq!(
            classify_acquire_error(&wgpu::SurfaceError::Outdated),
            AcquireAction::SkipAndRebuild
        );
        assert_eq!(
            classify_acquire_error(&wgpu::SurfaceError::Lost),
            AcquireAction::SkipAndRebuild
        );
    }

    #[test]
    fn timeout_skips_without_rebuilding() {
        assert_eq!(
            classify_acquire_error(&wgpu::SurfaceError::Timeout),
            AcquireAction::Skip
        );
    }

    #[test]
    fn fatal_acquire_errors_propagate() {
        assert_eq!(
            classify_acquire_error(&wgpu::SurfaceError::OutOfMemory),
            AcquireAction::Fail
        );
    }
}

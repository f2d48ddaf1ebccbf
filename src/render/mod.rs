//! GPU-facing rendering layer: context bring-up, the chunk pipeline,
//! textures, and the per-frame scheduler.

pub mod context;
pub mod frame;
pub mod pipeline;
pub mod texture;

pub use context::{GpuContext, FRAMES_IN_FLIGHT};
pub use frame::{FrameOutcome, FrameScheduler};
pub use pipeline::ChunkPipeline;
pub use texture::Texture;

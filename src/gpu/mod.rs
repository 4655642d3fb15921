mod buffers;
mod context;
mod quad;
mod render;

pub use buffers::QuadBuffers;
pub use context::GpuContext;
pub use quad::{CellLayout, QuadInstance};
pub use render::RenderPipeline;

//! Image store implementations - filesystem and in-memory.

mod fs;
mod memory;

pub use fs::FsImageStore;
pub use memory::InMemoryImageStore;

//! Registration flow logic: duplicate screening, id allocation, photo storage.

mod allocator;
mod photos;
mod screener;

pub use allocator::IdAllocator;
pub use photos::PhotoStore;
pub use screener::{find_duplicates, DuplicateFlags};

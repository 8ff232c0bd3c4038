//! Carry storage for multiplexed framing.
//!
//! A multiplexed framer keeps no carry of its own; it reaches each
//! connection's buffer through a [`CarryStore`]. The store decides how
//! buffers are kept (map, external cache, per-socket state) and when they
//! are discarded.

pub mod func;
pub mod memory;
pub mod traits;

pub use func::FnCarryStore;
pub use memory::MemoryCarryStore;
pub use traits::CarryStore;

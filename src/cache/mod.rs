// Gateway module for the prediction cache - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod slot;
mod store;
mod types;

// Public re-exports - the ONLY way to access cache functionality
pub use slot::CacheSlot;
pub use store::PredictionCache;
pub use types::CacheEntry;

//! Single-flight coordination for token refresh.

pub mod coalescer;

pub use coalescer::RefreshCoalescer;

pub mod allocator;
pub mod error;
pub mod metrics;
pub mod model;
pub mod overlap;
pub mod resolution;
pub mod session;
pub mod session_manager;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

//! HTTP server for the consultation summary service.
//!
//! Exposed as a library so integration tests can build the router
//! in-process with mock dependencies injected.

pub mod api;
pub mod state;

pub use api::create_router;
pub use state::AppState;

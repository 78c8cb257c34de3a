pub mod handlers;
pub mod routes;
pub mod summary;

pub use routes::create_router;

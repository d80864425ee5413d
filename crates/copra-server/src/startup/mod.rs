//! Server startup: logging initialization and HTTP server builder

pub mod http;
pub mod logging;

pub use http::api_server;
pub use logging::init_logging;

//! Request/response models and server configuration

pub mod config;
pub mod request;
pub mod response;

pub use config::Configuration;

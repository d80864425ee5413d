//! HTTP API handlers

pub mod compare;
pub mod properties;
pub mod route;
pub mod transfer;

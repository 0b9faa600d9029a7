//! Core NTX library (notes API client, session storage, config).

pub mod api;
pub mod config;
pub mod markup;
pub mod session;

//! Artwork collection browser library
//!
//! An async client for the Art Institute of Chicago collection API plus the
//! browsing state a table front end needs: server-side pagination and a
//! selection set that survives page changes.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod session;

mod client;

pub use client::*;
pub use config::ClientConfig;
pub use error::Error;

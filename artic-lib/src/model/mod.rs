//! Typed models

mod artwork;

pub use artwork::*;

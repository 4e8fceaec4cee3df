//! Collection API: page windows, request URLs and page sources.

mod page;
pub mod query;
mod source;

pub use page::*;
pub use source::*;

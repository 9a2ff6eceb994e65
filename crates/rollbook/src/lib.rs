#![doc = include_str!("../README.md")]

mod avg;
mod error;
mod record;
mod store;

pub use crate::avg::*;
pub use crate::error::*;
pub use crate::record::*;
pub use crate::store::*;

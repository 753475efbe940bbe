//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{format_gbp, format_rate, to_pence};
pub use pagination::{PageRequest, PageResponse};

//! Wire types and domain values shared by the job search client crates.

pub mod domain;
pub mod error;
pub mod protocol;

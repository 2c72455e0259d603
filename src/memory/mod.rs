//! Memory model for MiniC programs
//!
//! - [`value`]: tagged runtime values and their coercions
//! - [`env`]: typed variable cells of a running function

pub mod env;
pub mod value;

//! # Utility functions and structs
//! GLの本体には存在しないがあると便利なutilityの関数たち。

mod program;
pub use program::*;
mod color_target;
pub use color_target::*;
mod quad;
pub use quad::*;
mod error;
pub use error::*;

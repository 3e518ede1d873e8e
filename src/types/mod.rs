//! Data types shared by the grid surfaces and controllers.

mod cell;
mod selection;

pub use cell::*;
pub use selection::*;

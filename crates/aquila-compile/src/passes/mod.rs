//! Built-in compilation passes.

mod unroller;

pub use unroller::Unroller;

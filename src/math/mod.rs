//! Math primitives for multi-axis planning.

mod vector;

pub use vector::Vector;

//! Command implementations

pub mod board;
pub mod check;
pub mod completions;
pub mod merge;
pub mod normalize;
pub mod show;
pub mod sync;

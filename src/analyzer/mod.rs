//! Decision engine for reducing commits to a bump level

pub mod level_decider;

pub use level_decider::{decide, Decision, LevelDecider};

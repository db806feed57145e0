//! Commonly used imports
//!
//! Use `use transduce::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{DriveError, Driven, Process};

// Derived stages
pub use crate::build::{
    count, exists, filter, identity, lift, lift_one, loop_fn, mean, skip, skip_while, sum, take,
    take_while,
};

// Structural combinators
pub use crate::compose::{append, feed, flat_map, pipe, repeat, zip};

//! Building processes from scratch.
//!
//! This module provides the derived stage library: ready-made transducers
//! expressed with the [`Process`](crate::Process) constructors and the
//! structural combinators.

mod stage;
mod state;

// Re-export building blocks
pub use stage::{
    exists, filter, identity, lift, lift_one, skip, skip_while, take, take_while,
};
pub use state::{count, loop_fn, mean, sum};

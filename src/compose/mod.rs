//! Combining processes together.
//!
//! This module provides the structural combinators: sequential fusion
//! ([`pipe`]), restarting ([`repeat`]), concatenation ([`append`]), monadic
//! chaining ([`flat_map`]), and synchronized pairing ([`zip`] with its
//! helper [`feed`]). All of them are free functions over the
//! [`Process`](crate::Process) enum with exhaustive case analysis; the
//! methods on `Process` are thin wrappers around them.

mod append;
mod pipe;
mod repeat;
mod zip;

pub use append::{append, flat_map};
pub use pipe::pipe;
pub use repeat::repeat;
pub use zip::{feed, zip};

use crate::Process;

/// Rebuild a peeled run of emit heads in front of `rest`.
///
/// The combinators walk emit spines with a loop and a work list instead of
/// native recursion, so a long spine costs heap, not stack.
pub(crate) fn replay<I, O>(heads: Vec<O>, rest: Process<I, O>) -> Process<I, O> {
    let mut process = rest;
    for head in heads.into_iter().rev() {
        process = Process::Emit(head, Box::new(process));
    }
    process
}

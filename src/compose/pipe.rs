use std::rc::Rc;

use super::replay;
use crate::Process;

/// Connect `upstream`'s output channel to `downstream`'s input channel.
///
/// The case analysis is downstream-driven:
///
/// - downstream `Halt`: the fused process halts, whatever upstream still
///   had to offer.
/// - downstream `Emit`: the value flows through immediately, independent of
///   upstream.
/// - downstream `Await`: upstream is consulted. A halted upstream forwards
///   the end-of-input signal; an emitting upstream feeds its head in; an
///   awaiting upstream suspends the whole fused process until external
///   input arrives.
///
/// Downstream controls termination, upstream controls data availability,
/// and suspension propagates outward.
///
/// # Examples
///
/// ```rust
/// use transduce::prelude::*;
///
/// let capped = identity().pipe(take(2));
/// assert_eq!(capped.run([9, 8, 7]), vec![9, 8]);
/// ```
pub fn pipe<I, X, O>(upstream: Process<I, X>, downstream: Process<X, O>) -> Process<I, O>
where
    I: 'static,
    X: 'static,
    O: 'static,
{
    let mut up = upstream;
    let mut down = downstream;
    let mut emitted = Vec::new();
    loop {
        match down {
            Process::Halt => return replay(emitted, Process::Halt),
            Process::Emit(head, tail) => {
                emitted.push(head);
                down = *tail;
            }
            Process::Await(recv) => match up {
                Process::Halt => {
                    down = (*recv)(None);
                    up = Process::Halt;
                }
                Process::Emit(head, tail) => {
                    down = (*recv)(Some(head));
                    up = *tail;
                }
                Process::Await(pull) => {
                    let suspended = Process::await_with(move |input| {
                        pipe((*pull)(input), Process::Await(Rc::clone(&recv)))
                    });
                    return replay(emitted, suspended);
                }
            },
        }
    }
}

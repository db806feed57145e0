use std::rc::Rc;

use super::replay;
use crate::Process;

/// Pair two processes driven by the same input stream.
///
/// Outputs are paired in lock step: the zipped process emits only when both
/// sides have a value ready, and halts as soon as either side halts. Input
/// is shared, not split: when one side awaits, the element it receives is
/// also threaded into the other side with [`feed`], so both sides see every
/// element exactly once and in order even when their emit/await rhythms
/// differ.
///
/// The cases are checked in priority order: either side `Halt`, both sides
/// `Emit`, the left side `Await`, then the right side `Await`.
///
/// # Examples
///
/// ```rust
/// use transduce::prelude::*;
///
/// let paired = zip(count(), sum());
/// assert_eq!(
///     paired.run([1.0, 5.0, 10.0, 15.0]),
///     vec![(1, 1.0), (2, 6.0), (3, 16.0), (4, 31.0)],
/// );
/// ```
pub fn zip<I, A, B>(left: Process<I, A>, right: Process<I, B>) -> Process<I, (A, B)>
where
    I: Clone + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
{
    let mut left = left;
    let mut right = right;
    let mut emitted = Vec::new();
    loop {
        match (left, right) {
            (Process::Halt, _) | (_, Process::Halt) => return replay(emitted, Process::Halt),
            (Process::Emit(lh, lt), Process::Emit(rh, rt)) => {
                emitted.push((lh, rh));
                left = *lt;
                right = *rt;
            }
            (Process::Await(recv), other) => {
                let other = Rc::new(other);
                let awaiting = Process::await_with(move |input: Option<I>| {
                    zip((*recv)(input.clone()), feed(input, (*other).clone()))
                });
                return replay(emitted, awaiting);
            }
            (other, Process::Await(recv)) => {
                let other = Rc::new(other);
                let awaiting = Process::await_with(move |input: Option<I>| {
                    zip(feed(input.clone(), (*other).clone()), (*recv)(input))
                });
                return replay(emitted, awaiting);
            }
        }
    }
}

/// Advance a process by one externally supplied input signal.
///
/// Pending emits are drained in front of the delivery: the signal reaches
/// the first `Await`, a halted process stays halted, and the process never
/// pulls fresh input of its own. [`zip`] uses this to hand the element one
/// side received to the other side.
pub fn feed<I, O>(input: Option<I>, process: Process<I, O>) -> Process<I, O> {
    let mut current = process;
    let mut emitted = Vec::new();
    loop {
        match current {
            Process::Halt => return replay(emitted, Process::Halt),
            Process::Emit(head, tail) => {
                emitted.push(head);
                current = *tail;
            }
            Process::Await(recv) => return replay(emitted, (*recv)(input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{count, identity, skip, sum, take};
    use crate::Process;

    #[test]
    fn test_zip_pairs_in_lock_step() {
        let paired = zip(count(), sum());
        assert_eq!(
            paired.run([1.0, 5.0, 10.0, 15.0]),
            vec![(1, 1.0), (2, 6.0), (3, 16.0), (4, 31.0)],
        );
    }

    #[test]
    fn test_zip_halts_with_either_side() {
        let paired = zip(take(2), identity());
        assert_eq!(paired.run([7, 8, 9]), vec![(7, 7), (8, 8)]);

        let paired = zip(identity(), take(1));
        assert_eq!(paired.run([7, 8, 9]), vec![(7, 7)]);
    }

    #[test]
    fn test_zip_of_halt_is_halt() {
        let paired: Process<i32, (i32, i32)> = zip(Process::halt(), identity());
        assert!(paired.is_halt());
    }

    #[test]
    fn test_zip_shares_input_across_different_rhythms() {
        // skip(1) stays silent on the first element while count emits for
        // every element; both see the whole input once each, and outputs
        // pair up positionally.
        let paired = zip(skip(1), count());
        assert_eq!(paired.run([10, 20, 30]), vec![(20, 1), (30, 2)]);
    }

    #[test]
    fn test_feed_reaches_first_await() {
        let stage: Process<i32, i32> = identity();
        let advanced = feed(Some(5), stage);
        assert_eq!(advanced.run(Vec::new()), vec![5]);
    }

    #[test]
    fn test_feed_drains_emits_before_delivery() {
        let stage = Process::emit_then(1, identity());
        let advanced = feed(Some(2), stage);
        assert_eq!(advanced.run(Vec::new()), vec![1, 2]);
    }

    #[test]
    fn test_feed_leaves_halt_alone() {
        let stage: Process<i32, i32> = Process::halt();
        assert!(feed(Some(1), stage).is_halt());
    }
}

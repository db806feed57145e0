use std::rc::Rc;

use super::replay;
use crate::Process;

/// Restart `process` from its original shape every time it halts.
///
/// The restart preserves the single end-of-input contract: an `Await` that
/// receives the end-of-input signal runs its end-of-input branch as-is, so
/// trailing emits and true termination are kept instead of looping forever
/// on absent input.
///
/// Repeating `Halt` stays `Halt`. Repeating a process whose head is `Emit`
/// denotes an unbounded output stream and diverges while it is being built;
/// `repeat` is meant for await-headed one-shot stages such as
/// [`lift_one`](crate::build::lift_one).
///
/// # Examples
///
/// ```rust
/// use transduce::prelude::*;
/// use transduce::Process;
///
/// // One-shot stage: emits the first even element, then halts.
/// let one_even: Process<i32, i32> = Process::await_with(|input| match input {
///     Some(x) if x % 2 == 0 => Process::emit(x),
///     _ => Process::Halt,
/// });
/// // Restarted after every element, it keeps every even element.
/// assert_eq!(repeat(one_even).run([1, 2, 3, 4]), vec![2, 4]);
/// ```
pub fn repeat<I, O>(process: Process<I, O>) -> Process<I, O>
where
    I: 'static,
    O: Clone + 'static,
{
    if process.is_halt() {
        return Process::Halt;
    }
    let original = Rc::new(process.clone());
    restart(process, original)
}

fn restart<I, O>(process: Process<I, O>, original: Rc<Process<I, O>>) -> Process<I, O>
where
    I: 'static,
    O: Clone + 'static,
{
    let mut current = process;
    let mut emitted = Vec::new();
    loop {
        match current {
            Process::Halt => current = (*original).clone(),
            Process::Emit(head, tail) => {
                emitted.push(head);
                current = *tail;
            }
            Process::Await(recv) => {
                let shared = Rc::clone(&original);
                let awaiting = Process::await_with(move |input| match input {
                    Some(value) => restart((*recv)(Some(value)), Rc::clone(&shared)),
                    None => (*recv)(None),
                });
                return replay(emitted, awaiting);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{filter, take};
    use crate::Process;

    #[test]
    fn test_repeat_of_halt_is_halt() {
        let stage: Process<i32, i32> = repeat(Process::halt());
        assert!(stage.is_halt());
    }

    #[test]
    fn test_repeated_filter_terminates_on_exhausted_input() {
        let evens = filter(|x: &i32| x % 2 == 0);
        assert_eq!(evens.run([1, 2, 3, 4]), vec![2, 4]);
    }

    #[test]
    fn test_repeat_restarts_a_bounded_stage() {
        // take(2) halts after two elements; repeated, it echoes everything.
        let stage = repeat(take(2));
        assert_eq!(stage.run([1, 2, 3, 4, 5]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_end_of_input_branch_is_not_restarted() {
        // A stage that emits a trailing marker at end of input. Restarting
        // it there would loop forever; the trailing branch must run as-is.
        fn marked() -> Process<i32, i32> {
            Process::await_with(|input| match input {
                Some(value) => Process::emit(value),
                None => Process::emit(-1),
            })
        }
        assert_eq!(repeat(marked()).run([1, 2]), vec![1, 2, -1]);
    }
}

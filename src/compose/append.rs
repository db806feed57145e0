use std::rc::Rc;

use super::replay;
use crate::Process;

/// Run `process` to completion, then continue as `next()`.
///
/// The continuation replaces the process's `Halt` and is built lazily, only
/// once the process actually halts. Emits flow through unchanged and awaits
/// thread the continuation along.
///
/// # Examples
///
/// ```rust
/// use transduce::prelude::*;
///
/// let spliced = append(take(3), || take(5));
/// assert_eq!(spliced.run(1..=12), vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn append<I, O, F>(process: Process<I, O>, next: F) -> Process<I, O>
where
    I: 'static,
    O: 'static,
    F: Fn() -> Process<I, O> + 'static,
{
    splice(process, Rc::new(next))
}

fn splice<I, O>(process: Process<I, O>, next: Rc<dyn Fn() -> Process<I, O>>) -> Process<I, O>
where
    I: 'static,
    O: 'static,
{
    let mut current = process;
    let mut emitted = Vec::new();
    loop {
        match current {
            Process::Halt => return replay(emitted, (*next)()),
            Process::Emit(head, tail) => {
                emitted.push(head);
                current = *tail;
            }
            Process::Await(recv) => {
                let awaiting = Process::await_with(move |input| {
                    splice((*recv)(input), Rc::clone(&next))
                });
                return replay(emitted, awaiting);
            }
        }
    }
}

/// Monadic bind over the output channel.
///
/// Every value `process` emits is replaced by the process `f` builds from
/// it; the replacements run in order, spliced together with [`append`].
/// Awaits pass through untouched, so the bound process still consumes the
/// original input channel.
///
/// Satisfies the monad laws up to emitted sequence: binding a single emit
/// is `f`, binding with `Process::emit` is the original process, and
/// nesting associates.
pub fn flat_map<I, O, O2, F>(process: Process<I, O>, f: F) -> Process<I, O2>
where
    I: 'static,
    O: Clone + 'static,
    O2: 'static,
    F: Fn(O) -> Process<I, O2> + 'static,
{
    bind(process, Rc::new(f))
}

fn bind<I, O, O2>(
    process: Process<I, O>,
    f: Rc<dyn Fn(O) -> Process<I, O2>>,
) -> Process<I, O2>
where
    I: 'static,
    O: Clone + 'static,
    O2: 'static,
{
    match process {
        Process::Halt => Process::Halt,
        Process::Emit(head, tail) => {
            let first = (*f)(head);
            let rest = Rc::new(*tail);
            append(first, move || bind((*rest).clone(), Rc::clone(&f)))
        }
        Process::Await(recv) => {
            Process::await_with(move |input| bind((*recv)(input), Rc::clone(&f)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{identity, take};
    use crate::Process;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_append_splices_at_halt() {
        let spliced = append(take(3), || take(5));
        assert_eq!(spliced.run(1..=12), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_append_to_halt_is_the_continuation() {
        let spliced: Process<i32, i32> = append(Process::halt(), || Process::emit(9));
        assert_eq!(spliced.run(Vec::new()), vec![9]);
    }

    #[test]
    fn test_append_continuation_is_lazy() {
        let built = Rc::new(Cell::new(false));
        let witness = Rc::clone(&built);
        let spliced = append(take(2), move || {
            witness.set(true);
            identity()
        });
        // take(2) has not halted yet, so the continuation is untouched.
        let mut driven = spliced.drive(1..=5);
        assert_eq!(driven.next(), Some(1));
        assert!(!built.get());
        assert_eq!(driven.next(), Some(2));
        assert_eq!(driven.next(), Some(3));
        assert!(built.get());
    }

    #[test]
    fn test_flat_map_splices_per_emitted_value() {
        let doubled = flat_map(identity(), |x: i32| Process::emit_all([x, x * 10]));
        assert_eq!(doubled.run([1, 2]), vec![1, 10, 2, 20]);
    }

    #[test]
    fn test_flat_map_of_halt_is_halt() {
        let bound: Process<i32, i32> = flat_map(Process::halt(), |x| Process::emit(x));
        assert!(bound.is_halt());
    }

    #[test]
    fn test_flat_map_left_identity() {
        let f = |x: i32| Process::emit_all(vec![x, x + 1]);
        let bound: Process<i32, i32> = flat_map(Process::emit(5), f);
        assert_eq!(bound.run(Vec::new()), f(5).run(Vec::new()));
    }

    #[test]
    fn test_flat_map_right_identity() {
        let source: Process<i32, i32> = Process::emit_all([1, 2, 3]);
        let bound = flat_map(source.clone(), Process::emit);
        assert_eq!(bound.run(Vec::new()), source.run(Vec::new()));
    }
}

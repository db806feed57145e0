use std::rc::Rc;

use crate::Process;

/// Generalized stateful stage.
///
/// For every input element, `step` receives the element and the current
/// state and returns the value to emit together with the next state. The
/// state is threaded by value through each step rather than closed over and
/// mutated, so the stage stays a pure value that can be re-driven from its
/// initial state. Halts at end of input.
///
/// Every accumulator-style stage in this module is a `loop_fn`.
///
/// ```rust
/// use transduce::prelude::*;
///
/// let running_max = loop_fn(i32::MIN, |x, best: i32| {
///     let next = best.max(x);
///     (next, next)
/// });
/// assert_eq!(running_max.run([3, 1, 4, 1, 5]), vec![3, 3, 4, 4, 5]);
/// ```
pub fn loop_fn<S, I, O, F>(state: S, step: F) -> Process<I, O>
where
    S: Clone + 'static,
    I: 'static,
    O: 'static,
    F: Fn(I, S) -> (O, S) + 'static,
{
    fn go<S, I, O>(state: S, step: Rc<dyn Fn(I, S) -> (O, S)>) -> Process<I, O>
    where
        S: Clone + 'static,
        I: 'static,
        O: 'static,
    {
        Process::await_with(move |input| match input {
            Some(value) => {
                let (output, next) = (*step)(value, state.clone());
                Process::emit_then(output, go(next, Rc::clone(&step)))
            }
            None => Process::Halt,
        })
    }
    go(state, Rc::new(step))
}

/// Emit a 1-based running index for every input element.
///
/// ```rust
/// use transduce::prelude::*;
///
/// let indices = count::<char>();
/// assert_eq!(indices.run(['a', 'b', 'c']), vec![1, 2, 3]);
/// ```
pub fn count<I>() -> Process<I, usize>
where
    I: 'static,
{
    loop_fn(1, |_, index| (index, index + 1))
}

/// Emit the running total of the input.
pub fn sum() -> Process<f64, f64> {
    loop_fn(0.0, |value, total| {
        let total = total + value;
        (total, total)
    })
}

/// Emit the running average of the input.
pub fn mean() -> Process<f64, f64> {
    loop_fn((1usize, 0.0), |value, (index, total)| {
        let total = total + value;
        (total / index as f64, (index + 1, total))
    })
}

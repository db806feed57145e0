//! The core stage type.
//!
//! This module defines [`Process`], the fundamental building block for
//! pull-driven pipelines in this library. A [`Process<I, O>`] is a stage that
//! consumes elements of `I` one at a time and produces elements of `O`.
//!
//! # The three shapes
//!
//! A process is always in exactly one of three shapes:
//!
//! - [`Halt`](Process::Halt): finished, emits nothing more and consumes
//!   nothing more.
//! - [`Emit`](Process::Emit): produces one output value now, then continues
//!   as its tail.
//! - [`Await`](Process::Await): requests one input element. The receive
//!   function is called with `Some(value)` while input is available, or with
//!   `None` exactly once when the input is exhausted, giving the stage a
//!   chance to emit trailing output before halting.
//!
//! # Examples
//!
//! ```rust
//! use transduce::prelude::*;
//!
//! let evens = filter(|x: &i32| x % 2 == 0);
//! assert_eq!(evens.run([1, 2, 3, 4]), vec![2, 4]);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::{build, compose};

/// The receive function stored in a [`Process::Await`] node.
///
/// Shared behind an `Rc` so that process values clone structurally: resuming
/// a process never consumes it, and the same value can be driven against
/// different inputs.
pub type Recv<I, O> = Rc<dyn Fn(Option<I>) -> Process<I, O>>;

/// One stage of a pull-driven pipeline, consuming `I` and producing `O`.
///
/// A `Process` is an immutable value built by recursive case analysis: every
/// combinator returns a new process and never mutates an existing one. Any
/// "memory" a stage needs (counters, running totals) lives in closure state
/// that is rebuilt on each step, so driving a process never changes it and
/// the same value can be re-driven deterministically.
///
/// ```rust
/// use transduce::prelude::*;
///
/// let total = sum();
/// assert_eq!(total.clone().run([1.0, 2.0]), vec![1.0, 3.0]);
/// // The original value is untouched and can be driven again.
/// assert_eq!(total.run([5.0]), vec![5.0]);
/// ```
pub enum Process<I, O> {
    /// Terminal: emits nothing more, consumes nothing more.
    Halt,
    /// Produce one output value now, then continue as the boxed tail.
    Emit(O, Box<Process<I, O>>),
    /// Request one input element; the receive function is given
    /// `Some(value)` or, exactly once at end of input, `None`.
    Await(Recv<I, O>),
}

impl<I, O> Process<I, O> {
    /// The halted process.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::Process;
    ///
    /// let stage: Process<i32, i32> = Process::halt();
    /// assert_eq!(stage.run([1, 2, 3]), Vec::<i32>::new());
    /// ```
    pub const fn halt() -> Self {
        Process::Halt
    }

    /// Emit a single value, then halt.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::Process;
    ///
    /// let stage: Process<i32, i32> = Process::emit(7);
    /// assert_eq!(stage.run(Vec::new()), vec![7]);
    /// ```
    pub fn emit(head: O) -> Self {
        Process::Emit(head, Box::new(Process::Halt))
    }

    /// Emit a value, then continue as `tail`.
    pub fn emit_then(head: O, tail: Process<I, O>) -> Self {
        Process::Emit(head, Box::new(tail))
    }

    /// Emit every value of a finite iterator in order, then halt.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::Process;
    ///
    /// let stage: Process<i32, i32> = Process::emit_all([1, 2, 3]);
    /// assert_eq!(stage.run(Vec::new()), vec![1, 2, 3]);
    /// ```
    pub fn emit_all<T>(values: T) -> Self
    where
        T: IntoIterator<Item = O>,
    {
        let heads: Vec<O> = values.into_iter().collect();
        let mut process = Process::Halt;
        for head in heads.into_iter().rev() {
            process = Process::Emit(head, Box::new(process));
        }
        process
    }

    /// Build an awaiting process from a receive function.
    ///
    /// The function must be callable any number of times: a process value
    /// can be cloned and re-driven, and each drive resumes the same node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::Process;
    ///
    /// let echo_once: Process<i32, i32> = Process::await_with(|input| match input {
    ///     Some(value) => Process::emit(value),
    ///     None => Process::Halt,
    /// });
    /// assert_eq!(echo_once.run([4, 5, 6]), vec![4]);
    /// ```
    pub fn await_with<F>(recv: F) -> Self
    where
        F: Fn(Option<I>) -> Process<I, O> + 'static,
    {
        Process::Await(Rc::new(recv))
    }

    /// Returns `true` if the process is `Halt`.
    pub const fn is_halt(&self) -> bool {
        matches!(self, Process::Halt)
    }

    /// Returns `true` if the process is `Emit`.
    pub const fn is_emit(&self) -> bool {
        matches!(self, Process::Emit(_, _))
    }

    /// Returns `true` if the process is `Await`.
    pub const fn is_await(&self) -> bool {
        matches!(self, Process::Await(_))
    }
}

impl<I, O> Process<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Connect this stage's output channel to `downstream`'s input channel.
    ///
    /// The downstream stage controls termination: once it halts, the fused
    /// stage halts and no further input is consumed. See
    /// [`compose::pipe`](crate::compose::pipe) for the full case analysis.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let running_means_of_sums = sum().pipe(mean());
    /// assert_eq!(running_means_of_sums.run([1.0, 5.0]), vec![1.0, 3.5]);
    /// ```
    pub fn pipe<O2>(self, downstream: Process<O, O2>) -> Process<I, O2>
    where
        O2: 'static,
    {
        compose::pipe(self, downstream)
    }

    /// Transform every output value with `f`.
    ///
    /// Equivalent to piping into [`lift(f)`](crate::build::lift).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let doubled_evens = filter(|x: &i32| x % 2 == 0).map(|x| x * 2);
    /// assert_eq!(doubled_evens.run([1, 2, 3, 4]), vec![4, 8]);
    /// ```
    pub fn map<O2, F>(self, f: F) -> Process<I, O2>
    where
        O2: Clone + 'static,
        F: Fn(O) -> O2 + 'static,
    {
        self.pipe(build::lift(f))
    }

    /// Restart this process from its original shape whenever it halts.
    ///
    /// An `Await` that receives the end-of-input signal is not restarted:
    /// its end-of-input branch runs as-is, so trailing emits and true
    /// termination are preserved. Repeating `Halt` stays `Halt`; repeating a
    /// process whose head is `Emit` denotes an unbounded output stream and
    /// diverges.
    pub fn repeat(self) -> Self
    where
        O: Clone,
    {
        compose::repeat(self)
    }

    /// Run this process to completion, then continue as `next()`.
    ///
    /// The continuation is built lazily, only once this process halts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let eight = take(3).append(|| take(5));
    /// assert_eq!(
    ///     eight.run(1..=12),
    ///     vec![1, 2, 3, 4, 5, 6, 7, 8],
    /// );
    /// ```
    pub fn append<F>(self, next: F) -> Self
    where
        F: Fn() -> Process<I, O> + 'static,
    {
        compose::append(self, next)
    }

    /// Monadic bind over the output channel: replace every emitted value
    /// with the process `f` builds from it, splicing the results in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let twice_each = identity().flat_map(|x: i32| Process::emit_all([x, x]));
    /// assert_eq!(twice_each.run([1, 2]), vec![1, 1, 2, 2]);
    /// ```
    pub fn flat_map<O2, F>(self, f: F) -> Process<I, O2>
    where
        O: Clone,
        O2: 'static,
        F: Fn(O) -> Process<I, O2> + 'static,
    {
        compose::flat_map(self, f)
    }

    /// Pair this stage with `other`, both driven by the same input.
    ///
    /// Each side consumes at its own rhythm; every input element is seen by
    /// both sides exactly once and in order. See
    /// [`compose::zip`](crate::compose::zip).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let indexed_sums = count().zip(sum());
    /// assert_eq!(
    ///     indexed_sums.run([1.0, 5.0, 10.0, 15.0]),
    ///     vec![(1, 1.0), (2, 6.0), (3, 16.0), (4, 31.0)],
    /// );
    /// ```
    pub fn zip<B>(self, other: Process<I, B>) -> Process<I, (O, B)>
    where
        I: Clone,
        O: Clone,
        B: Clone + 'static,
    {
        compose::zip(self, other)
    }

    /// Pair every output with a 1-based running index.
    ///
    /// Sugar for zipping with [`count()`](crate::build::count).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let indexed = skip_while(|x: &i32| *x < 3).zip_with_index();
    /// assert_eq!(indexed.run([1, 2, 3, 4]), vec![(3, 1), (4, 2)]);
    /// ```
    pub fn zip_with_index(self) -> Process<I, (O, usize)>
    where
        I: Clone,
        O: Clone,
    {
        self.zip(build::count())
    }
}

impl<I, O: Clone> Clone for Process<I, O> {
    fn clone(&self) -> Self {
        match self {
            Process::Halt => Process::Halt,
            Process::Emit(head, tail) => Process::Emit(head.clone(), tail.clone()),
            Process::Await(recv) => Process::Await(Rc::clone(recv)),
        }
    }
}

impl<I, O: fmt::Debug> fmt::Debug for Process<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Process::Halt => f.write_str("Halt"),
            Process::Emit(head, tail) => f.debug_tuple("Emit").field(head).field(tail).finish(),
            Process::Await(_) => f.write_str("Await(..)"),
        }
    }
}

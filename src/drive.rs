//! Driving a process against a concrete input sequence.
//!
//! [`Process::drive`] connects a process to any `IntoIterator` of inputs and
//! returns [`Driven`], a lazy iterator over the outputs. The driver is an
//! explicit state machine rather than a recursive function, so its stack
//! usage does not grow with the length of the input.
//!
//! # Examples
//!
//! ```rust
//! use transduce::prelude::*;
//!
//! let mut outputs = take(2).drive(1..);
//! assert_eq!(outputs.next(), Some(1));
//! assert_eq!(outputs.next(), Some(2));
//! assert_eq!(outputs.next(), None);
//! ```

use std::mem;

use tracing::trace;

use crate::{DriveError, Process};

/// Lazy iterator over the outputs of a driven process.
///
/// Created by [`Process::drive`]. Input elements are pulled one at a time
/// and each is examined at most once; elements past the point where the
/// process halts are never pulled at all.
///
/// The `Iterator` impl panics if a stage awaits input again after the
/// end-of-input signal was delivered; use [`Driven::try_next`] to observe
/// that condition as a [`DriveError`] instead.
pub struct Driven<O, It>
where
    It: Iterator,
{
    input: It,
    state: DrivenState<It::Item, O>,
}

enum DrivenState<I, O> {
    /// Input may still be available.
    Running(Process<I, O>),
    /// The end-of-input signal has been delivered; only trailing emits and
    /// the final halt are legal from here.
    Draining(Process<I, O>),
    Finished,
}

impl<I, O> DrivenState<I, O> {
    fn take(&mut self) -> Self {
        mem::replace(self, DrivenState::Finished)
    }
}

impl<O, It> Driven<O, It>
where
    It: Iterator,
{
    pub(crate) fn new(process: Process<It::Item, O>, input: It) -> Self {
        Driven {
            input,
            state: DrivenState::Running(process),
        }
    }

    /// Returns `true` once the process has halted.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, DrivenState::Finished)
    }

    /// Advance the drive by one output.
    ///
    /// Returns `Ok(Some(value))` for each emitted value, `Ok(None)` once the
    /// process halts, and `Err(DriveError::AwaitedAfterEof)` if a stage
    /// requests input again after the end-of-input signal.
    pub fn try_next(&mut self) -> Result<Option<O>, DriveError> {
        loop {
            match self.state.take() {
                DrivenState::Running(process) => match process {
                    Process::Halt => {
                        trace!("process halted before end of input");
                        return Ok(None);
                    }
                    Process::Emit(head, tail) => {
                        self.state = DrivenState::Running(*tail);
                        return Ok(Some(head));
                    }
                    Process::Await(recv) => match self.input.next() {
                        Some(value) => {
                            self.state = DrivenState::Running((*recv)(Some(value)));
                        }
                        None => {
                            trace!("input exhausted, delivering end-of-input signal");
                            self.state = DrivenState::Draining((*recv)(None));
                        }
                    },
                },
                DrivenState::Draining(process) => match process {
                    Process::Halt => {
                        trace!("process halted after end of input");
                        return Ok(None);
                    }
                    Process::Emit(head, tail) => {
                        self.state = DrivenState::Draining(*tail);
                        return Ok(Some(head));
                    }
                    Process::Await(_) => return Err(DriveError::AwaitedAfterEof),
                },
                DrivenState::Finished => return Ok(None),
            }
        }
    }
}

impl<O, It> Iterator for Driven<O, It>
where
    It: Iterator,
{
    type Item = O;

    /// # Panics
    ///
    /// Panics if a stage violates the end-of-input contract. See
    /// [`Driven::try_next`] for the checked form.
    fn next(&mut self) -> Option<O> {
        match self.try_next() {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<I, O> Process<I, O> {
    /// Drive this process against an input sequence, producing the output
    /// sequence lazily.
    ///
    /// Driving consumes the process value but not the definition it was
    /// built from: clone first to keep a re-drivable copy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// let outputs: Vec<i32> = identity().drive(vec![1, 2, 3]).collect();
    /// assert_eq!(outputs, vec![1, 2, 3]);
    /// ```
    pub fn drive<T>(self, input: T) -> Driven<O, T::IntoIter>
    where
        T: IntoIterator<Item = I>,
    {
        Driven::new(self, input.into_iter())
    }

    /// Drive this process and collect every output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    ///
    /// assert_eq!(take(2).run([1, 2, 3]), vec![1, 2]);
    /// ```
    pub fn run<T>(self, input: T) -> Vec<O>
    where
        T: IntoIterator<Item = I>,
    {
        self.drive(input).collect()
    }

    /// Drive this process, collecting at most `limit` outputs.
    ///
    /// A pipeline that would produce more than `limit` values is reported as
    /// [`DriveError::OutputLimitExceeded`] instead of looping without bound,
    /// and a stage that awaits input after the end-of-input signal is
    /// reported as [`DriveError::AwaitedAfterEof`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use transduce::prelude::*;
    /// use transduce::DriveError;
    ///
    /// assert_eq!(
    ///     identity::<i32>().run_bounded(1.., 100),
    ///     Err(DriveError::OutputLimitExceeded { limit: 100 }),
    /// );
    /// ```
    pub fn run_bounded<T>(self, input: T, limit: usize) -> Result<Vec<O>, DriveError>
    where
        T: IntoIterator<Item = I>,
    {
        let mut driven = self.drive(input);
        let mut outputs = Vec::new();
        while let Some(value) = driven.try_next()? {
            if outputs.len() == limit {
                return Err(DriveError::OutputLimitExceeded { limit });
            }
            outputs.push(value);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{identity, take};
    use std::cell::Cell;
    use std::rc::Rc;

    /// An identity-like stage that counts end-of-input deliveries.
    fn eof_counting(count: Rc<Cell<usize>>) -> Process<i32, i32> {
        Process::await_with(move |input| match input {
            Some(value) => Process::emit_then(value, eof_counting(Rc::clone(&count))),
            None => {
                count.set(count.get() + 1);
                Process::Halt
            }
        })
    }

    /// A stage that illegally awaits again after end of input.
    fn awaits_forever() -> Process<i32, i32> {
        Process::await_with(|_| awaits_forever())
    }

    #[test]
    fn test_halt_consumes_no_input() {
        let mut pulled = 0;
        let input = (1..=5).inspect(|_| pulled += 1);
        let outputs: Vec<i32> = Process::halt().drive(input).collect();
        assert!(outputs.is_empty());
        assert_eq!(pulled, 0);
    }

    #[test]
    fn test_take_stops_pulling_input_once_halted() {
        let mut pulled = 0;
        let input = (1..=10).inspect(|_| pulled += 1);
        let outputs: Vec<i32> = take(3).drive(input).collect();
        assert_eq!(outputs, vec![1, 2, 3]);
        assert_eq!(pulled, 3);
    }

    #[test]
    fn test_drive_is_lazy_over_infinite_input() {
        let mut outputs = identity().drive(1..);
        assert_eq!(outputs.next(), Some(1));
        assert_eq!(outputs.next(), Some(2));
    }

    #[test]
    fn test_eof_signal_delivered_exactly_once() {
        let count = Rc::new(Cell::new(0));
        let outputs = eof_counting(Rc::clone(&count)).run([1, 2]);
        assert_eq!(outputs, vec![1, 2]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_pipe_signals_upstream_end_to_downstream_once() {
        let count = Rc::new(Cell::new(0));
        let stage = take(1).pipe(eof_counting(Rc::clone(&count)));
        // Downstream sees upstream's end of output even though the driver
        // still has input left.
        assert_eq!(stage.run([1, 2, 3]), vec![1]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_try_next_reports_await_after_eof() {
        let mut driven = awaits_forever().drive(vec![1]);
        assert_eq!(driven.try_next(), Err(DriveError::AwaitedAfterEof));
    }

    #[test]
    #[should_panic(expected = "awaited more input")]
    fn test_iterator_panics_on_await_after_eof() {
        let _ = awaits_forever().run(Vec::new());
    }

    #[test]
    fn test_run_bounded_within_limit() {
        assert_eq!(identity().run_bounded([1, 2, 3], 3), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_run_bounded_reports_overflow() {
        assert_eq!(
            identity::<i32>().run_bounded(1.., 4),
            Err(DriveError::OutputLimitExceeded { limit: 4 }),
        );
    }

    #[test]
    fn test_is_finished_after_halt() {
        let mut driven = take(1).drive(vec![1, 2]);
        assert_eq!(driven.next(), Some(1));
        assert_eq!(driven.next(), None);
        assert!(driven.is_finished());
    }
}

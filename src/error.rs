use thiserror::Error;

/// Failures the driver can detect while running a pipeline.
///
/// User-supplied stage functions have no error channel of their own: a panic
/// inside a predicate or transform aborts the whole drive. The variants here
/// cover the two conditions the engine itself can observe and report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriveError {
    /// A stage requested input again after the end-of-input signal was
    /// already delivered. The receive function of an `Await` must resolve to
    /// a process that emits zero or more values and halts once it has been
    /// given `None`.
    #[error("stage awaited more input after the end-of-input signal was delivered")]
    AwaitedAfterEof,

    /// A bounded run produced more values than its limit without halting.
    /// Raised by [`Process::run_bounded`](crate::Process::run_bounded) when a
    /// pipeline turns out to be a runaway producer.
    #[error("pipeline produced more than {limit} values without halting")]
    OutputLimitExceeded {
        /// The limit the run was configured with.
        limit: usize,
    },
}

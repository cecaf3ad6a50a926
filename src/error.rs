use crate::data::OfferingId;
use thiserror::Error;

/// One or more offerings reached model build with no candidates at all,
/// which happens exactly when their preferred-start lists are empty.
/// Carries every offending offering id, ascending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("offerings {offerings:?} list no preferred starts and cannot be placed")]
pub struct UnassignableOfferingError {
    pub offerings: Vec<OfferingId>,
}

/// Ways a solve can end without an assignment.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The flow fell short of one unit per offering. Overflow capacity is
    /// unbounded, so this indicates a bug in model construction rather
    /// than an over-constrained input.
    #[error("no feasible assignment: placed {placed} of {required} offerings")]
    NoFeasibleAssignment { required: usize, placed: usize },

    /// The caller's deadline or cancellation token fired mid-search.
    #[error("solve cancelled before completion")]
    Cancelled,
}

//! Error data types shared by the tournament API
//!
//! Pure data, no HTTP framework dependencies:
//! - RFC 9457 Problem Details (`Problem`)
//! - Static error catalogue entries (`ErrDef`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, InvalidParam, Problem};

/// Attach the request path to a Problem.
///
/// `traceId` is left to callers that carry a distributed trace context.
pub fn finalize(p: Problem, instance: &str) -> Problem {
    p.with_instance(instance)
}

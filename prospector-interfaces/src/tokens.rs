//! Placeholder resolution interface

use crate::submission::Submission;

/// Substitutes placeholder markers in a string with values from a submission
/// and its surrounding context.
///
/// Implementations must return strings without markers unchanged, and must
/// never fail: a marker that cannot be resolved degrades to an empty string
/// or to its literal text.
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, value: &str, submission: &Submission) -> String;
}

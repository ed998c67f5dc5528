//! Logging and messaging sinks used by the pipeline

/// Where the pipeline reports what it did.
///
/// `log_error` and `log_notice` go to the operator log. `notify_user_error`
/// raises a notice shown to whoever triggered the submission.
pub trait Reporter: Send + Sync {
    fn log_error(&self, message: &str);

    fn log_notice(&self, message: &str);

    fn notify_user_error(&self, message: &str);
}

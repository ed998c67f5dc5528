//! Tracing-backed reporters

use prospector_interfaces::Reporter;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Target of user-visible notices
pub const MESSENGER_TARGET: &str = "prospector::messenger";

/// Reports through `tracing` only; holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn log_error(&self, message: &str) {
        error!("{}", message);
    }

    fn log_notice(&self, message: &str) {
        info!("{}", message);
    }

    fn notify_user_error(&self, message: &str) {
        warn!(target: MESSENGER_TARGET, "{}", message);
    }
}

/// Reports through `tracing` and also keeps user-visible notices.
///
/// Meant to live for a single run: the host creates one, passes it to the
/// pipeline, then drains it with [`NoticeCollector::take_notices`].
#[derive(Debug, Default)]
pub struct NoticeCollector {
    inner: TracingReporter,
    notices: Mutex<Vec<String>>,
}

impl NoticeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the user-visible notices raised so far
    pub fn take_notices(&self) -> Vec<String> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Reporter for NoticeCollector {
    fn log_error(&self, message: &str) {
        self.inner.log_error(message);
    }

    fn log_notice(&self, message: &str) {
        self.inner.log_notice(message);
    }

    fn notify_user_error(&self, message: &str) {
        self.inner.notify_user_error(message);
        match self.notices.lock() {
            Ok(mut notices) => notices.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

//! User-facing failure notices.
//!
//! The host application owns the actual display (a toast, a status bar, a
//! dialog). Responders only call [`Notifier::notify`] once per failed call
//! with [`FAILURE_NOTICE`]; the typed error still goes back to the caller.

use std::sync::Arc;

/// Fixed notice shown when a reply could not be fetched.
pub const FAILURE_NOTICE: &str = "AI 응답을 가져오는 중 오류가 발생했습니다.";

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    /// Show `message` to the user.
    fn notify(&self, message: &str);
}

/// Type alias for a shared notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}

/// Forwards notices to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "scribe::notice", "{message}");
    }
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_is_a_notifier() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let notifier: SharedNotifier = Arc::new(move |msg: &str| {
            sink.lock().unwrap().push(msg.to_owned());
        });

        notifier.notify(FAILURE_NOTICE);
        assert_eq!(*seen.lock().unwrap(), vec![FAILURE_NOTICE.to_owned()]);
    }

    #[test]
    fn test_builtin_notifiers_accept_messages() {
        NoopNotifier.notify("ignored");
        LoggingNotifier.notify("logged");
    }
}

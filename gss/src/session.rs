//! Tracks the state of a compilation session.

use std::sync::Arc;

/// Metadata for a compilation session.
///
/// The session is cheap to clone and gets threaded through the parser, the
/// passes and the printer, so that all of them can log diagnostics with the
/// [`gss_log!`](crate::gss_log) macro.
///
/// [`Session::from_environment`] enables logging when the `GSS_LOG`
/// environment variable is set.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    log_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Session {
    pub fn from_environment() -> Self {
        Self::new(std::env::var_os("GSS_LOG").is_some())
    }

    pub fn new(log_enabled: bool) -> Self {
        Self {
            inner: Arc::new(SessionInner { log_enabled }),
        }
    }

    pub fn log_enabled(&self) -> bool {
        self.inner.log_enabled
    }
}

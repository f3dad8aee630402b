//! Observer seam for dispatch lifecycle notifications.

use arbor_core::ActionContext;
use thiserror::Error;

/// Error raised by an observer.
///
/// Observers are a non-critical side channel; the dispatcher logs these
/// and continues.
#[derive(Error, Debug)]
#[error("observer error: {0}")]
pub struct ObserverError(pub String);

/// Listener notified about dispatch lifecycle events.
pub trait Observer: Send + Sync {
    /// Called with the event name and the request context.
    fn notify(&self, event: &str, ctx: &ActionContext) -> Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: Fn(&str, &ActionContext) -> Result<(), ObserverError> + Send + Sync,
{
    fn notify(&self, event: &str, ctx: &ActionContext) -> Result<(), ObserverError> {
        self(event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Layout;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let observer = move |event: &str, _ctx: &ActionContext| {
            assert_eq!(event, "dispatch.executing");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        let ctx = ActionContext::new("index", Vec::new(), "default", Layout::default());
        observer.notify("dispatch.executing", &ctx).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}

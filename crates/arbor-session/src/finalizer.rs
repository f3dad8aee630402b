//! Post-request session finalization.

use arbor_core::SessionConfig;
use rand::Rng;
use tracing::debug;

use crate::cookie::CookieJar;
use crate::error::SessionError;
use crate::lottery;
use crate::store::SessionStore;

/// Finalizes the session once per request, after the response is
/// computed: persists the store, queues the session-identity cookie, and
/// sometimes collects expired sessions.
///
/// # Example
///
/// ```rust,ignore
/// use arbor_session::prelude::*;
///
/// SessionFinalizer::handle(&mut store, &jar, &config, rand::thread_rng())?;
/// ```
pub struct SessionFinalizer<'a, R: Rng> {
    store: &'a mut dyn SessionStore,
    cookies: &'a dyn CookieJar,
    config: &'a SessionConfig,
    rng: R,
}

impl<'a, R: Rng> SessionFinalizer<'a, R> {
    /// Construct a finalizer bound to the supplied collaborators and run
    /// it exactly once.
    ///
    /// A save failure propagates and is fatal for the request; surfacing
    /// a 5xx is the caller's responsibility.
    pub fn handle(
        store: &'a mut dyn SessionStore,
        cookies: &'a dyn CookieJar,
        config: &'a SessionConfig,
        rng: R,
    ) -> Result<(), SessionError> {
        let mut finalizer = Self {
            store,
            cookies,
            config,
            rng,
        };

        finalizer.process()
    }

    fn process(&mut self) -> Result<(), SessionError> {
        self.store.save()?;

        self.queue_session_cookie();

        self.collect_garbage()
    }

    /// Queue the cookie that re-associates the next request with this
    /// session. The TTL stays in minutes; `http_only` is always false.
    fn queue_session_cookie(&self) {
        let cookie = self.cookies.make(
            &self.config.cookie,
            self.store.id().as_str(),
            self.config.lifetime,
            &self.config.path,
            self.config.domain.clone(),
            self.config.secure,
            false,
        );

        self.cookies.queue(cookie);
    }

    /// Collect expired sessions when the lottery hits.
    ///
    /// Sampling amortizes the sweep cost across many requests instead of
    /// paying it on every one.
    fn collect_garbage(&mut self) -> Result<(), SessionError> {
        if !lottery::hits(&self.config.lottery, &mut self.rng) {
            return Ok(());
        }

        let lifetime_secs = self.config.lifetime * 60;
        let collected = self.store.handler().gc(lifetime_secs)?;
        debug!(lifetime_secs, collected, "expired sessions collected");

        Ok(())
    }
}

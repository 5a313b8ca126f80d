//! Shared "something is in flight" signal for the loading indicator.
//!
//! Construct one [`LoadingGate`] at startup, share it through an `Arc`, and pair
//! every `begin` with exactly one `end`. [`LoadingGuard`] does the pairing on
//! drop, which covers error and cancellation paths.

use crate::utils::error::{AppError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Requests carrying this header bypass the gate entirely.
pub const SKIP_LOADING_HEADER: &str = "X-SKIP-LOADING";

#[derive(Debug)]
pub struct LoadingGate {
    in_flight: Mutex<usize>,
    signal: watch::Sender<bool>,
}

impl LoadingGate {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            in_flight: Mutex::new(0),
            signal,
        }
    }

    fn counter(&self) -> MutexGuard<'_, usize> {
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Marks one operation as started. Emits `true` only on the 0 -> 1 edge.
    pub fn begin(&self) {
        let mut in_flight = self.counter();
        if *in_flight == 0 {
            self.signal.send_replace(true);
            tracing::debug!("Loading indicator on");
        }
        *in_flight += 1;
    }

    /// Marks one operation as finished. Emits `false` only on the 1 -> 0 edge.
    ///
    /// An `end` without a matching `begin` leaves the counter at zero, emits
    /// nothing and returns [`AppError::GateImbalance`].
    pub fn end(&self) -> Result<()> {
        let mut in_flight = self.counter();
        if *in_flight == 0 {
            tracing::warn!("Loading gate ended with no operation in flight");
            return Err(AppError::GateImbalance);
        }
        *in_flight -= 1;
        if *in_flight == 0 {
            self.signal.send_replace(false);
            tracing::debug!("Loading indicator off");
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        *self.signal.borrow()
    }

    pub fn in_flight(&self) -> usize {
        *self.counter()
    }

    /// Receives the current state, then one change per transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.signal.subscribe()
    }

    pub fn guard(&self) -> LoadingGuard<'_> {
        self.begin();
        LoadingGuard { gate: self }
    }

    /// Runs `operation` with the gate held. The gate is taken on first poll and
    /// released when the operation completes or is dropped.
    pub async fn track<F: Future>(&self, operation: F) -> F::Output {
        let _guard = self.guard();
        operation.await
    }
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "the gate is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    gate: &'a LoadingGate,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        // Balanced by construction: the guard only exists after a `begin`.
        let _ = self.gate.end();
    }
}

/// Wraps outbound requests so the indicator reflects every one of them, unless
/// the request opts out with [`SKIP_LOADING_HEADER`].
#[derive(Debug, Clone)]
pub struct LoadingInterceptor {
    gate: Arc<LoadingGate>,
}

impl LoadingInterceptor {
    pub fn new(gate: Arc<LoadingGate>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &Arc<LoadingGate> {
        &self.gate
    }

    pub fn skips_loading(headers: &HashMap<String, String>) -> bool {
        headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(SKIP_LOADING_HEADER))
    }

    pub async fn intercept<F: Future>(
        &self,
        headers: &HashMap<String, String>,
        request: F,
    ) -> F::Output {
        if Self::skips_loading(headers) {
            tracing::trace!("Request bypasses the loading gate");
            return request.await;
        }
        self.gate.track(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let gate = LoadingGate::new();
        assert!(!gate.is_active());
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn test_overlapping_operations_keep_signal_on() {
        let gate = LoadingGate::new();

        gate.begin();
        assert!(gate.is_active());
        gate.begin();
        assert!(gate.is_active());
        gate.end().unwrap();
        assert!(gate.is_active());
        assert_eq!(gate.in_flight(), 1);

        gate.end().unwrap();
        assert!(!gate.is_active());
    }

    #[test]
    fn test_unbalanced_end_is_clamped() {
        let gate = LoadingGate::new();

        assert!(matches!(gate.end(), Err(AppError::GateImbalance)));
        assert_eq!(gate.in_flight(), 0);

        // A later begin still turns the signal on.
        gate.begin();
        assert!(gate.is_active());
    }

    #[test]
    fn test_emits_only_on_transitions() {
        let gate = LoadingGate::new();
        let mut rx = gate.subscribe();
        assert!(!*rx.borrow_and_update());

        gate.begin();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        gate.begin();
        gate.end().unwrap();
        assert!(!rx.has_changed().unwrap());

        gate.end().unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let gate = LoadingGate::new();
        {
            let _outer = gate.guard();
            let _inner = gate.guard();
            assert_eq!(gate.in_flight(), 2);
        }
        assert_eq!(gate.in_flight(), 0);
        assert!(!gate.is_active());
    }

    #[test]
    fn test_skip_header_is_case_insensitive() {
        let mut headers = HashMap::new();
        assert!(!LoadingInterceptor::skips_loading(&headers));

        headers.insert("x-skip-loading".to_string(), String::new());
        assert!(LoadingInterceptor::skips_loading(&headers));
    }
}

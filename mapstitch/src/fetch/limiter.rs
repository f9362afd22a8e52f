//! Concurrency limiter for in-flight tile downloads.
//!
//! Public tile services throttle aggressive clients, so the fetch phase
//! bounds how many requests may be in flight at once. The limiter is a
//! counting semaphore with an in-flight gauge; a permit is acquired before
//! the request is issued and released when the permit drops, after the
//! response body has been fully read.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default number of tile fetches allowed in flight simultaneously.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 10;

/// Counting limiter shared by all fetch units of a run.
///
/// Clones share the same underlying semaphore and gauges.
#[derive(Debug, Clone)]
pub struct FetchLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FetchLimiter {
    /// Creates a limiter allowing `capacity` concurrent holders.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Waits for a free slot and claims it.
    ///
    /// The slot is returned when the permit is dropped.
    pub async fn acquire(&self) -> FetchPermit {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("limiter semaphore is never closed");

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        FetchPermit {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of permits held simultaneously so far.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Maximum number of concurrent holders.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FetchLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_CONCURRENCY)
    }
}

/// A held limiter slot; dropping it releases the slot.
#[derive(Debug)]
pub struct FetchPermit {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for FetchPermit {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        let _ = FetchLimiter::new(0);
    }

    #[test]
    fn test_default_capacity_is_ten() {
        let limiter = FetchLimiter::default();
        assert_eq!(limiter.capacity(), DEFAULT_FETCH_CONCURRENCY);
    }

    #[tokio::test]
    async fn test_acquire_and_release() {
        let limiter = FetchLimiter::new(2);

        let permit = limiter.acquire().await;
        assert_eq!(limiter.in_flight(), 1);

        drop(permit);
        assert_eq!(limiter.in_flight(), 0);
        assert_eq!(limiter.peak(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_slots() {
        let limiter = FetchLimiter::new(3);
        let clone = limiter.clone();

        let _a = limiter.acquire().await;
        let _b = clone.acquire().await;

        assert_eq!(limiter.in_flight(), 2);
        assert_eq!(clone.in_flight(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_peak_never_exceeds_capacity() {
        let limiter = FetchLimiter::new(10);
        let mut handles = Vec::new();

        for _ in 0..50 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                let _permit = limiter.acquire().await;
                tokio::time::sleep(Duration::from_millis(5)).await;
            }));
        }

        for handle in handles {
            handle.await.expect("task panicked");
        }

        assert!(
            limiter.peak() <= 10,
            "peak {} exceeded capacity",
            limiter.peak()
        );
        assert_eq!(limiter.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_waiters_proceed_after_release() {
        let limiter = FetchLimiter::new(1);

        let first = limiter.acquire().await;

        let waiter = {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                let _permit = limiter.acquire().await;
            })
        };

        // The waiter cannot finish while the first permit is held
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        drop(first);
        waiter.await.expect("waiter panicked");
        assert_eq!(limiter.in_flight(), 0);
    }
}

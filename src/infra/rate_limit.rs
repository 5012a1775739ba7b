//! # Rate Limiting Module / 限流模块
//!
//! Gates placed in front of per-string provider calls. They run on tokio's
//! clock, so tests can drive them with paused time instead of real delays.
//!
//! 置于逐字符串提供者调用之前的闸门。它们使用 tokio 的时钟，
//! 因此测试可以用暂停的时间驱动，而无需真实等待。

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Something a caller awaits before each provider call.
pub trait RateLimiter {
    /// Resolves once the next call is allowed to start.
    fn acquire(&self) -> impl Future<Output = ()> + Send;
}

/// Lets calls start at most once per `interval`. The first call passes
/// immediately; each later call waits until `interval` has elapsed since the
/// previous slot.
///
/// 每个 `interval` 最多放行一次调用。第一次调用立即通过；
/// 之后的每次调用都要等到距上一个时隙满 `interval` 为止。
#[derive(Debug)]
pub struct FixedIntervalGate {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl FixedIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    fn reserve_slot(&self) -> Instant {
        let mut next = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let slot = next.map_or(now, |scheduled| scheduled.max(now));
        *next = Some(slot + self.interval);
        slot
    }
}

impl RateLimiter for FixedIntervalGate {
    async fn acquire(&self) {
        let slot = self.reserve_slot();
        sleep_until(slot).await;
    }
}

/// A gate that never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

impl RateLimiter for Unthrottled {
    async fn acquire(&self) {}
}

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use errorcache_core::config::{RateLimitConfig, WindowLimit};
use errorcache_core::constants::MAX_WINDOW_SECS;
use errorcache_core::models::{AgentId, OperationClass};
use tracing::debug;

use crate::decision::RateDecision;

type WindowKey = (AgentId, OperationClass);

/// Per-agent, per-class sliding windows of event timestamps.
///
/// Windows hold only timestamps inside the class window and are rebuilt from
/// the audit log on start-up.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    windows: DashMap<WindowKey, VecDeque<DateTime<Utc>>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            config: config.clone(),
            windows: DashMap::new(),
        }
    }

    pub fn limit_for(&self, class: OperationClass) -> WindowLimit {
        self.config.limit_for(class)
    }

    /// Check the window and record `now` if there is room.
    ///
    /// A `now` earlier than the newest recorded event is clamped to it; the
    /// decision carries the instant actually recorded.
    pub fn check_and_record(
        &self,
        agent_id: &AgentId,
        class: OperationClass,
        now: DateTime<Utc>,
    ) -> RateDecision {
        let limit = self.limit_for(class);
        let window = window_span(limit);

        let mut entry = self
            .windows
            .entry((agent_id.clone(), class))
            .or_default();
        let events = entry.value_mut();

        let now = events.back().map_or(now, |newest| now.max(*newest));
        evict_expired(events, now, window);

        let used = events.len() as u32;
        if used < limit.max_events {
            events.push_back(now);
            RateDecision::Allowed {
                remaining: limit.max_events - used - 1,
                recorded_at: now,
            }
        } else {
            let retry_after = events
                .front()
                .map(|oldest| *oldest + window - now)
                .and_then(|d| d.to_std().ok())
                .unwrap_or(Duration::ZERO);
            debug!(
                agent_id = %agent_id,
                class = %class,
                retry_after_secs = retry_after.as_secs(),
                "rate limit reached"
            );
            RateDecision::Limited { retry_after }
        }
    }

    /// `check_and_record` reduced to a yes/no.
    pub fn allow(&self, agent_id: &AgentId, class: OperationClass, now: DateTime<Utc>) -> bool {
        self.check_and_record(agent_id, class, now).is_allowed()
    }

    /// Give back a slot whose operation did not complete. `at` is the
    /// `recorded_at` of the decision that granted it.
    pub fn release(&self, agent_id: &AgentId, class: OperationClass, at: DateTime<Utc>) {
        if let Some(mut entry) = self.windows.get_mut(&(agent_id.clone(), class)) {
            if let Some(pos) = entry.iter().rposition(|t| *t == at) {
                entry.remove(pos);
            }
        }
    }

    /// Events currently counted against the window at `now`.
    pub fn in_window(&self, agent_id: &AgentId, class: OperationClass, now: DateTime<Utc>) -> usize {
        let window = window_span(self.limit_for(class));
        self.windows
            .get(&(agent_id.clone(), class))
            .map_or(0, |events| events.iter().filter(|t| **t + window > now).count())
    }

    /// Replace every window with `events` that are still inside their window at `now`.
    pub fn rebuild<I>(&self, events: I, now: DateTime<Utc>)
    where
        I: IntoIterator<Item = (AgentId, OperationClass, DateTime<Utc>)>,
    {
        self.windows.clear();
        let mut restored = 0usize;
        for (agent_id, class, at) in events {
            let window = window_span(self.limit_for(class));
            if at + window <= now {
                continue;
            }
            self.windows
                .entry((agent_id, class))
                .or_default()
                .push_back(at);
            restored += 1;
        }
        for mut entry in self.windows.iter_mut() {
            entry.value_mut().make_contiguous().sort();
        }
        debug!(restored, windows = self.windows.len(), "rate windows rebuilt");
    }

    /// Drop expired timestamps and empty windows.
    pub fn prune(&self, now: DateTime<Utc>) {
        self.windows.retain(|(_, class), events| {
            evict_expired(events, now, window_span(self.config.limit_for(*class)));
            !events.is_empty()
        });
    }

    /// Number of live `(agent, class)` windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

fn window_span(limit: WindowLimit) -> chrono::Duration {
    let secs = limit.window_secs.min(MAX_WINDOW_SECS);
    chrono::Duration::seconds(secs as i64)
}

fn evict_expired(events: &mut VecDeque<DateTime<Utc>>, now: DateTime<Utc>, window: chrono::Duration) {
    while events.front().is_some_and(|oldest| *oldest + window <= now) {
        events.pop_front();
    }
}

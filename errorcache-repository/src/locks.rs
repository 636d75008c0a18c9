//! Per-entity critical sections.
//!
//! Lock order is fixed: signature, then answer or question, then agent. Two
//! questions are taken together in id order.

use std::sync::Arc;

use dashmap::DashMap;
use errorcache_core::models::{AgentId, AnswerId, QuestionId};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub(crate) struct EntityLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EntityLocks {
    async fn lock(&self, key: String) -> OwnedMutexGuard<()> {
        // Clone the mutex out so the shard lock is released before awaiting.
        let mutex = Arc::clone(self.locks.entry(key).or_default().value());
        mutex.lock_owned().await
    }

    pub async fn signature(&self, fingerprint: &str) -> OwnedMutexGuard<()> {
        self.lock(format!("signature:{fingerprint}")).await
    }

    pub async fn question(&self, question_id: &QuestionId) -> OwnedMutexGuard<()> {
        self.lock(format!("question:{question_id}")).await
    }

    /// Both questions, lower id first. Equal ids take one lock.
    pub async fn question_pair(
        &self,
        a: &QuestionId,
        b: &QuestionId,
    ) -> (OwnedMutexGuard<()>, Option<OwnedMutexGuard<()>>) {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first_guard = self.question(first).await;
        if first == second {
            return (first_guard, None);
        }
        (first_guard, Some(self.question(second).await))
    }

    pub async fn answer(&self, answer_id: &AnswerId) -> OwnedMutexGuard<()> {
        self.lock(format!("answer:{answer_id}")).await
    }

    pub async fn agent(&self, agent_id: &AgentId) -> OwnedMutexGuard<()> {
        self.lock(format!("agent:{agent_id}")).await
    }

    /// Drop mutexes nobody holds or waits on.
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        before - self.locks.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}

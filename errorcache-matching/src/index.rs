//! Snapshot index of open questions.
//!
//! Readers clone an `Arc` under a short read lock and scan without holding
//! it. Writers rebuild the vector and swap the `Arc`.
//!
//! Each entry keeps one cached score per answer. The best answer is picked at
//! query time after aging those scores to the query instant, and a score only
//! replaces an older version of itself.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use errorcache_core::config::{MatchingConfig, ScoringConfig};
use errorcache_core::models::{Answer, AnswerId, ErrorCategory, Question, QuestionId};
use errorcache_scoring::ScoringEngine;
use serde::Serialize;
use tracing::debug;

use crate::signature::Signature;
use crate::similarity::jaccard;

/// Cached score of one answer, versioned by its verification count and the
/// instant it was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerScore {
    pub answer_id: AnswerId,
    pub score: f64,
    pub scored_at: DateTime<Utc>,
    pub verification_count: u32,
}

impl AnswerScore {
    fn version(&self) -> (u32, DateTime<Utc>) {
        (self.verification_count, self.scored_at)
    }
}

impl From<&Answer> for AnswerScore {
    fn from(answer: &Answer) -> Self {
        Self {
            answer_id: answer.answer_id.clone(),
            score: answer.current_score,
            scored_at: answer.score_updated_at,
            verification_count: answer.verification_count,
        }
    }
}

/// One open question as the index sees it.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub question_id: QuestionId,
    pub category: ErrorCategory,
    pub created_at: DateTime<Utc>,
    pub fingerprint: String,
    pub tokens: Arc<BTreeSet<String>>,
    pub answers: Vec<AnswerScore>,
}

impl IndexEntry {
    pub fn from_question(question: &Question, answers: &[Answer]) -> Self {
        let signature = Signature::from_normalized(question.error_signature.clone());
        Self {
            question_id: question.question_id.clone(),
            category: question.category,
            created_at: question.created_at,
            fingerprint: signature.fingerprint,
            tokens: signature.tokens,
            answers: answers.iter().map(AnswerScore::from).collect(),
        }
    }

    fn similarity_to(&self, signature: &Signature) -> f64 {
        if self.fingerprint == signature.fingerprint {
            1.0
        } else {
            jaccard(&self.tokens, &signature.tokens)
        }
    }

    /// Best aged answer score (0.0 without answers).
    fn best_score(&self, scoring: &ScoringEngine, now: DateTime<Utc>) -> f64 {
        self.answers
            .iter()
            .map(|a| scoring.decayed(a.score, a.scored_at, now))
            .fold(0.0, f64::max)
    }

    /// Keep `score` unless a newer version of the same answer is already held.
    fn apply(&mut self, score: AnswerScore) -> bool {
        match self.answers.iter_mut().find(|a| a.answer_id == score.answer_id) {
            Some(held) if held.version() > score.version() => false,
            Some(held) => {
                *held = score;
                true
            }
            None => {
                self.answers.push(score);
                true
            }
        }
    }
}

/// A question matched by a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub question_id: QuestionId,
    pub similarity: f64,
    pub best_score: f64,
    pub answer_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    fn from_entry(entry: &IndexEntry, similarity: f64, best_score: f64) -> Self {
        Self {
            question_id: entry.question_id.clone(),
            similarity,
            best_score,
            answer_count: entry.answers.len(),
            created_at: entry.created_at,
        }
    }
}

/// Search order: aged best-answer score, similarity, question age, question id.
fn search_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.best_score
        .total_cmp(&a.best_score)
        .then_with(|| b.similarity.total_cmp(&a.similarity))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.question_id.cmp(&b.question_id))
}

/// Same-error order: similarity first, then the search order.
fn match_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| search_order(a, b))
}

pub struct MatchIndex {
    match_threshold: f64,
    search_threshold: f64,
    scoring: ScoringEngine,
    entries: RwLock<Arc<Vec<IndexEntry>>>,
}

impl MatchIndex {
    pub fn new(matching: &MatchingConfig, scoring: &ScoringConfig) -> Self {
        Self {
            match_threshold: matching.match_threshold,
            search_threshold: matching.search_threshold,
            scoring: ScoringEngine::new(scoring),
            entries: RwLock::new(Arc::new(Vec::new())),
        }
    }

    fn snapshot(&self) -> Arc<Vec<IndexEntry>> {
        Arc::clone(&self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<F, R>(&self, mutate: F) -> R
    where
        F: FnOnce(&mut Vec<IndexEntry>) -> R,
    {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next: Vec<IndexEntry> = (**guard).clone();
        let out = mutate(&mut next);
        *guard = Arc::new(next);
        out
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole index.
    pub fn rebuild(&self, entries: Vec<IndexEntry>) {
        let count = entries.len();
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(entries);
        debug!(entries = count, "match index rebuilt");
    }

    /// Insert or replace the entry for its question.
    pub fn upsert(&self, entry: IndexEntry) {
        self.write(|entries| {
            match entries.iter_mut().find(|e| e.question_id == entry.question_id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        });
    }

    /// Record one answer's cached score under its question.
    ///
    /// Returns false when the question is not indexed or a newer version of
    /// the answer's score is already held.
    pub fn record_answer(&self, question_id: &QuestionId, score: AnswerScore) -> bool {
        self.write(|entries| {
            entries
                .iter_mut()
                .find(|e| &e.question_id == question_id)
                .map_or(false, |e| e.apply(score))
        })
    }

    /// Drop a question (closed as duplicate).
    pub fn remove(&self, question_id: &QuestionId) {
        self.write(|entries| entries.retain(|e| &e.question_id != question_id));
    }

    pub fn contains(&self, question_id: &QuestionId) -> bool {
        self.snapshot().iter().any(|e| &e.question_id == question_id)
    }

    /// Aged best-answer score of an indexed question.
    pub fn best_score(&self, question_id: &QuestionId, now: DateTime<Utc>) -> Option<f64> {
        self.snapshot()
            .iter()
            .find(|e| &e.question_id == question_id)
            .map(|e| e.best_score(&self.scoring, now))
    }

    /// Questions at or above the search threshold, best first as of `now`.
    pub fn find_candidates(&self, signature: &Signature, now: DateTime<Utc>) -> Vec<Candidate> {
        self.find_candidates_with(signature, None, now)
    }

    /// Like [`Self::find_candidates`], restricted to one category when given.
    pub fn find_candidates_with(
        &self,
        signature: &Signature,
        category: Option<ErrorCategory>,
        now: DateTime<Utc>,
    ) -> Vec<Candidate> {
        let mut hits = self.scan(signature, category, self.search_threshold, now);
        hits.sort_by(search_order);
        hits
    }

    /// The open question a submission should attach to, if any reaches the
    /// match threshold. Highest similarity wins.
    pub fn best_match(&self, signature: &Signature, now: DateTime<Utc>) -> Option<Candidate> {
        self.scan(signature, None, self.match_threshold, now)
            .into_iter()
            .min_by(match_order)
    }

    fn scan(
        &self,
        signature: &Signature,
        category: Option<ErrorCategory>,
        threshold: f64,
        now: DateTime<Utc>,
    ) -> Vec<Candidate> {
        let snapshot = self.snapshot();
        snapshot
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter_map(|e| {
                let sim = e.similarity_to(signature);
                (sim >= threshold)
                    .then(|| Candidate::from_entry(e, sim, e.best_score(&self.scoring, now)))
            })
            .collect()
    }
}

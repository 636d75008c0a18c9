use errorcache_core::constants::MAX_SEARCH_LIMIT;
use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::traits::IErrorCacheStorage;
use errorcache_matching::Signature;
use errorcache_observability::search_span;
use tracing::Instrument;

use crate::repository::Repository;
use crate::requests::{SearchHit, SearchQuery};
use crate::validation::validate_error_text;

impl<S: IErrorCacheStorage> Repository<S> {
    /// Questions matching `error_text`, best answers first. Scores are aged
    /// to the current instant. Read-only.
    pub async fn search(&self, error_text: &str) -> ErrorCacheResult<Vec<SearchHit>> {
        self.search_with(&SearchQuery::new(error_text)).await
    }

    pub async fn search_with(&self, query: &SearchQuery) -> ErrorCacheResult<Vec<SearchHit>> {
        let span = search_span!(query.text.len());
        async {
            validate_error_text(&query.text)?;
            let limit = query
                .limit
                .unwrap_or(self.config.matching.default_search_limit)
                .clamp(1, MAX_SEARCH_LIMIT);

            let now = self.clock.now();
            let signature = Signature::from_error(&query.text);
            let candidates = self.index.find_candidates_with(&signature, query.category, now);

            let mut hits = Vec::with_capacity(limit.min(candidates.len()));
            for candidate in candidates {
                if hits.len() == limit {
                    break;
                }
                // The index may briefly lag a moderation change.
                let Some(question) = self.storage.get_question(&candidate.question_id).await?
                else {
                    continue;
                };
                if !question.status.is_open() {
                    continue;
                }
                let answers = self.storage.answers_for_question(&question.question_id).await?;
                let best = self.scoring.best_answer(&answers, now).cloned();
                hits.push(SearchHit {
                    score: best
                        .as_ref()
                        .map_or(0.0, |a| self.scoring.effective_score(a, now)),
                    best_answer: best,
                    similarity: candidate.similarity,
                    answer_count: answers.len(),
                    question,
                });
            }
            self.metrics.record_search();
            tracing::debug!(hits = hits.len(), "search finished");
            Ok(hits)
        }
        .instrument(span)
        .await
    }
}

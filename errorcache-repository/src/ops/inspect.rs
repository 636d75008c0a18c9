use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{Agent, AgentId, Answer, AnswerId, Question, QuestionId};
use errorcache_core::traits::IErrorCacheStorage;
use errorcache_observability::events;
use tracing::instrument;

use super::question_not_found;
use crate::repository::Repository;
use crate::requests::ScoreCheck;

/// Scores closer than this count as equal when checking the cache.
const SCORE_TOLERANCE: f64 = 1e-9;

impl<S: IErrorCacheStorage> Repository<S> {
    /// Highest-ranked answer of a question, following duplicate links.
    #[instrument(skip_all, fields(question_id = %question_id))]
    pub async fn get_best_answer(&self, question_id: &QuestionId) -> ErrorCacheResult<Answer> {
        let question = self.canonical_question(question_id).await?;
        self.answers(&question.question_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ErrorCacheError::NotFound {
                entity: "answer",
                id: format!("best answer of question {question_id}"),
            })
    }

    /// Agent record with its level recomputed from current stats.
    pub async fn agent(&self, agent_id: &AgentId) -> ErrorCacheResult<Option<Agent>> {
        let agent = self.storage.get_agent(agent_id).await?;
        Ok(agent.map(|a| self.trust.refresh(&a)))
    }

    pub async fn question(&self, question_id: &QuestionId) -> ErrorCacheResult<Question> {
        self.storage
            .get_question(question_id)
            .await?
            .ok_or_else(|| question_not_found(question_id))
    }

    /// Answers of one question, best first as of now.
    pub async fn answers(&self, question_id: &QuestionId) -> ErrorCacheResult<Vec<Answer>> {
        let mut answers = self.storage.answers_for_question(question_id).await?;
        self.scoring.rank(&mut answers, self.clock.now());
        Ok(answers)
    }

    /// Re-derive an answer's score from its verifications and compare it with
    /// the cached value.
    #[instrument(skip_all, fields(answer_id = %answer_id))]
    pub async fn recompute_score(&self, answer_id: &AnswerId) -> ErrorCacheResult<ScoreCheck> {
        let answer = self
            .storage
            .get_answer(answer_id)
            .await?
            .ok_or_else(|| ErrorCacheError::NotFound {
                entity: "answer",
                id: answer_id.to_string(),
            })?;
        let verifications = self.storage.verifications_for_answer(answer_id).await?;
        let derived = self.scoring.rederive(&answer, &verifications);
        let matches = (derived - answer.current_score).abs() <= SCORE_TOLERANCE;
        if !matches {
            events::score_drift(answer_id.as_str(), answer.current_score, derived);
        }
        Ok(ScoreCheck {
            answer_id: answer.answer_id,
            cached: answer.current_score,
            derived,
            matches,
        })
    }
}

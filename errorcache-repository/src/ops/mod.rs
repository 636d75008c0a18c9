//! Repository operations, one file per flow.

mod inspect;
mod moderate;
mod search;
mod submit;
mod verify;

use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{Question, QuestionId};
use errorcache_core::traits::IErrorCacheStorage;

use crate::repository::Repository;

/// Longest duplicate chain followed before giving up.
const MAX_CANONICAL_HOPS: usize = 16;

pub(crate) fn question_not_found(question_id: &QuestionId) -> ErrorCacheError {
    ErrorCacheError::NotFound {
        entity: "question",
        id: question_id.to_string(),
    }
}

impl<S: IErrorCacheStorage> Repository<S> {
    /// Load a question and follow duplicate links to the open canonical one.
    pub(crate) async fn canonical_question(
        &self,
        question_id: &QuestionId,
    ) -> ErrorCacheResult<Question> {
        let mut question = self
            .storage
            .get_question(question_id)
            .await?
            .ok_or_else(|| question_not_found(question_id))?;
        for _ in 0..MAX_CANONICAL_HOPS {
            let Some(next) = question.status.canonical().cloned() else {
                return Ok(question);
            };
            question = self
                .storage
                .get_question(&next)
                .await?
                .ok_or_else(|| question_not_found(&next))?;
        }
        Err(ErrorCacheError::ValidationError(format!(
            "duplicate chain from question {question_id} is too long"
        )))
    }
}

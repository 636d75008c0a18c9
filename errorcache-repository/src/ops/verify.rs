use chrono::{DateTime, Utc};
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{
    Agent, AgentIdentity, Answer, AuditEntry, AuditOperation, AuditOutcome, Operation, OperationClass,
    Verification, VerificationId, VerificationOutcome,
};
use errorcache_core::traits::{IErrorCacheStorage, VerificationCommit};
use errorcache_observability::{events, verification_span};
use errorcache_trust::{is_corroborated, TrustTransition};
use serde_json::json;
use tracing::{debug, Instrument};

use crate::repository::{Attempt, Repository};
use crate::requests::VerificationRequest;
use crate::validation::{evidence_fields, normalize_environment, validate_evidence};

impl<S: IErrorCacheStorage> Repository<S> {
    /// Record whether an answer's fix worked.
    ///
    /// Under the answer's and the verifier's locks: judge corroboration against
    /// prior verifications, rescore the answer, apply the trust outcome, and
    /// commit all of it with the audit record in one transaction.
    pub async fn record_verification(
        &self,
        identity: &AgentIdentity,
        request: VerificationRequest,
    ) -> ErrorCacheResult<Verification> {
        let span = verification_span!(identity.agent_id, request.answer_id);
        async {
            let now = self.clock.now();
            let attempt =
                Attempt::new(AuditOperation::RecordVerification).about(request.answer_id.as_str());
            match self.try_verify(identity, &request, now).await {
                Ok(verification) => {
                    self.metrics.record_verification();
                    Ok(verification)
                }
                Err(e) => {
                    self.record_failure(identity, &attempt, &e, now).await;
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_verify(
        &self,
        identity: &AgentIdentity,
        request: &VerificationRequest,
        now: DateTime<Utc>,
    ) -> ErrorCacheResult<Verification> {
        let environment = normalize_environment(&request.environment)?;
        validate_evidence(request.tier, request.evidence.as_ref())?;
        let fields = evidence_fields(request.evidence.as_ref());
        let named: Vec<(&str, &str)> = fields.iter().map(|(n, t)| (n.as_str(), *t)).collect();
        self.scanner.scan_fields(&named).into_result()?;

        let _answer_guard = self.locks.answer(&request.answer_id).await;
        let _agent_guard = self.locks.agent(&identity.agent_id).await;
        let agent = self.resolve_agent(identity, now).await?;
        self.trust.authorize(&agent, Operation::SubmitVerification)?;

        let answer = self
            .storage
            .get_answer(&request.answer_id)
            .await?
            .ok_or_else(|| ErrorCacheError::NotFound {
                entity: "answer",
                id: request.answer_id.to_string(),
            })?;

        let class = OperationClass::Verification;
        let slot = self
            .limiter
            .check_and_record(&agent.agent_id, class, now)
            .into_result(class)?;

        let result = self
            .commit_outcome(&agent, answer, request, environment, now)
            .await;
        if result.is_err() {
            self.limiter.release(&agent.agent_id, class, slot.recorded_at);
        }
        result
    }

    /// Corroborate, rescore, update trust, commit. Runs with the answer and
    /// agent locks held and a rate slot recorded.
    async fn commit_outcome(
        &self,
        agent: &Agent,
        mut answer: Answer,
        request: &VerificationRequest,
        environment: String,
        now: DateTime<Utc>,
    ) -> ErrorCacheResult<Verification> {
        let mut verifications = self.storage.verifications_for_answer(&answer.answer_id).await?;
        let corroborated = is_corroborated(
            &agent.agent_id,
            &answer.owner_agent_id,
            request.outcome,
            &verifications,
        );

        let verification = Verification {
            verification_id: VerificationId::new(),
            answer_id: answer.answer_id.clone(),
            verifier_agent_id: agent.agent_id.clone(),
            outcome: request.outcome,
            tier: request.tier,
            environment,
            evidence: request.evidence.clone(),
            corroborated,
            created_at: now,
        };
        verifications.push(verification.clone());

        let breakdown = self.scoring.score(&answer, &verifications, now);
        let previous_score = answer.current_score;
        answer.current_score = breakdown.final_score;
        answer.score_updated_at = now;
        answer.verification_count = u32::try_from(verifications.len()).unwrap_or(u32::MAX);
        answer.pass_count = u32::try_from(
            verifications
                .iter()
                .filter(|v| v.outcome == VerificationOutcome::Pass)
                .count(),
        )
        .unwrap_or(u32::MAX);

        let (updated_agent, transition) = self.trust.record_outcome(agent, corroborated);

        let audit = AuditEntry::new(
            agent.agent_id.clone(),
            AuditOperation::RecordVerification,
            AuditOutcome::Ok,
            now,
        )
        .with_entity(verification.verification_id.as_str())
        .with_details(json!({
            "answer_id": answer.answer_id,
            "outcome": verification.outcome.as_str(),
            "tier": verification.tier.as_str(),
            "corroborated": corroborated,
            "score": answer.current_score,
        }));

        self.storage
            .commit_verification(VerificationCommit {
                verification: &verification,
                answer: &answer,
                agent: &updated_agent,
                audit: &audit,
            })
            .await?;

        self.index_answer(&answer);
        events::verification_recorded(
            answer.answer_id.as_str(),
            agent.agent_id.as_str(),
            verification.outcome.as_str(),
            answer.current_score,
        );
        match transition {
            TrustTransition::Promoted { from, to } | TrustTransition::Demoted { from, to } => {
                events::trust_changed(agent.agent_id.as_str(), from, to);
                self.metrics
                    .record_trust_change(matches!(transition, TrustTransition::Promoted { .. }));
            }
            TrustTransition::Unchanged(_) => {}
        }
        debug!(
            previous_score,
            score = answer.current_score,
            recency = breakdown.recency,
            env_diversity = breakdown.env_diversity,
            "answer rescored"
        );
        Ok(verification)
    }
}

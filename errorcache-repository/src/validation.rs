//! Input rules checked before any lock is taken or anything is written.

use errorcache_core::constants::{
    MAX_COMMANDS, MAX_COMMAND_CHARS, MAX_ENVIRONMENT_CHARS, MAX_ERROR_TEXT_CHARS,
    MAX_TITLE_CHARS, MIN_ERROR_TEXT_CHARS, MIN_FIX_APPROACH_CHARS, MIN_ROOT_CAUSE_CHARS,
};
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{Evidence, VerificationTier};
use errorcache_matching::normalize::truncate_chars;

use crate::requests::Submission;

fn invalid(message: impl Into<String>) -> ErrorCacheError {
    ErrorCacheError::ValidationError(message.into())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Error text used for search or submission: at least 3 characters after trimming.
pub fn validate_error_text(text: &str) -> ErrorCacheResult<()> {
    if char_len(text.trim()) < MIN_ERROR_TEXT_CHARS {
        return Err(invalid(format!(
            "error text must be at least {MIN_ERROR_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_submission(submission: &Submission) -> ErrorCacheResult<()> {
    if submission.title.trim().is_empty() {
        return Err(invalid("title must not be empty"));
    }
    validate_error_text(&submission.error_text)?;
    if char_len(submission.root_cause.trim()) < MIN_ROOT_CAUSE_CHARS {
        return Err(invalid(format!(
            "root_cause must be at least {MIN_ROOT_CAUSE_CHARS} characters"
        )));
    }
    if char_len(submission.fix_approach.trim()) < MIN_FIX_APPROACH_CHARS {
        return Err(invalid(format!(
            "fix_approach must be at least {MIN_FIX_APPROACH_CHARS} characters"
        )));
    }
    if submission.commands.len() > MAX_COMMANDS {
        return Err(invalid(format!("at most {MAX_COMMANDS} commands are allowed")));
    }
    for (i, command) in submission.commands.iter().enumerate() {
        if command.trim().is_empty() {
            return Err(invalid(format!("commands[{i}] must not be empty")));
        }
        if char_len(command) > MAX_COMMAND_CHARS {
            return Err(invalid(format!(
                "commands[{i}] exceeds {MAX_COMMAND_CHARS} characters"
            )));
        }
    }
    Ok(())
}

/// Trimmed title, cut at 300 characters.
pub fn clean_title(title: &str) -> String {
    truncate_chars(title.trim(), MAX_TITLE_CHARS)
        .trim_end()
        .to_string()
}

/// The stored prefix of a raw error text.
pub fn stored_error_text(text: &str) -> String {
    truncate_chars(text, MAX_ERROR_TEXT_CHARS).to_string()
}

/// Trimmed, lowercased environment label.
pub fn normalize_environment(label: &str) -> ErrorCacheResult<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(invalid("environment must not be empty"));
    }
    if char_len(trimmed) > MAX_ENVIRONMENT_CHARS {
        return Err(invalid(format!(
            "environment exceeds {MAX_ENVIRONMENT_CHARS} characters"
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Evidence-backed and reproducible verifications must carry evidence.
pub fn validate_evidence(tier: VerificationTier, evidence: Option<&Evidence>) -> ErrorCacheResult<()> {
    let has_evidence = evidence.is_some_and(|e| !e.is_empty());
    if tier.requires_evidence() && !has_evidence {
        return Err(invalid(format!("{tier} verifications require evidence")));
    }
    Ok(())
}

/// Every free-text field of a submission, named for rejection reasons.
pub fn submission_fields(submission: &Submission) -> Vec<(String, &str)> {
    let mut fields = vec![
        ("title".to_string(), submission.title.as_str()),
        ("error_text".to_string(), submission.error_text.as_str()),
        ("root_cause".to_string(), submission.root_cause.as_str()),
        ("fix_approach".to_string(), submission.fix_approach.as_str()),
    ];
    fields.extend(
        submission
            .commands
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("commands[{i}]"), c.as_str())),
    );
    fields
}

/// Free-text fields of verification evidence.
pub fn evidence_fields(evidence: Option<&Evidence>) -> Vec<(String, &str)> {
    let Some(evidence) = evidence else {
        return Vec::new();
    };
    let mut fields = Vec::new();
    if let Some(notes) = evidence.notes.as_deref() {
        fields.push(("evidence.notes".to_string(), notes));
    }
    if let Some(results) = evidence.test_results.as_deref() {
        fields.push(("evidence.test_results".to_string(), results));
    }
    fields
}

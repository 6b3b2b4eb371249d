//! Trait abstraction for the submit operation to enable mocking in tests

use crate::state::forms::{SubmissionError, SubmissionPayload};
use async_trait::async_trait;
use std::time::Duration;

/// Sends a captured payload somewhere and reports acceptance or rejection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitOperation: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError>;
}

/// Run `op`, giving up after `timeout`. `None` waits for as long as it takes.
pub async fn submit_with_timeout(
    op: &dyn SubmitOperation,
    payload: SubmissionPayload,
    timeout: Option<Duration>,
) -> Result<(), SubmissionError> {
    let Some(limit) = timeout else {
        return op.submit(payload).await;
    };
    match tokio::time::timeout(limit, op.submit(payload)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SubmissionError::Timeout(limit)),
    }
}

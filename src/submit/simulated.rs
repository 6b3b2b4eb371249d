//! Simulated submission: fixed latency, occasional failure

use super::traits::SubmitOperation;
use crate::state::forms::{SubmissionError, SubmissionPayload};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Message returned when the simulated call fails
pub const SIMULATED_FAILURE: &str = "Sending failed. Please try again.";

/// Stands in for a real endpoint until one exists
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedSubmitter {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), 0.1)
    }
}

#[async_trait]
impl SubmitOperation for SimulatedSubmitter {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError> {
        tracing::debug!(
            "simulating submission {} ({} fields, captured {})",
            payload.id(),
            payload.values().len(),
            payload.captured_at().to_rfc3339()
        );
        tokio::time::sleep(self.latency).await;

        let failed = rand::thread_rng().gen_bool(self.failure_rate);
        if failed {
            Err(SubmissionError::Rejected(SIMULATED_FAILURE.to_string()))
        } else {
            Ok(())
        }
    }
}

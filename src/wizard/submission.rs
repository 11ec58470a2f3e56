//! Asynchronous form submission and the clock it waits on

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};
use ulid::Ulid;

use crate::wizard::definition::WizardDefinition;
use crate::wizard::field::FieldStore;

/// Source of delays for submission handlers
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time, backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A clock that only moves when told to
///
/// Sleepers resolve once [`ManualClock::advance`] has pushed the elapsed
/// time past their deadline.
#[derive(Debug)]
pub struct ManualClock {
    elapsed: watch::Sender<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        let (elapsed, _) = watch::channel(Duration::ZERO);
        Self { elapsed }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed
            .send_modify(|elapsed| *elapsed = elapsed.saturating_add(by));
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.borrow()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        let mut rx = self.elapsed.subscribe();
        let deadline = rx.borrow().saturating_add(duration);
        while *rx.borrow_and_update() < deadline {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Proof of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub form: String,
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(definition: &WizardDefinition) -> Self {
        Self {
            form: definition.id.clone(),
            reference: format!("{}-{}", definition.reference_prefix, Ulid::new()),
            submitted_at: Utc::now(),
        }
    }
}

/// The single terminal result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted(Receipt),
    Rejected(String),
}

/// Receives a completed form
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    async fn submit(&self, definition: &WizardDefinition, fields: &FieldStore) -> SubmissionOutcome;
}

/// Accepts every form after a fixed delay
pub struct SimulatedSubmission {
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl SimulatedSubmission {
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self { clock, delay }
    }

    /// Real-time submission with the given delay
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(Arc::new(TokioClock), delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl SubmissionHandler for SimulatedSubmission {
    async fn submit(&self, definition: &WizardDefinition, fields: &FieldStore) -> SubmissionOutcome {
        debug!(
            form = %definition.id,
            fields = fields.len(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating submission"
        );
        self.clock.sleep(self.delay).await;
        let receipt = Receipt::new(definition);
        info!(form = %definition.id, reference = %receipt.reference, "submission accepted");
        SubmissionOutcome::Accepted(receipt)
    }
}

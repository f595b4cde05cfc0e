//! Best-effort fan-out of one message to every configured recipient.

use futures::future::join_all;
use serde::Serialize;

use crate::models::telegram::OutgoingMessage;
use crate::services::telegram::Notifier;

/// Per-recipient outcome of a fan-out.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: Vec<FailedDelivery>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedDelivery {
    pub chat_id: String,
    pub error: String,
}

impl DeliveryReport {
    /// True when recipients were attempted and none of them was reached.
    pub fn all_failed(&self) -> bool {
        self.delivered == 0 && !self.failed.is_empty()
    }
}

/// Send `message` to every recipient concurrently.
///
/// A failing recipient never prevents delivery to the others; failures are
/// logged and collected in the returned report.
pub async fn broadcast(
    notifier: &dyn Notifier,
    recipients: &[String],
    message: &OutgoingMessage,
) -> DeliveryReport {
    let sends = recipients.iter().map(|chat_id| async move {
        let outcome = notifier.send(chat_id, message).await;
        (chat_id, outcome)
    });

    let mut report = DeliveryReport::default();
    for (chat_id, outcome) in join_all(sends).await {
        match outcome {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, error = %e, "Notification delivery failed");
                report.failed.push(FailedDelivery {
                    chat_id: chat_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

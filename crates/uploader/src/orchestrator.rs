//! Batch orchestrator: concurrent fan-out, index-tagged fan-in.
//!
//! All tasks are polled together on the caller's task; none are spawned.
//! Completion order is whatever the network makes it. Input order is
//! restored afterwards from the index each outcome carries.

use futures_util::stream::{FuturesUnordered, StreamExt};
use imgdrop_protocol::{ImageItem, ResultItem, UploadConfig};
use tracing::{Instrument, error, info, info_span};

use crate::error::UploadError;
use crate::task::{UploadOutcome, UploadTask};
use crate::transport::{Notifier, Transport};

/// Title of the notification sent when a whole batch fails.
pub const BATCH_FAILED_TITLE: &str = "Upload failed";

/// An outcome paired with the position of its item in the batch.
struct TaggedOutcome {
    index: usize,
    outcome: UploadOutcome,
}

/// Uploads batches of images through a host transport.
pub struct BatchOrchestrator<'a> {
    transport: &'a dyn Transport,
    notifier: &'a dyn Notifier,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(transport: &'a dyn Transport, notifier: &'a dyn Notifier) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    /// Uploads every item and returns one result per item, in input order.
    ///
    /// Per-item failures are folded into their results. An `Err` means
    /// the batch never started (invalid config); no partial list is returned.
    pub async fn run(
        &self,
        items: &[ImageItem],
        config: &UploadConfig,
    ) -> Result<Vec<ResultItem>, UploadError> {
        if let Err(e) = config.validate() {
            let err = UploadError::from(e);
            error!(error = %err, "batch rejected");
            self.notifier.notify(BATCH_FAILED_TITLE, &err.to_string());
            return Err(err);
        }

        if items.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = items.to_vec();
        let total = snapshot.len();
        let span = info_span!("batch", batch_id = %uuid::Uuid::new_v4(), items = total);

        async move {
            info!(endpoint = %config.endpoint_url, "batch started");

            let mut pending: FuturesUnordered<_> = snapshot
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let task = UploadTask::new(index, item, config, self.transport);
                    async move {
                        TaggedOutcome {
                            index,
                            outcome: task.run(self.notifier).await,
                        }
                    }
                })
                .collect();

            let mut tagged = Vec::with_capacity(total);
            while let Some(done) = pending.next().await {
                tagged.push(done);
            }
            tagged.sort_by_key(|t| t.index);

            let failed = tagged.iter().filter(|t| !t.outcome.is_success()).count();
            info!(succeeded = total - failed, failed, "batch finished");

            Ok(tagged.into_iter().map(|t| t.outcome.into_result()).collect())
        }
        .instrument(span)
        .await
    }
}

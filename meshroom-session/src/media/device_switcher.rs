use meshroom_core::MediaConstraints;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::DeviceError;
use crate::media::{MediaDevices, MediaStream};

#[derive(Debug, Clone)]
pub struct SwitchRequest {
    pub seq: u64,
    pub constraints: MediaConstraints,
}

#[derive(Debug)]
pub struct SwitchOutcome {
    pub request: SwitchRequest,
    pub result: Result<MediaStream, DeviceError>,
}

/// Serializes capture device changes.
///
/// At most one acquisition runs at a time. Requests made while one is in
/// flight overwrite a single pending slot, so only the latest of them is
/// acquired once the current one finishes.
pub struct DeviceSwitcher {
    requests: watch::Sender<Option<SwitchRequest>>,
    outcomes: mpsc::Receiver<SwitchOutcome>,
    next_seq: u64,
    worker: JoinHandle<()>,
}

impl DeviceSwitcher {
    pub fn spawn(devices: Arc<dyn MediaDevices>) -> Self {
        let (requests, pending) = watch::channel(None);
        let (outcome_tx, outcomes) = mpsc::channel(4);
        let worker = tokio::spawn(Self::work(devices, pending, outcome_tx));

        Self {
            requests,
            outcomes,
            next_seq: 0,
            worker,
        }
    }

    /// Queues a switch, superseding any request that has not started yet.
    pub fn request(&mut self, constraints: MediaConstraints) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.requests
            .send_replace(Some(SwitchRequest { seq, constraints }));
        seq
    }

    /// Sequence number of the most recent request.
    pub fn latest_seq(&self) -> u64 {
        self.next_seq
    }

    pub async fn next_outcome(&mut self) -> Option<SwitchOutcome> {
        self.outcomes.recv().await
    }

    async fn work(
        devices: Arc<dyn MediaDevices>,
        mut pending: watch::Receiver<Option<SwitchRequest>>,
        outcomes: mpsc::Sender<SwitchOutcome>,
    ) {
        let mut last_seq = 0;

        while pending.changed().await.is_ok() {
            let request = { pending.borrow_and_update().clone() };
            let Some(request) = request else {
                continue;
            };

            if request.seq > last_seq + 1 {
                debug!(
                    "Superseded {} device change request(s)",
                    request.seq - last_seq - 1
                );
            }
            last_seq = request.seq;

            let result = devices.acquire(&request.constraints).await;
            if outcomes.send(SwitchOutcome { request, result }).await.is_err() {
                break;
            }
        }
    }
}

impl Drop for DeviceSwitcher {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

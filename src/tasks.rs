//! Background tasks for non-blocking fetches.
//!
//! The startup fetch runs on a tokio task so the UI keeps rendering the
//! loading spinner. The task reports through an unbounded channel that the
//! main loop drains with `try_recv()` on every iteration.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, MembersClient};
use crate::table::RecordFields;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum TaskMessage {
    /// Result of the one-time member list fetch.
    RecordsLoaded(Result<Vec<RecordFields>, ApiError>),
}

/// Spawns background tasks that report back over a channel.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<TaskMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<TaskMessage>) -> Self {
        Self { tx }
    }

    /// Spawn the member list fetch.
    pub fn spawn_load_records(&self, client: MembersClient) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_records().await;
            if tx.send(TaskMessage::RecordsLoaded(result)).is_err() {
                debug!("Event loop gone before records arrived");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let spawner = TaskSpawner::new(tx);

        // Nothing listens on port 9 of localhost in a test environment.
        let client = MembersClient::with_url("http://127.0.0.1:9/members.json", None).unwrap();
        spawner.spawn_load_records(client);

        match rx.recv().await {
            Some(TaskMessage::RecordsLoaded(result)) => assert!(result.is_err()),
            None => panic!("task dropped without reporting"),
        }
    }
}

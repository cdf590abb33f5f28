use crate::common::error::SentimentError;
use crate::pipelines::presentation::RenderModel;
use crate::pipelines::sentiment::{analyze, SentimentContext, SentimentScorer};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;
use tokio::task;
use tracing::{debug, error, info};

/// Message type for the runner channel: the review and the sender for its result
type Message = (String, oneshot::Sender<Result<RenderModel, SentimentError>>);

/// # Runner for the analyze actions
/// Owns the `SentimentContext` on a dedicated thread. The channel has no buffer: an analyze
/// action is handed over to the runner only once the previous one is done.
#[derive(Debug, Clone)]
pub struct SentimentRunner {
    sender: mpsc::SyncSender<Message>,
}

impl SentimentRunner {
    /// Spawn the runner thread and build the context on it. Returns once the context is loaded,
    /// or with the loading error.
    pub fn spawn<M, F>(build_context: F) -> Result<(JoinHandle<()>, SentimentRunner), SentimentError>
    where
        M: SentimentScorer + 'static,
        F: FnOnce() -> Result<SentimentContext<M>, SentimentError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(0);
        let (ready_sender, ready_receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("sentiment-runner".to_string())
            .spawn(move || match build_context() {
                Ok(context) => {
                    let _ = ready_sender.send(Ok(()));
                    Self::runner(context, receiver)
                }
                Err(error) => {
                    let _ = ready_sender.send(Err(error));
                }
            })?;
        ready_receiver.recv().map_err(|_| {
            SentimentError::ServerError("runner thread exited while loading".to_string())
        })??;
        info!("sentiment runner ready");
        Ok((handle, SentimentRunner { sender }))
    }

    /// The analysis loop itself. A panic during an analysis fails that analysis only.
    fn runner<M: SentimentScorer>(context: SentimentContext<M>, receiver: mpsc::Receiver<Message>) {
        while let Ok((review, sender)) = receiver.recv() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| analyze(&review, &context)))
                .unwrap_or_else(|_| {
                    error!("analysis panicked");
                    Err(SentimentError::InferenceError(
                        "analysis panicked".to_string(),
                    ))
                });
            if sender.send(result).is_err() {
                debug!("analyze action dropped before completion");
            }
        }
        debug!("sentiment runner stopped");
    }

    /// Make the runner analyze a review and return the result
    pub async fn analyze(&self, review: String) -> Result<RenderModel, SentimentError> {
        let (sender, receiver) = oneshot::channel();
        let runner_sender = self.sender.clone();
        task::spawn_blocking(move || runner_sender.send((review, sender)))
            .await
            .map_err(|e| SentimentError::ServerError(e.to_string()))?
            .map_err(|_| SentimentError::ServerError("sentiment runner stopped".to_string()))?;
        receiver.await.map_err(|_| {
            SentimentError::ServerError("sentiment runner dropped the analysis".to_string())
        })?
    }
}

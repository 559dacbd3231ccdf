use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::client::{CandidateApi, HttpCandidateApi};
use super::device::{CaptureDevice, MediaStream, RecordedMedia};
use super::machine::{CaptureFlow, Command, Event, Phase};
use super::upload::{upload_with_retry, RetryPolicy};
use super::{CaptureError, CaptureResult};
use crate::config::ClientConfig;

/// What the candidate can do from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateAction {
    RetryPermission,
    Begin,
    StartNow,
    Stop,
    SubmitText(String),
    Advance,
}

impl From<CandidateAction> for Event {
    fn from(action: CandidateAction) -> Self {
        match action {
            CandidateAction::RetryPermission => Event::RetryPermission,
            CandidateAction::Begin => Event::Begin,
            CandidateAction::StartNow => Event::StartNow,
            CandidateAction::Stop => Event::Stop,
            CandidateAction::SubmitText(text) => Event::SubmitText(text),
            CandidateAction::Advance => Event::Advance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub question_number: i32,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub session_id: Uuid,
    pub answered: usize,
    pub unsaved: Vec<i32>,
}

pub struct CaptureDriver {
    api: Arc<dyn CandidateApi>,
    device: Arc<dyn CaptureDevice>,
    policy: RetryPolicy,
    observer: Option<watch::Sender<Snapshot>>,
}

#[derive(Default)]
struct Resources {
    stream: Option<MediaStream>,
    media: Option<RecordedMedia>,
    ticker: Option<Interval>,
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

impl CaptureDriver {
    pub fn new(api: Arc<dyn CandidateApi>, device: Arc<dyn CaptureDevice>) -> Self {
        Self {
            api,
            device,
            policy: RetryPolicy::default(),
            observer: None,
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        device: Arc<dyn CaptureDevice>,
    ) -> CaptureResult<Self> {
        let api = HttpCandidateApi::from_config(config)?;
        Ok(Self::new(Arc::new(api), device).with_policy(config.retry))
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Publish every phase change to `observer`.
    pub fn with_observer(mut self, observer: watch::Sender<Snapshot>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the flow for `token` until the completion view. Dropping the
    /// action sender before that ends the flow with `Abandoned`; the device
    /// is released either way.
    pub async fn run(
        self,
        token: &str,
        mut actions: mpsc::Receiver<CandidateAction>,
    ) -> CaptureResult<FlowOutcome> {
        let found = self.api.fetch_session(token).await?;
        let session_id = found.session.id;
        info!(%session_id, answered = found.responses.len(), "capture flow started");

        let (mut flow, initial) = CaptureFlow::resume(&found.session, &found.responses);
        let mut queue: VecDeque<Command> = initial.into();
        let mut res = Resources::default();

        loop {
            while let Some(command) = queue.pop_front() {
                if let Some(event) = self.execute(command, &flow, session_id, &mut res).await {
                    queue.extend(flow.handle(event));
                }
            }
            self.publish(&flow);

            if flow.is_finished() {
                break;
            }

            let event = tokio::select! {
                _ = next_tick(&mut res.ticker) => Event::Tick,
                action = actions.recv() => match action {
                    Some(action) => action.into(),
                    None => {
                        warn!(%session_id, question = flow.question_number(), "capture flow abandoned");
                        return Err(CaptureError::Abandoned);
                    }
                },
            };
            queue.extend(flow.handle(event));
        }

        Ok(FlowOutcome {
            session_id,
            answered: flow.answered().len(),
            unsaved: flow.unsaved().to_vec(),
        })
    }

    fn publish(&self, flow: &CaptureFlow) {
        if let Some(observer) = &self.observer {
            observer.send_replace(Snapshot {
                question_number: flow.question_number(),
                phase: flow.phase().clone(),
            });
        }
    }

    async fn execute(
        &self,
        command: Command,
        flow: &CaptureFlow,
        session_id: Uuid,
        res: &mut Resources,
    ) -> Option<Event> {
        debug!(?command, "capture command");
        match command {
            Command::RequestPermission => match self.device.acquire().await {
                Ok(stream) => {
                    res.stream = Some(stream);
                    Some(Event::PermissionGranted)
                }
                Err(e) => {
                    warn!(error = %e, "camera or microphone unavailable");
                    Some(Event::PermissionDenied)
                }
            },
            Command::StartTimer => {
                let period = Duration::from_secs(1);
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                res.ticker = Some(interval);
                None
            }
            Command::StopTimer => {
                res.ticker = None;
                None
            }
            Command::StartRecording => {
                match res.stream.as_mut() {
                    Some(stream) => {
                        if let Err(e) = stream.start_recording() {
                            warn!(question = flow.question_number(), error = %e, "recorder failed to start");
                        }
                    }
                    None => warn!("no media stream to record from"),
                }
                None
            }
            Command::StopRecording => {
                res.media = match res.stream.as_mut() {
                    Some(stream) => match stream.stop_recording().await {
                        Ok(media) => Some(media),
                        Err(e) => {
                            warn!(question = flow.question_number(), error = %e, "recorder failed to stop");
                            None
                        }
                    },
                    None => None,
                };
                None
            }
            Command::Upload {
                question_number,
                duration_seconds,
            } => {
                let ok = match res.media.take() {
                    Some(media) if !media.is_empty() => upload_with_retry(
                        self.api.as_ref(),
                        &self.policy,
                        session_id,
                        question_number,
                        duration_seconds,
                        &media,
                    )
                    .await
                    .is_some(),
                    _ => {
                        warn!(question_number, "nothing recorded, skipping upload");
                        false
                    }
                };
                Some(Event::UploadFinished { ok })
            }
            Command::SaveText {
                question_number,
                text,
            } => {
                let ok = match self
                    .api
                    .submit_text(session_id, question_number, &text)
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(question_number, error = %e, "failed to save text answer");
                        false
                    }
                };
                Some(Event::TextSaved { ok })
            }
            Command::Complete => {
                if let Err(e) = self.api.complete(session_id).await {
                    warn!(%session_id, error = %e, "failed to mark session completed");
                }
                Some(Event::CompletionFinished)
            }
            Command::ShowCompletion => {
                res.ticker = None;
                res.stream = None;
                info!(%session_id, "capture flow completed");
                None
            }
        }
    }
}

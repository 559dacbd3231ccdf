//! Per-question sequencing for the candidate: reveal, read, record, upload.
//!
//! `CaptureFlow` is pure. It consumes [`Event`]s and returns the
//! [`Command`]s the driver must run; at most one timer is armed at a time
//! and `StartTimer` always replaces the previous one.

use std::collections::BTreeSet;

use crate::models::question::Question;
use crate::models::response::Response;
use crate::models::test_session::TestSession;
use crate::services::question_catalog::{self, TOTAL_QUESTIONS};

/// Seconds the candidate gets to read a question before recording starts.
pub const READING_SECONDS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingPermission,
    PermissionDenied,
    Intro,
    Reading { remaining: u32 },
    Recording { elapsed: u32, limit: u32 },
    Uploading,
    Next { uploaded: bool },
    Completing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PermissionGranted,
    PermissionDenied,
    RetryPermission,
    /// Candidate leaves the intro screen.
    Begin,
    /// Candidate skips the rest of the reading countdown.
    StartNow,
    /// One second elapsed on the armed timer.
    Tick,
    /// Candidate ends the recording early.
    Stop,
    SubmitText(String),
    UploadFinished { ok: bool },
    TextSaved { ok: bool },
    Advance,
    CompletionFinished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RequestPermission,
    StartTimer,
    StopTimer,
    StartRecording,
    StopRecording,
    Upload {
        question_number: i32,
        duration_seconds: u32,
    },
    SaveText {
        question_number: i32,
        text: String,
    },
    Complete,
    ShowCompletion,
}

/// Where a (re)entered flow picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePoint {
    At(i32),
    Finished,
}

/// Resume after the highest answered question; never restart from 1.
pub fn resume_point(answered: impl IntoIterator<Item = i32>, total: i32) -> ResumePoint {
    match answered.into_iter().max() {
        Some(last) if last >= total => ResumePoint::Finished,
        Some(last) => ResumePoint::At(last.max(0) + 1),
        None => ResumePoint::At(1),
    }
}

#[derive(Debug, Clone)]
pub struct CaptureFlow {
    total: i32,
    question: i32,
    phase: Phase,
    answered: BTreeSet<i32>,
    unsaved: Vec<i32>,
}

impl CaptureFlow {
    /// Build the flow for a freshly fetched session and return the commands
    /// to run on entry.
    pub fn resume(session: &TestSession, responses: &[Response]) -> (Self, Vec<Command>) {
        let answered: BTreeSet<i32> = responses.iter().map(|r| r.question_number).collect();
        let point = resume_point(answered.iter().copied(), TOTAL_QUESTIONS);
        let mut flow = Self {
            total: TOTAL_QUESTIONS,
            question: 1,
            phase: Phase::AwaitingPermission,
            answered,
            unsaved: Vec::new(),
        };

        if session.is_completed() {
            flow.question = flow.total;
            flow.phase = Phase::Completed;
            return (flow, vec![Command::ShowCompletion]);
        }
        match point {
            ResumePoint::Finished => {
                flow.question = flow.total;
                flow.phase = Phase::Completing;
                (flow, vec![Command::Complete])
            }
            ResumePoint::At(n) => {
                flow.question = n;
                (flow, vec![Command::RequestPermission])
            }
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn question_number(&self) -> i32 {
        self.question
    }

    pub fn question(&self) -> Option<&'static Question> {
        question_catalog::get(self.question)
    }

    pub fn answered(&self) -> &BTreeSet<i32> {
        &self.answered
    }

    /// Questions whose submission was given up on.
    pub fn unsaved(&self) -> &[i32] {
        &self.unsaved
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Completed
    }

    fn recording_limit(&self) -> u32 {
        self.question()
            .map(Question::recording_limit_seconds)
            .unwrap_or(crate::models::question::MAX_RECORDING_SECONDS)
    }

    fn start_recording(&mut self) -> Vec<Command> {
        self.phase = Phase::Recording {
            elapsed: 0,
            limit: self.recording_limit(),
        };
        vec![Command::StopTimer, Command::StartRecording, Command::StartTimer]
    }

    fn finish_recording(&mut self, elapsed: u32) -> Vec<Command> {
        self.phase = Phase::Uploading;
        vec![
            Command::StopTimer,
            Command::StopRecording,
            Command::Upload {
                question_number: self.question,
                duration_seconds: elapsed,
            },
        ]
    }

    fn settle(&mut self, ok: bool) {
        if ok {
            self.answered.insert(self.question);
        } else {
            tracing::warn!(question = self.question, "answer not saved, moving on");
            self.unsaved.push(self.question);
        }
        self.phase = Phase::Next { uploaded: ok };
    }

    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match (&self.phase, event) {
            (Phase::AwaitingPermission, Event::PermissionGranted) => {
                self.phase = Phase::Intro;
                vec![]
            }
            (Phase::AwaitingPermission, Event::PermissionDenied) => {
                self.phase = Phase::PermissionDenied;
                vec![]
            }
            (Phase::PermissionDenied, Event::RetryPermission) => {
                self.phase = Phase::AwaitingPermission;
                vec![Command::RequestPermission]
            }

            (Phase::Intro, Event::Begin) => {
                self.phase = Phase::Reading {
                    remaining: READING_SECONDS,
                };
                vec![Command::StartTimer]
            }
            (Phase::Intro, Event::SubmitText(text)) => {
                self.phase = Phase::Uploading;
                vec![Command::SaveText {
                    question_number: self.question,
                    text,
                }]
            }

            (Phase::Reading { remaining }, Event::Tick) => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.start_recording()
                } else {
                    self.phase = Phase::Reading { remaining };
                    vec![]
                }
            }
            (Phase::Reading { .. }, Event::StartNow) => self.start_recording(),
            (Phase::Reading { .. }, Event::SubmitText(text)) => {
                self.phase = Phase::Uploading;
                vec![
                    Command::StopTimer,
                    Command::SaveText {
                        question_number: self.question,
                        text,
                    },
                ]
            }

            (Phase::Recording { elapsed, limit }, Event::Tick) => {
                let (elapsed, limit) = (elapsed + 1, *limit);
                if elapsed >= limit {
                    self.finish_recording(limit)
                } else {
                    self.phase = Phase::Recording { elapsed, limit };
                    vec![]
                }
            }
            (Phase::Recording { elapsed, .. }, Event::Stop) => {
                let elapsed = *elapsed;
                self.finish_recording(elapsed)
            }

            (Phase::Uploading, Event::UploadFinished { ok })
            | (Phase::Uploading, Event::TextSaved { ok }) => {
                self.settle(ok);
                vec![]
            }

            (Phase::Next { .. }, Event::Advance) => {
                if self.question >= self.total {
                    self.phase = Phase::Completing;
                    vec![Command::Complete]
                } else {
                    self.question += 1;
                    self.phase = Phase::Intro;
                    vec![]
                }
            }

            (Phase::Completing, Event::CompletionFinished) => {
                self.phase = Phase::Completed;
                vec![Command::ShowCompletion]
            }

            (phase, event) => {
                tracing::trace!(?phase, ?event, "event ignored");
                vec![]
            }
        }
    }
}

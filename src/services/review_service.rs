use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::SessionStore;
use crate::dto::admin_dto::{
    BlockReview, DashboardStats, Progress, QuestionReview, SessionOverview, SessionReview,
};
use crate::error::{Error, Result};
use crate::models::response::Response;
use crate::models::test_session::{SessionStatus, TestSession};
use crate::services::question_catalog::{self, TOTAL_POINTS, TOTAL_QUESTIONS};

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn SessionStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn list_sessions(
        &self,
        url_for: impl Fn(&str) -> String,
    ) -> Result<Vec<SessionOverview>> {
        let sessions = self.store.list_sessions().await?;
        let mut out = Vec::with_capacity(sessions.len());
        for session in sessions {
            let count = self.store.count_responses(session.id).await?;
            let url = url_for(&session.token);
            out.push(SessionOverview {
                status: session.status(),
                progress: progress(count),
                responses_count: count,
                url,
                session,
            });
        }
        Ok(out)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let sessions = self.store.list_sessions().await?;
        Ok(dashboard_stats(&sessions))
    }

    pub async fn review(&self, session_id: Uuid) -> Result<SessionReview> {
        let session = self
            .store
            .get_session(session_id)
            .await?
            .ok_or_else(|| Error::NotFound("Session not found".to_string()))?;
        let responses = self.store.list_responses(session_id).await?;
        Ok(build_review(session, responses))
    }
}

pub fn progress(answered: i64) -> Progress {
    let total = TOTAL_QUESTIONS as i64;
    let ratio = answered as f64 / total as f64;
    Progress {
        answered,
        total,
        ratio,
        percent: (ratio * 1000.0).round() / 10.0,
    }
}

pub fn dashboard_stats(sessions: &[TestSession]) -> DashboardStats {
    let mut stats = DashboardStats {
        total: sessions.len(),
        completed: 0,
        in_progress: 0,
        not_started: 0,
    };
    for s in sessions {
        match s.status() {
            SessionStatus::Completed => stats.completed += 1,
            SessionStatus::InProgress => stats.in_progress += 1,
            SessionStatus::NotStarted => stats.not_started += 1,
        }
    }
    stats
}

pub fn build_review(session: TestSession, responses: Vec<Response>) -> SessionReview {
    let answered = responses.len() as i64;
    let mut by_number: HashMap<i32, Response> = responses
        .into_iter()
        .map(|r| (r.question_number, r))
        .collect();

    let blocks = question_catalog::blocks()
        .iter()
        .map(|block| {
            let questions: Vec<QuestionReview> = question_catalog::questions_in_block(block.number)
                .map(|q| QuestionReview {
                    question: q,
                    level_label: format!("{} {}", q.level.stars(), q.level.label()),
                    max_recording_seconds: q.recording_limit_seconds(),
                    response: by_number.remove(&q.number),
                })
                .collect();
            BlockReview {
                block,
                answered: questions.iter().filter(|q| q.response.is_some()).count(),
                questions,
            }
        })
        .collect();

    SessionReview {
        status: session.status(),
        progress: progress(answered),
        total_points: TOTAL_POINTS,
        session,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(started: bool, completed: bool) -> TestSession {
        TestSession {
            id: Uuid::new_v4(),
            token: "t".into(),
            candidate_name: "n".into(),
            candidate_email: "e@example.com".into(),
            started_at: started.then(Utc::now),
            completed_at: completed.then(Utc::now),
            current_question: 1,
            created_at: Utc::now(),
        }
    }

    fn response(session_id: Uuid, n: i32) -> Response {
        Response {
            id: Uuid::new_v4(),
            session_id,
            question_number: n,
            video_url: None,
            text_response: Some("a".into()),
            duration_seconds: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_is_derived_from_timestamps() {
        assert_eq!(session(false, false).status(), SessionStatus::NotStarted);
        assert_eq!(session(true, false).status(), SessionStatus::InProgress);
        assert_eq!(session(true, true).status(), SessionStatus::Completed);
        assert_eq!(session(false, true).status(), SessionStatus::Completed);
    }

    #[test]
    fn progress_is_answered_over_total() {
        let p = progress(9);
        assert_eq!(p.total, 36);
        assert!((p.ratio - 0.25).abs() < f64::EPSILON);
        assert_eq!(p.percent, 25.0);
        assert_eq!(progress(36).percent, 100.0);
    }

    #[test]
    fn dashboard_counts_each_status() {
        let sessions = vec![
            session(false, false),
            session(true, false),
            session(true, false),
            session(true, true),
        ];
        let stats = dashboard_stats(&sessions);
        assert_eq!(
            stats,
            DashboardStats {
                total: 4,
                completed: 1,
                in_progress: 2,
                not_started: 1
            }
        );
    }

    #[test]
    fn review_places_responses_in_their_blocks() {
        let s = session(true, false);
        let id = s.id;
        let review = build_review(s, vec![response(id, 1), response(id, 2), response(id, 12)]);

        assert_eq!(review.blocks.len(), 6);
        assert_eq!(review.blocks[0].answered, 2);
        assert_eq!(review.blocks[2].answered, 1);
        assert_eq!(review.blocks[5].answered, 0);
        let q12 = &review.blocks[2].questions[0];
        assert_eq!(q12.question.number, 12);
        assert!(q12.response.is_some());
        assert_eq!(review.progress.answered, 3);
        assert_eq!(review.total_points, 121);
    }
}

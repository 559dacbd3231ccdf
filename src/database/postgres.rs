use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::SessionStore;
use crate::error::Result;
use crate::models::response::{Response, ResponseUpsert};
use crate::models::test_session::{NewSession, TestSession};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, new: NewSession) -> Result<TestSession> {
        let session = sqlx::query_as::<_, TestSession>(
            r#"
            INSERT INTO test_sessions (token, candidate_name, candidate_email)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new.token)
        .bind(new.candidate_name)
        .bind(new.candidate_email)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<TestSession>> {
        let session =
            sqlx::query_as::<_, TestSession>(r#"SELECT * FROM test_sessions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }

    async fn get_session_by_token(&self, token: &str) -> Result<Option<TestSession>> {
        let session =
            sqlx::query_as::<_, TestSession>(r#"SELECT * FROM test_sessions WHERE token = $1"#)
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<TestSession>> {
        let rows = sqlx::query_as::<_, TestSession>(
            r#"SELECT * FROM test_sessions ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_session(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM test_sessions WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_progress(&self, id: Uuid, question_number: i32) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE test_sessions
            SET started_at = COALESCE(started_at, NOW()),
                current_question = GREATEST(current_question, $2)
            WHERE id = $1 AND completed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(question_number)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid, final_question: i32) -> Result<Option<TestSession>> {
        let session = sqlx::query_as::<_, TestSession>(
            r#"
            UPDATE test_sessions
            SET completed_at = COALESCE(completed_at, NOW()),
                started_at = COALESCE(started_at, NOW()),
                current_question = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(final_question)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn upsert_response(&self, upsert: ResponseUpsert) -> Result<Response> {
        let response = match upsert {
            ResponseUpsert::Text {
                session_id,
                question_number,
                text_response,
            } => {
                sqlx::query_as::<_, Response>(
                    r#"
                    INSERT INTO responses (session_id, question_number, text_response)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (session_id, question_number)
                    DO UPDATE SET text_response = EXCLUDED.text_response, created_at = NOW()
                    RETURNING *
                    "#,
                )
                .bind(session_id)
                .bind(question_number)
                .bind(text_response)
                .fetch_one(&self.pool)
                .await?
            }
            ResponseUpsert::Video {
                session_id,
                question_number,
                video_url,
                duration_seconds,
            } => {
                sqlx::query_as::<_, Response>(
                    r#"
                    INSERT INTO responses (session_id, question_number, video_url, duration_seconds)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (session_id, question_number)
                    DO UPDATE SET video_url = EXCLUDED.video_url,
                                  duration_seconds = EXCLUDED.duration_seconds,
                                  created_at = NOW()
                    RETURNING *
                    "#,
                )
                .bind(session_id)
                .bind(question_number)
                .bind(video_url)
                .bind(duration_seconds)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(response)
    }

    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<Response>> {
        let rows = sqlx::query_as::<_, Response>(
            r#"SELECT * FROM responses WHERE session_id = $1 ORDER BY question_number"#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_responses(&self, session_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM responses WHERE session_id = $1"#)
                .bind(session_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

use serde::{Deserialize, Serialize};

/// Hard cap on a single recording, whatever the question allows.
pub const MAX_RECORDING_SECONDS: u32 = 120;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub number: i32,
    pub title: &'static str,
    #[serde(rename = "question")]
    pub prompt: &'static str,
    pub expected_answer: &'static str,
    pub level: Level,
    pub points: i32,
    pub format: AnswerFormat,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    pub block: i32,
}

impl Question {
    /// Recording stops on its own after `min(2 × duration, 120)` seconds.
    pub fn recording_limit_seconds(&self) -> u32 {
        (self.duration_seconds * 2).min(MAX_RECORDING_SECONDS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFormat {
    Video,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Easy = 1,
    Medium = 2,
    Hard = 3,
    Expert = 4,
}

impl Level {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Easy => "Facile",
            Level::Medium => "Moyen",
            Level::Hard => "Difficile",
            Level::Expert => "Expert",
        }
    }

    pub fn stars(self) -> String {
        "⭐".repeat(self.as_i32() as usize)
    }
}

impl Serialize for Level {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub number: i32,
    pub title: &'static str,
    pub questions: &'static [i32],
    pub max_points: i32,
}

/// Candidate-facing view: everything except the expected answer.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub number: i32,
    pub title: &'static str,
    pub question: &'static str,
    pub level: Level,
    pub level_label: String,
    pub points: i32,
    pub format: AnswerFormat,
    pub duration: u32,
    pub max_recording_seconds: u32,
    pub block: i32,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            number: q.number,
            title: q.title,
            question: q.prompt,
            level: q.level,
            level_label: format!("{} {}", q.level.stars(), q.level.label()),
            points: q.points,
            format: q.format,
            duration: q.duration_seconds,
            max_recording_seconds: q.recording_limit_seconds(),
            block: q.block,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Epoch seconds of the last bump; new comments move an article up.
    pub bump_time: i64,
}

impl Article {
    pub fn bumped_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.bump_time, 0)
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub bump_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArticleMedia {
    pub id: i64,
    pub article_id: i64,
    pub media_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub comment: String,
}

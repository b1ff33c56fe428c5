mod postgres;
mod schema;
mod sqlite;

use serde::Serialize;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::models::{Admin, Article, ArticleMedia, Comment};
use crate::seed::Seed;

pub use postgres::PostgresDatabase;
pub use schema::TABLES;
pub use sqlite::SqliteDatabase;

/// Full contents of the four tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub articles: Vec<Article>,
    pub media: Vec<ArticleMedia>,
    pub comments: Vec<Comment>,
    pub admins: Vec<Admin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub articles: usize,
    pub article_media: usize,
    pub comments: usize,
    pub admins: usize,
}

impl TableCounts {
    /// Counts keyed by table name, in drop order.
    pub fn by_table(&self) -> [(&'static str, usize); 4] {
        [
            ("article_media", self.article_media),
            ("comments", self.comments),
            ("articles", self.articles),
            ("admins", self.admins),
        ]
    }
}

impl Snapshot {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            articles: self.articles.len(),
            article_media: self.media.len(),
            comments: self.comments.len(),
            admins: self.admins.len(),
        }
    }
}

pub enum Database {
    Postgres(PostgresDatabase),
    Sqlite(SqliteDatabase),
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self> {
        match config.backend {
            Backend::Postgres => {
                let options = config.postgres.connect_options()?;
                Ok(Self::Postgres(PostgresDatabase::connect(&options).await?))
            }
            Backend::Sqlite => Ok(Self::Sqlite(SqliteDatabase::open(&config.sqlite.path).await?)),
        }
    }

    /// Destroys all rows in the four tables, recreates them and inserts `seed`.
    pub async fn reset(&mut self, seed: Seed) -> Result<()> {
        match self {
            Self::Postgres(db) => db.reset(seed).await,
            Self::Sqlite(db) => db.reset(seed).await,
        }
    }

    pub async fn snapshot(&mut self) -> Result<Snapshot> {
        match self {
            Self::Postgres(db) => db.snapshot().await,
            Self::Sqlite(db) => db.snapshot().await,
        }
    }

    pub async fn admin(&mut self, username: &str) -> Result<Option<Admin>> {
        match self {
            Self::Postgres(db) => db.admin(username).await,
            Self::Sqlite(db) => db.admin(username.to_string()).await,
        }
    }

    pub async fn close(self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.close().await,
            Self::Sqlite(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_table_follow_drop_order() {
        let counts = TableCounts {
            articles: 1,
            article_media: 2,
            comments: 3,
            admins: 4,
        };
        assert_eq!(
            counts.by_table(),
            [("article_media", 2), ("comments", 3), ("articles", 1), ("admins", 4)]
        );
    }

    #[test]
    fn counts_cover_every_table() {
        let counts = Snapshot::default().counts();
        let names = counts.by_table().map(|(table, _)| table);
        assert_eq!(names, TABLES);
    }
}

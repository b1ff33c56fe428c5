use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Admin, Article, ArticleMedia, Comment};
use crate::seed::Seed;

use super::schema::SQLITE_RESET;
use super::Snapshot;

pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    pub async fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).await?;
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        // Off by default in SQLite; cascades depend on it.
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    pub async fn reset(&self, seed: Seed) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute_batch(SQLITE_RESET)?;

                tx.execute(
                    "INSERT INTO admins (username, password_hash) VALUES (?1, ?2)",
                    params![seed.admin.username, seed.admin.password_hash],
                )?;
                tx.execute(
                    "INSERT INTO articles (title, body, bump_time) VALUES (?1, ?2, ?3)",
                    params![seed.article.title, seed.article.body, seed.article.bump_time],
                )?;
                let article_id = tx.last_insert_rowid();

                tx.execute(
                    "INSERT INTO article_media (article_id, media_path) VALUES (?1, ?2)",
                    params![article_id, seed.media_path],
                )?;
                tx.execute(
                    "INSERT INTO comments (article_id, comment) VALUES (?1, ?2)",
                    params![article_id, seed.comment],
                )?;

                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        let snapshot = self
            .conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, title, body, bump_time FROM articles ORDER BY id")?;
                let articles = stmt
                    .query_map([], article_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut stmt = conn
                    .prepare("SELECT id, article_id, media_path FROM article_media ORDER BY id")?;
                let media = stmt
                    .query_map([], media_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut stmt =
                    conn.prepare("SELECT id, article_id, comment FROM comments ORDER BY id")?;
                let comments = stmt
                    .query_map([], comment_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut stmt =
                    conn.prepare("SELECT username, password_hash FROM admins ORDER BY username")?;
                let admins = stmt
                    .query_map([], admin_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(Snapshot {
                    articles,
                    media,
                    comments,
                    admins,
                })
            })
            .await?;
        Ok(snapshot)
    }

    pub async fn admin(&self, username: String) -> Result<Option<Admin>> {
        let admin = self
            .conn
            .call(move |conn| {
                let admin = conn
                    .query_row(
                        "SELECT username, password_hash FROM admins WHERE username = ?1",
                        params![username],
                        admin_from_row,
                    )
                    .optional()?;
                Ok(admin)
            })
            .await?;
        Ok(admin)
    }
}

fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        bump_time: row.get(3)?,
    })
}

fn media_from_row(row: &Row) -> rusqlite::Result<ArticleMedia> {
    Ok(ArticleMedia {
        id: row.get(0)?,
        article_id: row.get(1)?,
        media_path: row.get(2)?,
    })
}

fn comment_from_row(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        article_id: row.get(1)?,
        comment: row.get(2)?,
    })
}

fn admin_from_row(row: &Row) -> rusqlite::Result<Admin> {
    Ok(Admin {
        username: row.get(0)?,
        password_hash: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;

    fn seed() -> Seed {
        Seed::prepare_at(&SeedConfig::default(), 1_700_000_000).unwrap()
    }

    #[tokio::test]
    async fn reset_on_empty_database_seeds_one_row_per_table() {
        let db = SqliteDatabase::open_in_memory().await.unwrap();
        db.reset(seed()).await.unwrap();

        let snapshot = db.snapshot().await.unwrap();
        assert_eq!(snapshot.articles.len(), 1);
        assert_eq!(snapshot.media.len(), 1);
        assert_eq!(snapshot.comments.len(), 1);
        assert_eq!(snapshot.admins.len(), 1);

        let article = &snapshot.articles[0];
        assert_eq!(article.bump_time, 1_700_000_000);
        assert_eq!(snapshot.media[0].article_id, article.id);
        assert_eq!(snapshot.comments[0].article_id, article.id);
    }

    #[tokio::test]
    async fn snapshot_before_reset_fails() {
        let db = SqliteDatabase::open_in_memory().await.unwrap();
        assert!(db.snapshot().await.is_err());
    }

    #[tokio::test]
    async fn admin_lookup() {
        let db = SqliteDatabase::open_in_memory().await.unwrap();
        db.reset(seed()).await.unwrap();

        let admin = db.admin("admin".to_string()).await.unwrap().unwrap();
        assert!(admin.password_hash.starts_with("$argon2id$"));
        assert!(db.admin("nobody".to_string()).await.unwrap().is_none());
    }

    #[test]
    fn reset_runs_outside_an_async_test() {
        tokio_test::block_on(async {
            let db = SqliteDatabase::open_in_memory().await.unwrap();
            db.reset(seed()).await.unwrap();
            db.reset(seed()).await.unwrap();
            assert_eq!(db.snapshot().await.unwrap().articles[0].id, 1);
        });
    }
}

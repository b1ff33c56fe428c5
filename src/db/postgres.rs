use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

use crate::error::Result;
use crate::models::{Admin, Article, ArticleMedia, Comment};
use crate::seed::Seed;

use super::schema::POSTGRES_RESET;
use super::Snapshot;

pub struct PostgresDatabase {
    conn: PgConnection,
}

impl PostgresDatabase {
    pub async fn connect(options: &PgConnectOptions) -> Result<Self> {
        let conn = PgConnection::connect_with(options).await?;
        Ok(Self { conn })
    }

    /// Drop, recreate and seed in one transaction; DDL is transactional in Postgres.
    pub async fn reset(&mut self, seed: Seed) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        sqlx::raw_sql(POSTGRES_RESET).execute(&mut *tx).await?;

        sqlx::query("INSERT INTO admins (username, password_hash) VALUES ($1, $2)")
            .bind(&seed.admin.username)
            .bind(&seed.admin.password_hash)
            .execute(&mut *tx)
            .await?;

        let article_id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (title, body, bump_time) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&seed.article.title)
        .bind(&seed.article.body)
        .bind(seed.article.bump_time)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO article_media (article_id, media_path) VALUES ($1, $2)")
            .bind(article_id)
            .bind(&seed.media_path)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO comments (article_id, comment) VALUES ($1, $2)")
            .bind(article_id)
            .bind(&seed.comment)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn snapshot(&mut self) -> Result<Snapshot> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT id, title, body, bump_time FROM articles ORDER BY id",
        )
        .fetch_all(&mut self.conn)
        .await?;

        let media = sqlx::query_as::<_, ArticleMedia>(
            "SELECT id, article_id, media_path FROM article_media ORDER BY id",
        )
        .fetch_all(&mut self.conn)
        .await?;

        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, article_id, comment FROM comments ORDER BY id",
        )
        .fetch_all(&mut self.conn)
        .await?;

        let admins = sqlx::query_as::<_, Admin>(
            "SELECT username, password_hash FROM admins ORDER BY username",
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(Snapshot {
            articles,
            media,
            comments,
            admins,
        })
    }

    pub async fn admin(&mut self, username: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut self.conn)
        .await?;
        Ok(admin)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

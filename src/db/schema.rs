/// Tables in the order they are dropped: children before parents.
pub const TABLES: [&str; 4] = ["article_media", "comments", "articles", "admins"];

pub const POSTGRES_RESET: &str = r#"
DROP TABLE IF EXISTS article_media CASCADE;
DROP TABLE IF EXISTS comments CASCADE;
DROP TABLE IF EXISTS articles CASCADE;
DROP TABLE IF EXISTS admins CASCADE;

-- articles table
CREATE TABLE articles (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    bump_time BIGINT NOT NULL
);

-- article_media table
CREATE TABLE article_media (
    id BIGSERIAL PRIMARY KEY,
    article_id BIGINT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    media_path TEXT NOT NULL
);

CREATE INDEX idx_article_media_article_id ON article_media(article_id);

-- comments table
CREATE TABLE comments (
    id BIGSERIAL PRIMARY KEY,
    article_id BIGINT NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    comment TEXT NOT NULL
);

CREATE INDEX idx_comments_article_id ON comments(article_id);

-- admins table
CREATE TABLE admins (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
);
"#;

/// SQLite has no DROP ... CASCADE; the drop order alone keeps foreign keys satisfied.
pub const SQLITE_RESET: &str = r#"
DROP TABLE IF EXISTS article_media;
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS articles;
DROP TABLE IF EXISTS admins;

-- articles table
CREATE TABLE articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    bump_time INTEGER NOT NULL
);

-- article_media table
CREATE TABLE article_media (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    media_path TEXT NOT NULL
);

CREATE INDEX idx_article_media_article_id ON article_media(article_id);

-- comments table
CREATE TABLE comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    comment TEXT NOT NULL
);

CREATE INDEX idx_comments_article_id ON comments(article_id);

-- admins table
CREATE TABLE admins (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
);
"#;

use chrono::Utc;

use crate::auth::hash_password;
use crate::config::SeedConfig;
use crate::error::Result;
use crate::models::{NewAdmin, NewArticle};

/// Rows inserted by a reset, ready to bind.
#[derive(Debug, Clone)]
pub struct Seed {
    pub admin: NewAdmin,
    pub article: NewArticle,
    pub media_path: String,
    pub comment: String,
}

impl Seed {
    /// Hashes the admin password and stamps the article with the current time.
    pub fn prepare(config: &SeedConfig) -> Result<Self> {
        Self::prepare_at(config, Utc::now().timestamp())
    }

    pub fn prepare_at(config: &SeedConfig, bump_time: i64) -> Result<Self> {
        if config.uses_default_password() {
            tracing::warn!(
                "Seeding admin {:?} with the default password; set RESET_ADMIN_PASSWORD to override",
                config.admin_username
            );
        }

        Ok(Self {
            admin: NewAdmin {
                username: config.admin_username.clone(),
                password_hash: hash_password(config.admin_password())?,
            },
            article: NewArticle {
                title: config.article_title.clone(),
                body: config.article_body.clone(),
                bump_time,
            },
            media_path: config.media_path.clone(),
            comment: config.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;

    #[test]
    fn prepare_hashes_password_and_stamps_now() {
        let before = Utc::now().timestamp();
        let seed = Seed::prepare(&SeedConfig::default()).unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(seed.admin.username, "admin");
        assert_ne!(seed.admin.password_hash, "changeme");
        assert!(verify_password("changeme", &seed.admin.password_hash).unwrap());
        assert!(seed.article.bump_time >= before && seed.article.bump_time <= after);
    }

    #[test]
    fn configured_values_flow_through() {
        let config = SeedConfig {
            admin_password: Some("hunter2".to_string()),
            article_title: "Custom".to_string(),
            ..SeedConfig::default()
        };
        let seed = Seed::prepare_at(&config, 42).unwrap();

        assert_eq!(seed.article.title, "Custom");
        assert_eq!(seed.article.bump_time, 42);
        assert!(verify_password("hunter2", &seed.admin.password_hash).unwrap());
    }
}

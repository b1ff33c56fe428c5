mod admin;
mod article;

pub use admin::{Admin, NewAdmin};
pub use article::{Article, ArticleMedia, Comment, NewArticle};

//! Database models - SQLx row types

mod article;
mod reaction;
mod user;

pub use article::{ArticleModel, ArticleRow};
pub use reaction::{ReactionModel, ReactionRow};
pub use user::UserModel;

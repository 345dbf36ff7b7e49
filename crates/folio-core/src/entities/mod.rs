//! Domain entities - core business objects

mod article;
mod reaction;
mod user;

pub use article::{Article, ArticlePatch, ARTICLE_SCHEMA};
pub use reaction::{Reaction, ReactionState, Transition, VoteOutcome, REACTION_SCHEMA};
pub use user::{User, UserPatch, DEFAULT_AVATAR, USER_SCHEMA};

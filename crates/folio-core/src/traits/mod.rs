//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ArticleRepository, Collection, ReactionRepository, RepoResult, UserRepository,
};

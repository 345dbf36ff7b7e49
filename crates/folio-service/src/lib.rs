//! # folio-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    paginate, ArticleService, AuthService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};

//! Like service
//!
//! The reaction toggle engine: one vote per (user, article), where voting the
//! same polarity twice retracts it and the opposite polarity flips it.

use folio_core::entities::{Reaction, ReactionState, Transition, VoteOutcome, REACTION_SCHEMA};
use folio_core::error::DomainError;
use folio_core::query::{
    Document, Envelope, Filter, PageRequest, Predicate, QueryDescriptor, Scalar, ScopeRules,
};
use folio_core::value_objects::{Actor, Polarity, RecordId};
use tracing::{debug, info, instrument, warn};

use crate::dto::{DataResponse, LikeResponse, UpdateLikeRequest, VoteRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::listing::{find_one, paginate, scoped_query};

/// Like service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Vote on an article from a request body
    pub async fn create(
        &self,
        actor: &Actor,
        request: VoteRequest,
    ) -> ServiceResult<DataResponse<Option<LikeResponse>>> {
        let article_id = RecordId::parse(&request.article).map_err(DomainError::from)?;
        let outcome = self
            .apply_vote(article_id, actor.id, request.quantity)
            .await?;

        Ok(DataResponse::new(
            outcome.message(),
            outcome.reaction().map(LikeResponse::from),
        ))
    }

    /// Apply one vote and report which transition happened
    #[instrument(skip(self))]
    pub async fn apply_vote(
        &self,
        article_id: RecordId,
        user_id: RecordId,
        quantity: i64,
    ) -> ServiceResult<VoteOutcome> {
        let polarity = Polarity::try_from(quantity)?;

        self.ctx
            .article_repo()
            .find_by_id(article_id)
            .await?
            .ok_or(DomainError::ArticleNotFound(article_id))?;

        let existing = self
            .ctx
            .reaction_repo()
            .find_by_pair(user_id, article_id)
            .await?;

        let before = ReactionState::from(existing.as_ref());
        let transition = before.transition(polarity);
        let outcome = match (transition, existing) {
            (Transition::Insert, _) => self.insert(user_id, article_id, polarity).await?,
            (Transition::Retract, Some(reaction)) => {
                if !self.ctx.reaction_repo().delete(reaction.id).await? {
                    debug!(
                        reaction_id = %reaction.id,
                        "Like already removed by a concurrent vote"
                    );
                }
                VoteOutcome::Removed
            }
            (Transition::Flip, Some(reaction)) => VoteOutcome::Updated(
                self.ctx
                    .reaction_repo()
                    .update_polarity(reaction.id, polarity)
                    .await?
                    .ok_or_else(|| ServiceError::conflict("Like was removed concurrently"))?,
            ),
            (Transition::Retract | Transition::Flip, None) => {
                return Err(ServiceError::internal("vote transition without a record"));
            }
        };

        info!(
            article_id = %article_id,
            user_id = %user_id,
            quantity = polarity.value(),
            from = ?before,
            to = ?outcome.state(),
            outcome = outcome.message(),
            "Vote applied"
        );
        Ok(outcome)
    }

    /// Insert a fresh record; losing the race to a concurrent insert becomes
    /// a single update of the record that won.
    async fn insert(
        &self,
        user_id: RecordId,
        article_id: RecordId,
        polarity: Polarity,
    ) -> ServiceResult<VoteOutcome> {
        let reaction = Reaction::new(user_id, article_id, polarity);
        match self.ctx.reaction_repo().insert(&reaction).await {
            Ok(()) => Ok(VoteOutcome::Created(reaction)),
            Err(DomainError::ReactionAlreadyExists) => {
                warn!(
                    article_id = %article_id,
                    user_id = %user_id,
                    "Concurrent vote, retrying as update"
                );
                let winner = self
                    .ctx
                    .reaction_repo()
                    .find_by_pair(user_id, article_id)
                    .await?
                    .ok_or_else(|| ServiceError::conflict("Like changed concurrently"))?;
                let updated = self
                    .ctx
                    .reaction_repo()
                    .update_polarity(winner.id, polarity)
                    .await?
                    .ok_or_else(|| ServiceError::conflict("Like changed concurrently"))?;
                Ok(VoteOutcome::Updated(updated))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List the caller's likes; always scoped to the caller
    #[instrument(skip(self, raw_query))]
    pub async fn list_for_actor(
        &self,
        actor_id: RecordId,
        raw_query: &str,
        page: PageRequest,
    ) -> ServiceResult<Envelope<Document>> {
        let scope = ScopeRules::for_collection(&REACTION_SCHEMA).owned_by("user", actor_id);
        let descriptor = scoped_query(raw_query, &scope);
        paginate(self.ctx.reaction_repo(), descriptor, page).await
    }

    /// The caller's like on one article, or `null`
    #[instrument(skip(self))]
    pub async fn find_by_article(
        &self,
        actor_id: RecordId,
        article_id: &str,
    ) -> ServiceResult<DataResponse<Option<Document>>> {
        let article_id = RecordId::parse(article_id).map_err(DomainError::from)?;

        let mut filter = Filter::new();
        filter.set("article", Predicate::Eq(Scalar::Id(article_id)));
        ScopeRules::for_collection(&REACTION_SCHEMA)
            .owned_by("user", actor_id)
            .apply(&mut filter);
        let descriptor = QueryDescriptor::with_filter(filter);

        let like = find_one(self.ctx.reaction_repo(), descriptor).await?;
        Ok(DataResponse::new("Like found", like))
    }

    /// Set the polarity of one of the caller's likes
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor_id: RecordId,
        id: &str,
        request: UpdateLikeRequest,
    ) -> ServiceResult<DataResponse<LikeResponse>> {
        let polarity = Polarity::try_from(request.quantity)?;
        let reaction = self.owned(actor_id, id).await?;

        let updated = self
            .ctx
            .reaction_repo()
            .update_polarity(reaction.id, polarity)
            .await?
            .ok_or(DomainError::ReactionNotFound(reaction.id))?;

        info!(like_id = %updated.id, quantity = polarity.value(), "Like updated");
        Ok(DataResponse::new(
            "Like updated successfully",
            LikeResponse::from(&updated),
        ))
    }

    /// Delete one of the caller's likes
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        actor_id: RecordId,
        id: &str,
    ) -> ServiceResult<DataResponse<Option<LikeResponse>>> {
        let reaction = self.owned(actor_id, id).await?;

        if !self.ctx.reaction_repo().delete(reaction.id).await? {
            return Err(DomainError::ReactionNotFound(reaction.id).into());
        }

        info!(like_id = %reaction.id, "Like removed");
        Ok(DataResponse::new("Like removed successfully", None))
    }

    /// Someone else's like is reported as missing
    async fn owned(&self, actor_id: RecordId, id: &str) -> ServiceResult<Reaction> {
        let id = RecordId::parse(id).map_err(DomainError::from)?;
        self.ctx
            .reaction_repo()
            .find_by_id(id)
            .await?
            .filter(|r| r.user_id == actor_id)
            .ok_or_else(|| DomainError::ReactionNotFound(id).into())
    }
}

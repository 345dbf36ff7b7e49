//! Paginated listing over any [`Collection`]

use folio_core::query::{
    build_query, Document, Envelope, PageMeta, PageRequest, QueryDescriptor, QueryWarning,
    ScopeRules,
};
use folio_core::traits::Collection;
use tracing::{debug, instrument, warn};

use super::error::ServiceResult;

/// Parse a raw query string under mandatory scope rules.
///
/// Dropped fragments are logged and never fail the request.
pub fn scoped_query(raw: &str, scope: &ScopeRules) -> QueryDescriptor {
    let built = build_query(raw, scope);
    report(scope.schema.name, &built.warnings);
    built.descriptor
}

fn report(collection: &str, warnings: &[QueryWarning]) {
    for warning in warnings {
        warn!(collection, %warning, "Ignored query fragment");
    }
}

/// Fetch one page of `collection`.
///
/// Issues exactly one count and one fetch with the same filter. When the
/// descriptor asks for no population the collection's default applies.
#[instrument(skip(collection, descriptor), fields(collection = collection.schema().name))]
pub async fn paginate<C>(
    collection: &C,
    mut descriptor: QueryDescriptor,
    page: PageRequest,
) -> ServiceResult<Envelope<Document>>
where
    C: Collection + ?Sized,
{
    if descriptor.population.is_empty() {
        descriptor.population = collection.schema().default_population();
    }

    let total = collection.count(&descriptor.filter).await?;
    let mut documents = collection
        .find_documents(&descriptor, page.offset(), page.limit())
        .await?;

    for document in &mut documents {
        descriptor.projection.apply(document);
    }

    debug!(total, returned = documents.len(), "Page fetched");
    Ok(Envelope::new(PageMeta::new(page, total), documents))
}

/// Fetch the first document matching `descriptor`, populated and projected
/// like a list entry.
#[instrument(skip(collection, descriptor), fields(collection = collection.schema().name))]
pub async fn find_one<C>(
    collection: &C,
    mut descriptor: QueryDescriptor,
) -> ServiceResult<Option<Document>>
where
    C: Collection + ?Sized,
{
    if descriptor.population.is_empty() {
        descriptor.population = collection.schema().default_population();
    }

    let mut documents = collection.find_documents(&descriptor, 0, 1).await?;
    Ok(documents.pop().map(|mut document| {
        descriptor.projection.apply(&mut document);
        document
    }))
}

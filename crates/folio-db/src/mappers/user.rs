//! User entity <-> model mapper

use folio_core::entities::User;
use folio_core::value_objects::RecordId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: RecordId::from(model.id),
            name: model.name,
            email: model.email,
            avatar: model.avatar,
            phone: model.phone,
            verified: model.verified,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

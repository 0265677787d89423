//! Password reset token database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ResetToken;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// SHA-256 hex digest of the issued secret
    #[sea_orm(unique)]
    pub token_digest: String,
    pub used: bool,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ResetToken {
    fn from(model: Model) -> Self {
        ResetToken {
            id: model.id,
            user_id: model.user_id,
            token_digest: model.token_digest,
            used: model.used,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}

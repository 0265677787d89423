//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Credential, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub document: String,
    pub issue_place: String,
    pub full_name: String,
    pub hire_date: Option<Date>,
    pub position_id: Option<i32>,
    pub unit_id: Option<i32>,
    pub appointment: String,
    #[sea_orm(unique)]
    pub username: String,
    /// Hash or legacy plaintext
    pub password: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id"
    )]
    Position,
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
    #[sea_orm(has_many = "super::password_reset_token::Entity")]
    PasswordResetToken,
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::password_reset_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PasswordResetToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity, classifying the stored credential
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            document: model.document,
            issue_place: model.issue_place,
            full_name: model.full_name,
            hire_date: model.hire_date,
            position_id: model.position_id,
            unit_id: model.unit_id,
            appointment: model.appointment,
            username: model.username,
            credential: Credential::parse(model.password),
            email: model.email,
        }
    }
}

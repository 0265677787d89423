//! Position database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Position;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "positions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub title: String,
    pub grade: String,
    pub competency: String,
    pub executive_level: bool,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Position {
    fn from(model: Model) -> Self {
        Position {
            id: model.id,
            name: model.name,
            title: model.title,
            grade: model.grade,
            competency: model.competency,
            executive_level: model.executive_level,
            status: model.status,
        }
    }
}

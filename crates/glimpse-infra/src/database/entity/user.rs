//! User entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(26))", unique)]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(100))", unique)]
    pub email: String,
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub phone: Option<String>,
    pub last_login: Option<DateTime>,
    pub is_active: bool,
    pub created_at: DateTime,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub profile_picture: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for glimpse_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            phone: model.phone,
            last_login: model.last_login,
            is_active: model.is_active,
            created_at: model.created_at,
            profile_picture: model.profile_picture,
        }
    }
}

//! Lead entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    /// Supplied by the import source.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub lead_name: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub email: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub source: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub interest_level: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub status: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub salesperson: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Lead.
impl From<Model> for glimpse_core::domain::Lead {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            lead_name: model.lead_name,
            email: model.email,
            source: model.source,
            interest_level: model.interest_level,
            status: model.status,
            salesperson: model.salesperson,
        }
    }
}

/// Conversion from Domain Lead to a fully set ActiveModel, as used by upserts.
impl From<glimpse_core::domain::Lead> for ActiveModel {
    fn from(lead: glimpse_core::domain::Lead) -> Self {
        Self {
            id: Set(lead.id),
            lead_name: Set(lead.lead_name),
            email: Set(lead.email),
            source: Set(lead.source),
            interest_level: Set(lead.interest_level),
            status: Set(lead.status),
            salesperson: Set(lead.salesperson),
        }
    }
}

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::plan;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "magazines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Plans,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Plans => Entity::has_many(plan::Entity).into(),
        }
    }
}

impl Related<plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new magazine. The unique key on title makes duplicate creation
/// an atomic conflict.
pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
) -> Result<Model, ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    let am = ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::from_insert("magazine title", e))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

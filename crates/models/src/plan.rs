use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::magazine;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub magazine_id: i32,
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Magazine,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Magazine => Entity::belongs_to(magazine::Entity)
                .from(Column::MagazineId)
                .to(magazine::Column::Id)
                .into(),
        }
    }
}

impl Related<magazine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Magazine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new plan. Price and discount must be non-negative; the caller
/// verifies the magazine exists.
pub async fn create(
    db: &DatabaseConnection,
    magazine_id: i32,
    name: &str,
    price: f64,
    discount: f64,
) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::Validation("price must be non-negative".into()));
    }
    if !discount.is_finite() || discount < 0.0 {
        return Err(ModelError::Validation("discount must be non-negative".into()));
    }
    let am = ActiveModel {
        magazine_id: Set(magazine_id),
        name: Set(name.to_string()),
        price: Set(price),
        discount: Set(discount),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

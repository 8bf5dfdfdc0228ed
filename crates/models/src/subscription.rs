use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{plan, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub plan_id: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Plan,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Plan => Entity::belongs_to(plan::Entity)
                .from(Column::PlanId)
                .to(plan::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new subscription. Referential checks against users and plans
/// happen in the service layer before this point.
pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    plan_id: i32,
    active: bool,
) -> Result<Model, ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(user_id),
        plan_id: Set(plan_id),
        active: Set(active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;

use crate::errors::ServiceError;
use models::{plan, subscription, user};

/// Fields a subscription update may carry; `None` leaves the column as-is,
/// so an explicit JSON null behaves the same as omitting the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionPatch {
    pub plan_id: Option<i32>,
    pub active: Option<bool>,
}

/// Create a subscription for an existing user on an existing plan.
pub async fn create_subscription(
    db: &DatabaseConnection,
    user_id: i32,
    plan_id: i32,
    active: bool,
) -> Result<subscription::Model, ServiceError> {
    if user::Entity::find_by_id(user_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::not_found("user"));
    }
    if plan::Entity::find_by_id(plan_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .is_none()
    {
        return Err(ServiceError::not_found("plan"));
    }
    let created = subscription::create(db, user_id, plan_id, active).await?;
    info!(subscription_id = created.id, user_id, plan_id, "subscription_created");
    Ok(created)
}

/// All subscriptions owned by the user. An empty result is reported as
/// not-found to preserve the existing wire contract.
pub async fn list_user_subscriptions(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<subscription::Model>, ServiceError> {
    let subs = subscription::list_for_user(db, user_id).await?;
    if subs.is_empty() {
        return Err(ServiceError::NotFound("no subscriptions found for this user".into()));
    }
    Ok(subs)
}

/// Partial update: only the fields present in the patch are written. A new
/// plan must exist before it is assigned.
pub async fn update_subscription(
    db: &DatabaseConnection,
    subscription_id: i32,
    patch: SubscriptionPatch,
) -> Result<subscription::Model, ServiceError> {
    let existing = subscription::Entity::find_by_id(subscription_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("subscription"))?;

    if let Some(plan_id) = patch.plan_id {
        if plan::Entity::find_by_id(plan_id)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .is_none()
        {
            return Err(ServiceError::not_found("plan"));
        }
    }

    let mut am: subscription::ActiveModel = existing.into();
    if let Some(plan_id) = patch.plan_id {
        am.plan_id = Set(plan_id);
    }
    if let Some(active) = patch.active {
        am.active = Set(active);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(subscription_id = updated.id, "subscription_updated");
    Ok(updated)
}

/// Delete a subscription on behalf of the resolved caller. Only the owner
/// may delete; anyone else gets a forbidden error and the row stays.
pub async fn delete_subscription(
    db: &DatabaseConnection,
    subscription_id: i32,
    caller_user_id: i32,
) -> Result<(), ServiceError> {
    let existing = subscription::Entity::find_by_id(subscription_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("subscription"))?;

    if existing.user_id != caller_user_id {
        return Err(ServiceError::Forbidden(
            "you do not have permission to delete this subscription".into(),
        ));
    }

    subscription::Entity::delete_by_id(subscription_id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(subscription_id, user_id = caller_user_id, "subscription_deleted");
    Ok(())
}

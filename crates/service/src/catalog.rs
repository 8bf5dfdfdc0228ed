use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;

use crate::errors::ServiceError;
use models::{magazine, plan};

/// Create a magazine; a duplicate title surfaces as a conflict from the store.
pub async fn create_magazine(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
) -> Result<magazine::Model, ServiceError> {
    let created = magazine::create(db, title, description).await?;
    info!(magazine_id = created.id, title = %created.title, "magazine_created");
    Ok(created)
}

/// All magazines, unfiltered and unpaginated.
pub async fn list_magazines(db: &DatabaseConnection) -> Result<Vec<magazine::Model>, ServiceError> {
    Ok(magazine::list_all(db).await?)
}

/// Create a plan under an existing magazine.
pub async fn create_plan(
    db: &DatabaseConnection,
    magazine_id: i32,
    name: &str,
    price: f64,
    discount: f64,
) -> Result<plan::Model, ServiceError> {
    let exists = magazine::Entity::find_by_id(magazine_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if exists.is_none() {
        return Err(ServiceError::not_found("magazine"));
    }
    let created = plan::create(db, magazine_id, name, price, discount).await?;
    info!(plan_id = created.id, magazine_id, "plan_created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::errors::ModelError;

    #[tokio::test]
    async fn magazine_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        assert!(list_magazines(&db).await?.is_empty());

        let m = create_magazine(&db, "Tech Monthly", "Latest in tech").await?;
        assert_eq!(m.title, "Tech Monthly");

        let listed = list_magazines(&db).await?;
        assert_eq!(listed.len(), 1);

        let err = create_magazine(&db, "Tech Monthly", "Different description")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn plan_requires_existing_magazine() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let err = create_plan(&db, 42, "Monthly", 10.0, 0.0).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let m = create_magazine(&db, "Science Weekly", "All of science").await?;
        let p = create_plan(&db, m.id, "Monthly", 10.0, 0.0).await?;
        assert_eq!(p.magazine_id, m.id);

        let err = create_plan(&db, m.id, "Monthly", -10.0, 0.0).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::Validation(_))));
        Ok(())
    }
}

use sea_orm::{DatabaseConnection, EntityTrait};

use crate::auth::domain::AuthUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::errors::ModelError;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_auth_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, username: u.username, email: u.email }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_auth_user))
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthUser, AuthError> {
        match models::user::create(&self.db, username, email, password_hash).await {
            Ok(u) => Ok(to_auth_user(u)),
            Err(ModelError::Conflict(_)) => Err(AuthError::Conflict),
            Err(ModelError::Validation(msg)) => Err(AuthError::Validation(msg)),
            Err(e) => Err(AuthError::Repository(e.to_string())),
        }
    }

    async fn get_password_hash(&self, user_id: i32) -> Result<Option<String>, AuthError> {
        let res = models::user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| u.password_hash))
    }

    async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
        models::user::set_password_hash(&self.db, user_id, password_hash)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(())
    }
}

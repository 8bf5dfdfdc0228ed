use async_trait::async_trait;

use super::domain::AuthUser;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    /// Insert a new user; a taken username or email is a conflict. The
    /// implementation must make the insert itself the uniqueness check.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn get_password_hash(&self, user_id: i32) -> Result<Option<String>, AuthError>;
    async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: username
        hashes: Mutex<HashMap<i32, String>>,     // key: user id
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn create_user(
            &self,
            username: &str,
            email: &str,
            password_hash: &str,
        ) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username)
                || users.values().any(|u| u.email == email)
            {
                return Err(AuthError::Conflict);
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let user = AuthUser {
                id: *next_id,
                username: username.to_string(),
                email: email.to_string(),
            };
            users.insert(username.to_string(), user.clone());
            self.hashes.lock().unwrap().insert(user.id, password_hash.to_string());
            Ok(user)
        }

        async fn get_password_hash(&self, user_id: i32) -> Result<Option<String>, AuthError> {
            let hashes = self.hashes.lock().unwrap();
            Ok(hashes.get(&user_id).cloned())
        }

        async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<(), AuthError> {
            self.hashes.lock().unwrap().insert(user_id, password_hash);
            Ok(())
        }
    }
}

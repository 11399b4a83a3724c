use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, SessionStore, User,
    password::{hash_password, verify_password},
    users,
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a new user.
    pub async fn register(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(EngineError::Validation(
                "username must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if find_user(&db_tx, username).await?.is_some() {
                return Err(EngineError::UsernameTaken(username.to_string()));
            }
            let active = users::ActiveModel {
                id: ActiveValue::NotSet,
                username: ActiveValue::Set(username.to_string()),
                password_hash: ActiveValue::Set(hash_password(password)?),
            };
            let model = active.insert(&db_tx).await?;
            tracing::info!(user_id = model.id, "user registered");
            Ok(User::from(model))
        })
    }

    /// Check credentials and remember the user in `sessions`.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`EngineError::InvalidCredentials`].
    pub async fn login(
        &self,
        sessions: &dyn SessionStore,
        username: &str,
        password: &str,
    ) -> ResultEngine<User> {
        let username = username.trim();
        let model = find_user(&self.database, username)
            .await?
            .filter(|model| verify_password(password, &model.password_hash));
        let Some(model) = model else {
            tracing::warn!(username, "failed login");
            return Err(EngineError::InvalidCredentials);
        };

        sessions.save(&model.username)?;
        tracing::info!(user_id = model.id, "user logged in");
        Ok(User::from(model))
    }

    /// Forget the current user. Returns `false` if nobody was logged in.
    pub async fn logout(&self, sessions: &dyn SessionStore) -> ResultEngine<bool> {
        sessions.clear()
    }

    /// Resolve the user stored in `sessions`.
    ///
    /// A marker naming a user that no longer exists resolves to `None`.
    pub async fn current_user(&self, sessions: &dyn SessionStore) -> ResultEngine<Option<User>> {
        let Some(username) = sessions.load()? else {
            return Ok(None);
        };
        Ok(find_user(&self.database, &username).await?.map(User::from))
    }
}

async fn find_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> ResultEngine<Option<users::Model>> {
    Ok(users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await?)
}

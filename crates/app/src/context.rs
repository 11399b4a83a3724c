use engine::{Engine, SessionStore, User};

use crate::error::{AppError, Result};

/// Everything a command handler needs: the engine, where the current user
/// is remembered, and whether mutations are gated on it.
pub struct Context {
    pub engine: Engine,
    pub sessions: Box<dyn SessionStore>,
    pub require_login: bool,
}

impl Context {
    pub fn new(engine: Engine, sessions: Box<dyn SessionStore>, require_login: bool) -> Self {
        Self {
            engine,
            sessions,
            require_login,
        }
    }

    /// Fail with [`AppError::LoginRequired`] unless somebody is logged in.
    /// Always passes when login is not required.
    pub async fn require_user(&self) -> Result<Option<User>> {
        if !self.require_login {
            return Ok(None);
        }
        match self.engine.current_user(self.sessions.as_ref()).await? {
            Some(user) => {
                tracing::debug!("authorized as {}", user.username);
                Ok(Some(user))
            }
            None => Err(AppError::LoginRequired),
        }
    }
}

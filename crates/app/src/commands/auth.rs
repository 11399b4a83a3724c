use crate::{context::Context, error::Result, prompt};

pub async fn register(ctx: &Context, username: &str) -> Result<String> {
    let password = prompt::new_password()?;
    let user = ctx.engine.register(username, &password).await?;
    Ok(format!("Registered user {}.", user.username))
}

pub async fn login(ctx: &Context, username: &str) -> Result<String> {
    let password = prompt::password("Password: ")?;
    let user = ctx
        .engine
        .login(ctx.sessions.as_ref(), username, &password)
        .await?;
    Ok(format!("Logged in as {}.", user.username))
}

pub async fn logout(ctx: &Context) -> Result<String> {
    if ctx.engine.logout(ctx.sessions.as_ref()).await? {
        Ok("Logged out.".to_string())
    } else {
        Ok("Nobody is logged in.".to_string())
    }
}

pub async fn whoami(ctx: &Context) -> Result<String> {
    match ctx.engine.current_user(ctx.sessions.as_ref()).await? {
        Some(user) => Ok(format!("Logged in as {}.", user.username)),
        None => Ok("Not logged in.".to_string()),
    }
}

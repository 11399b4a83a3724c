//! Command handlers. Each returns the text to print on success.

use engine::EngineError;

use crate::{
    cli::{Command, Confirm},
    context::Context,
    error::Result,
    prompt,
};

mod auth;
mod campaign;
mod donation;
mod donor;
mod report;

pub async fn run(ctx: &Context, command: Command) -> Result<String> {
    match command {
        Command::Donor { command } => donor::run(ctx, command).await,
        Command::Campaign { command } => campaign::run(ctx, command).await,
        Command::Donation { command } => donation::run(ctx, command).await,
        Command::Report { command } => report::run(ctx, command).await,
        Command::Register(args) => auth::register(ctx, &args.username).await,
        Command::Login(args) => auth::login(ctx, &args.username).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Whoami => auth::whoami(ctx).await,
    }
}

/// `true` when the user skipped the prompt or, after reading `warning`,
/// answered yes.
fn confirmed(confirm: &Confirm, warning: &str) -> Result<bool> {
    if confirm.yes {
        return Ok(true);
    }
    prompt::confirm(&format!("{warning}\nAre you sure?"))
}

fn deleted(label: &str, id: i32, existed: bool) -> Result<String> {
    if existed {
        Ok(format!("Deleted {label} {id}."))
    } else {
        Err(EngineError::NotFound(format!("{label} {id}")).into())
    }
}

const ABORTED: &str = "Aborted.";

use engine::{DonorFilter, DonorUpdate, NewDonor};

use super::{ABORTED, confirmed, deleted};
use crate::{cli::DonorCommand, context::Context, error::Result, render};

pub async fn run(ctx: &Context, command: DonorCommand) -> Result<String> {
    match command {
        DonorCommand::Add { name, email } => {
            let donor = ctx.engine.create_donor(&NewDonor::new(&name, &email)?).await?;
            Ok(format!("Added donor {}", render::donor_line(&donor)))
        }
        DonorCommand::List => {
            let donors = ctx.engine.donors(&DonorFilter::default()).await?;
            Ok(render::lines(&donors, "No donors found.", render::donor_line))
        }
        DonorCommand::Search { name, email } => {
            let donors = ctx.engine.donors(&DonorFilter { name, email }).await?;
            Ok(render::lines(&donors, "No donors found.", render::donor_line))
        }
        DonorCommand::View { id } => {
            let view = ctx.engine.donor_with_donations(id).await?;
            Ok(format!(
                "{}\nDonations:\n{}",
                render::donor_line(&view.donor),
                render::lines(&view.donations, "No donations found.", render::donation_line)
            ))
        }
        DonorCommand::Update { id, name, email } => {
            ctx.require_user().await?;
            let update = DonorUpdate::new(name.as_deref(), email.as_deref())?;
            let donor = ctx.engine.update_donor(id, &update).await?;
            Ok(format!("Updated donor {}", render::donor_line(&donor)))
        }
        DonorCommand::Delete { id, confirm } => {
            ctx.require_user().await?;
            let donor = ctx.engine.donor(id).await?;
            let warning = format!(
                "You are about to delete donor: {} - {} and ALL their donations.",
                donor.id, donor.name
            );
            if !confirmed(&confirm, &warning)? {
                return Ok(ABORTED.to_string());
            }
            deleted("donor", id, ctx.engine.delete_donor(id).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::EngineError;

    use super::*;
    use crate::{cli::Confirm, context::tests::context, error::AppError};

    #[tokio::test]
    async fn add_then_search() {
        let ctx = context(false).await;

        let added = run(
            &ctx,
            DonorCommand::Add {
                name: "  Jane Doe  ".to_string(),
                email: "Jane@Example.COM".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(added, "Added donor 1: Jane Doe <jane@example.com>");

        let found = run(
            &ctx,
            DonorCommand::Search {
                name: None,
                email: Some("EXAMPLE".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(found, "1: Jane Doe <jane@example.com>");
    }

    #[tokio::test]
    async fn empty_list() {
        let ctx = context(false).await;

        assert_eq!(
            run(&ctx, DonorCommand::List).await.unwrap(),
            "No donors found."
        );
    }

    #[tokio::test]
    async fn update_requires_login() {
        let ctx = context(true).await;

        let err = run(
            &ctx,
            DonorCommand::Update {
                id: 1,
                name: Some("Ada".to_string()),
                email: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::LoginRequired));
    }

    #[tokio::test]
    async fn delete_missing_fails_before_prompting() {
        let ctx = context(false).await;

        for yes in [true, false] {
            let err = run(
                &ctx,
                DonorCommand::Delete {
                    id: 9,
                    confirm: Confirm { yes },
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(
                err,
                AppError::Engine(EngineError::NotFound(ref what)) if what == "donor 9"
            ));
        }
    }

    #[tokio::test]
    async fn delete_with_yes_removes_donor() {
        let ctx = context(false).await;
        let ada = ctx
            .engine
            .create_donor(&NewDonor::new("Ada", "ada@x.com").unwrap())
            .await
            .unwrap();

        let out = run(
            &ctx,
            DonorCommand::Delete {
                id: ada.id,
                confirm: Confirm { yes: true },
            },
        )
        .await
        .unwrap();

        assert_eq!(out, format!("Deleted donor {}.", ada.id));
        assert!(ctx.engine.donor(ada.id).await.is_err());
    }
}

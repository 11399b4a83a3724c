use engine::{DonationUpdate, MoneyCents, NewDonation};

use super::deleted;
use crate::{cli::DonationCommand, context::Context, error::Result, render};

pub async fn run(ctx: &Context, command: DonationCommand) -> Result<String> {
    match command {
        DonationCommand::Add {
            amount,
            donor_id,
            campaign_id,
        } => {
            let amount: MoneyCents = amount.parse()?;
            let input = NewDonation::new(amount, donor_id, campaign_id)?;
            let donation = ctx.engine.create_donation(&input).await?;
            Ok(format!("Added donation {}", render::donation_line(&donation)))
        }
        DonationCommand::List => {
            let donations = ctx.engine.donations().await?;
            Ok(render::lines(
                &donations,
                "No donations found.",
                render::donation_line,
            ))
        }
        DonationCommand::View { id } => {
            let donation = ctx.engine.donation(id).await?;
            Ok(render::donation_line(&donation))
        }
        DonationCommand::Update {
            id,
            amount,
            donor_id,
            campaign_id,
            no_campaign,
        } => {
            ctx.require_user().await?;
            let amount = amount
                .as_deref()
                .map(str::parse::<MoneyCents>)
                .transpose()?;
            let campaign_id = if no_campaign {
                Some(None)
            } else {
                campaign_id.map(Some)
            };
            let update = DonationUpdate::new(amount, donor_id, campaign_id)?;
            let donation = ctx.engine.update_donation(id, &update).await?;
            Ok(format!("Updated donation {}", render::donation_line(&donation)))
        }
        DonationCommand::Delete { id } => {
            ctx.require_user().await?;
            deleted("donation", id, ctx.engine.delete_donation(id).await?)
        }
        DonationCommand::ByDonor { donor_id } => {
            let donations = ctx.engine.donations_for_donor(donor_id).await?;
            Ok(render::lines(
                &donations,
                "No donations found.",
                render::donation_line,
            ))
        }
        DonationCommand::ByCampaign { campaign_id } => {
            let donations = ctx.engine.donations_for_campaign(campaign_id).await?;
            Ok(render::lines(
                &donations,
                "No donations found.",
                render::donation_line,
            ))
        }
    }
}

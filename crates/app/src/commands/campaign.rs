use engine::{CampaignFilter, CampaignUpdate, NewCampaign};

use super::{ABORTED, confirmed, deleted};
use crate::{cli::CampaignCommand, context::Context, error::Result, render};

pub async fn run(ctx: &Context, command: CampaignCommand) -> Result<String> {
    match command {
        CampaignCommand::Add { title, description } => {
            let input = NewCampaign::new(&title, description.as_deref())?;
            let campaign = ctx.engine.create_campaign(&input).await?;
            Ok(format!("Added campaign {}", render::campaign_line(&campaign)))
        }
        CampaignCommand::List { search } => {
            let campaigns = ctx.engine.campaigns(&CampaignFilter { text: search }).await?;
            Ok(render::lines(
                &campaigns,
                "No campaigns found.",
                render::campaign_line,
            ))
        }
        CampaignCommand::View { id } => {
            let view = ctx.engine.campaign_with_donations(id).await?;
            Ok(format!(
                "{}\nDonations:\n{}",
                render::campaign_line(&view.campaign),
                render::lines(&view.donations, "No donations found.", render::donation_line)
            ))
        }
        CampaignCommand::Update {
            id,
            title,
            description,
            clear_description,
        } => {
            ctx.require_user().await?;
            let description = if clear_description {
                Some(None)
            } else {
                description.as_deref().map(Some)
            };
            let update = CampaignUpdate::new(title.as_deref(), description)?;
            let campaign = ctx.engine.update_campaign(id, &update).await?;
            Ok(format!("Updated campaign {}", render::campaign_line(&campaign)))
        }
        CampaignCommand::Delete { id, confirm } => {
            ctx.require_user().await?;
            let campaign = ctx.engine.campaign(id).await?;
            let warning = format!(
                "You are about to delete campaign: {} - {} and ALL its donations.",
                campaign.id, campaign.title
            );
            if !confirmed(&confirm, &warning)? {
                return Ok(ABORTED.to_string());
            }
            deleted("campaign", id, ctx.engine.delete_campaign(id).await?)
        }
    }
}

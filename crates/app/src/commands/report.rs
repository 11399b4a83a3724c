use crate::{cli::ReportCommand, context::Context, error::Result, render};

pub async fn run(ctx: &Context, command: ReportCommand) -> Result<String> {
    match command {
        ReportCommand::Total => Ok(render::total_line(ctx.engine.total_donations().await?)),
        ReportCommand::ByDonor => {
            let groups = ctx.engine.donations_by_donor().await?;
            Ok(grouped("Donations by donor:", &groups))
        }
        ReportCommand::ByCampaign => {
            let groups = ctx.engine.donations_by_campaign().await?;
            Ok(grouped("Donations by campaign:", &groups))
        }
    }
}

fn grouped(header: &str, groups: &[(String, engine::MoneyCents)]) -> String {
    if groups.is_empty() {
        return "No donations found.".to_string();
    }
    let body = render::lines(groups, "", |(label, total)| {
        render::group_line(label, *total)
    });
    format!("{header}\n{body}")
}

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "donors")]
#[command(about = "Track donors, campaigns and donations")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage donors.
    Donor {
        #[command(subcommand)]
        command: DonorCommand,
    },
    /// Manage campaigns.
    Campaign {
        #[command(subcommand)]
        command: CampaignCommand,
    },
    /// Manage donations.
    Donation {
        #[command(subcommand)]
        command: DonationCommand,
    },
    /// Aggregate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Create a new user (password is prompted twice).
    Register(Credentials),
    /// Log in as an existing user.
    Login(Credentials),
    /// Forget the current user.
    Logout,
    /// Print the current user.
    Whoami,
}

#[derive(Args, Debug)]
pub struct Credentials {
    #[arg(long)]
    pub username: String,
}

#[derive(Args, Debug)]
pub struct Confirm {
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum DonorCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    List,
    /// Case-insensitive substring search.
    #[command(group(ArgGroup::new("field").required(true).multiple(true).args(["name", "email"])))]
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Show a donor with its donations.
    View { id: i32 },
    Update {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a donor and all its donations.
    Delete {
        id: i32,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand, Debug)]
pub enum CampaignCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    List {
        /// Case-insensitive match on title or description.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a campaign with its donations.
    View { id: i32 },
    Update {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete a campaign and all its donations.
    Delete {
        id: i32,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Subcommand, Debug)]
pub enum DonationCommand {
    Add {
        /// Amount, e.g. `25` or `25.50`.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        donor_id: i32,
        #[arg(long)]
        campaign_id: Option<i32>,
    },
    List,
    View {
        id: i32,
    },
    Update {
        id: i32,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(long)]
        donor_id: Option<i32>,
        #[arg(long, conflicts_with = "no_campaign")]
        campaign_id: Option<i32>,
        /// Detach the donation from its campaign.
        #[arg(long)]
        no_campaign: bool,
    },
    Delete {
        id: i32,
    },
    /// List donations of a donor.
    ByDonor { donor_id: i32 },
    /// List donations of a campaign.
    ByCampaign { campaign_id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Sum of every donation.
    Total,
    /// Totals grouped by donor.
    ByDonor,
    /// Totals grouped by campaign.
    ByCampaign,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_amount_reaches_validation() {
        let cli = Cli::try_parse_from([
            "donors", "donation", "add", "--amount", "-5", "--donor-id", "1",
        ])
        .unwrap();

        match cli.command {
            Command::Donation {
                command: DonationCommand::Add { amount, .. },
            } => assert_eq!(amount, "-5"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_needs_a_field() {
        assert!(Cli::try_parse_from(["donors", "donor", "search"]).is_err());
        assert!(Cli::try_parse_from(["donors", "donor", "search", "--email", "x.com"]).is_ok());
    }

    #[test]
    fn description_flags_conflict() {
        assert!(
            Cli::try_parse_from([
                "donors",
                "campaign",
                "update",
                "1",
                "--description",
                "x",
                "--clear-description",
            ])
            .is_err()
        );
    }

    #[test]
    fn delete_accepts_yes() {
        let cli = Cli::try_parse_from(["donors", "donor", "delete", "3", "--yes"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Donor {
                command: DonorCommand::Delete {
                    id: 3,
                    confirm: Confirm { yes: true },
                },
            }
        ));
    }
}

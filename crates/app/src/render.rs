//! Plain-text formatting of engine values.

use engine::{Campaign, Donation, Donor, MoneyCents};

pub fn donor_line(donor: &Donor) -> String {
    format!("{}: {} <{}>", donor.id, donor.name, donor.email)
}

pub fn campaign_line(campaign: &Campaign) -> String {
    format!(
        "{}: {} - {}",
        campaign.id,
        campaign.title,
        campaign.description.as_deref().unwrap_or("(no description)")
    )
}

pub fn donation_line(donation: &Donation) -> String {
    let campaign = donation
        .campaign_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    format!(
        "{}: {} -> donor {} campaign {} at {}",
        donation.id,
        donation.amount,
        donation.donor_id,
        campaign,
        donation.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub fn total_line(total: MoneyCents) -> String {
    format!("Total donations: {total}")
}

pub fn group_line(label: &str, total: MoneyCents) -> String {
    format!(" - {label}: {total}")
}

/// Render `items` one per line, or `empty` when there are none.
pub fn lines<T>(items: &[T], empty: &str, line: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}

//! The module contains `Donation`, its validated inputs and its table.
//!
//! A donation always belongs to a donor and optionally to a campaign. It is
//! removed together with either parent.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine};

/// A single monetary contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donation {
    pub id: i32,
    pub amount: MoneyCents,
    pub timestamp: DateTime<Utc>,
    pub donor_id: i32,
    pub campaign_id: Option<i32>,
}

fn ensure_positive(amount: MoneyCents) -> ResultEngine<MoneyCents> {
    if !amount.is_positive() {
        return Err(EngineError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}

/// Validated input for a new donation.
///
/// Referential checks (donor and campaign existence) need the database and
/// happen in [`Engine::create_donation`](crate::Engine::create_donation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDonation {
    amount: MoneyCents,
    donor_id: i32,
    campaign_id: Option<i32>,
    timestamp: DateTime<Utc>,
}

impl NewDonation {
    /// Builds a donation stamped with the current UTC time.
    pub fn new(amount: MoneyCents, donor_id: i32, campaign_id: Option<i32>) -> ResultEngine<Self> {
        Ok(Self {
            amount: ensure_positive(amount)?,
            donor_id,
            campaign_id,
            timestamp: Utc::now(),
        })
    }

    /// Overrides the creation time (imports, tests).
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn amount(&self) -> MoneyCents {
        self.amount
    }

    pub fn donor_id(&self) -> i32 {
        self.donor_id
    }

    pub fn campaign_id(&self) -> Option<i32> {
        self.campaign_id
    }
}

/// Partial update of a donation.
///
/// `campaign_id` is doubly optional: `Some(None)` detaches the donation from
/// its campaign.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonationUpdate {
    amount: Option<MoneyCents>,
    donor_id: Option<i32>,
    campaign_id: Option<Option<i32>>,
}

impl DonationUpdate {
    pub fn new(
        amount: Option<MoneyCents>,
        donor_id: Option<i32>,
        campaign_id: Option<Option<i32>>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            amount: amount.map(ensure_positive).transpose()?,
            donor_id,
            campaign_id,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.donor_id.is_none() && self.campaign_id.is_none()
    }

    pub fn amount(&self) -> Option<MoneyCents> {
        self.amount
    }

    pub fn donor_id(&self) -> Option<i32> {
        self.donor_id
    }

    pub fn campaign_id(&self) -> Option<Option<i32>> {
        self.campaign_id
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount: i64,
    pub timestamp: DateTimeUtc,
    pub donor_id: i32,
    pub campaign_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donors::Entity",
        from = "Column::DonorId",
        to = "super::donors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Donors,
    #[sea_orm(
        belongs_to = "super::campaigns::Entity",
        from = "Column::CampaignId",
        to = "super::campaigns::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Campaigns,
}

impl Related<super::donors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donors.def()
    }
}

impl Related<super::campaigns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaigns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Donation {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            amount: MoneyCents::new(value.amount),
            timestamp: value.timestamp,
            donor_id: value.donor_id,
            campaign_id: value.campaign_id,
        }
    }
}

impl From<&NewDonation> for ActiveModel {
    fn from(value: &NewDonation) -> Self {
        Self {
            id: ActiveValue::NotSet,
            amount: ActiveValue::Set(value.amount.cents()),
            timestamp: ActiveValue::Set(value.timestamp),
            donor_id: ActiveValue::Set(value.donor_id),
            campaign_id: ActiveValue::Set(value.campaign_id),
        }
    }
}

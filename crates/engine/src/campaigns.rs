//! The module contains `Campaign`, its validated inputs and its table.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    Donation, ResultEngine,
    util::{normalize_optional_text, normalize_required_text, search_key},
};

/// A named fundraising effort donations can be attributed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Campaign {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

/// A campaign together with the donations attributed to it, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignWithDonations {
    pub campaign: Campaign,
    pub donations: Vec<Donation>,
}

/// Validated input for a new campaign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCampaign {
    title: String,
    description: Option<String>,
}

impl NewCampaign {
    pub fn new(title: &str, description: Option<&str>) -> ResultEngine<Self> {
        Ok(Self {
            title: normalize_required_text(title, "campaign title")?,
            description: normalize_optional_text(description),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Partial update of a campaign.
///
/// `description` is doubly optional: `None` keeps the stored value,
/// `Some(None)` clears it, `Some(Some(text))` replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignUpdate {
    title: Option<String>,
    description: Option<Option<String>>,
}

impl CampaignUpdate {
    pub fn new(title: Option<&str>, description: Option<Option<&str>>) -> ResultEngine<Self> {
        Ok(Self {
            title: title
                .map(|value| normalize_required_text(value, "campaign title"))
                .transpose()?,
            description: description.map(normalize_optional_text),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }
}

/// Search criteria for campaigns: case-insensitive substring on title or
/// description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignFilter {
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub title_key: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Campaign {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
        }
    }
}

impl From<&NewCampaign> for ActiveModel {
    fn from(value: &NewCampaign) -> Self {
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(value.title.clone()),
            title_key: ActiveValue::Set(search_key(&value.title)),
            description: ActiveValue::Set(value.description.clone()),
            description_key: ActiveValue::Set(value.description.as_deref().map(search_key)),
        }
    }
}

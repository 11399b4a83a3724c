//! The module contains `Donor`, its validated inputs and its table.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    Donation, ResultEngine,
    util::{normalize_email, normalize_required_text, search_key},
};

/// A person or organization giving money.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donor {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A donor together with every donation they made, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct DonorWithDonations {
    pub donor: Donor,
    pub donations: Vec<Donation>,
}

/// Validated input for a new donor.
///
/// The name is trimmed, the email is trimmed and lowercased. Once built the
/// values are always valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDonor {
    name: String,
    email: String,
}

impl NewDonor {
    pub fn new(name: &str, email: &str) -> ResultEngine<Self> {
        Ok(Self {
            name: normalize_required_text(name, "donor name")?,
            email: normalize_email(email)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Partial update of a donor: `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonorUpdate {
    name: Option<String>,
    email: Option<String>,
}

impl DonorUpdate {
    pub fn new(name: Option<&str>, email: Option<&str>) -> ResultEngine<Self> {
        Ok(Self {
            name: name
                .map(|value| normalize_required_text(value, "donor name"))
                .transpose()?,
            email: email.map(normalize_email).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Search criteria for donors. Every supplied field is a case-insensitive
/// substring match; fields are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonorFilter {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl DonorFilter {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "donors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub name_key: String,
    #[sea_orm(unique)]
    pub email: String,
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

impl From<Model> for Donor {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

impl From<&NewDonor> for ActiveModel {
    fn from(value: &NewDonor) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name.clone()),
            name_key: ActiveValue::Set(search_key(&value.name)),
            email: ActiveValue::Set(value.email.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn new_donor_normalizes_fields() {
        let donor = NewDonor::new("  Jane Doe  ", "Jane@Example.COM").unwrap();

        assert_eq!(donor.name(), "Jane Doe");
        assert_eq!(donor.email(), "jane@example.com");
    }

    #[test]
    fn new_donor_rejects_blank_name() {
        assert_eq!(
            NewDonor::new(" ", "ada@x.com"),
            Err(EngineError::Validation(
                "donor name must not be empty".to_string()
            ))
        );
    }

    #[test]
    fn new_donor_rejects_email_without_at() {
        assert!(matches!(
            NewDonor::new("Ada", "ada.x.com"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn update_only_carries_supplied_fields() {
        let update = DonorUpdate::new(None, Some("NEW@X.COM")).unwrap();

        assert_eq!(update.name(), None);
        assert_eq!(update.email(), Some("new@x.com"));
        assert!(DonorUpdate::new(None, None).unwrap().is_empty());
    }

    #[test]
    fn update_rejects_supplied_blank_name() {
        assert!(DonorUpdate::new(Some(""), None).is_err());
    }
}

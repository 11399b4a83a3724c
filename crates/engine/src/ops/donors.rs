use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Donation, Donor, DonorFilter, DonorUpdate, DonorWithDonations, EngineError, NewDonor,
    ResultEngine, donations, donors,
    util::search_key,
};

use super::{Engine, contains_folded, non_blank, not_found, with_tx};

impl Engine {
    /// Create a donor.
    ///
    /// Fails with [`EngineError::Uniqueness`] if the name or the email is
    /// already used; nothing is written in that case.
    pub async fn create_donor(&self, input: &NewDonor) -> ResultEngine<Donor> {
        with_tx!(self, |db_tx| {
            ensure_donor_unique(&db_tx, Some(input.name()), Some(input.email()), None).await?;
            let model = donors::ActiveModel::from(input).insert(&db_tx).await?;
            tracing::info!(donor_id = model.id, "donor created");
            Ok(Donor::from(model))
        })
    }

    /// Return a donor by id.
    pub async fn donor(&self, id: i32) -> ResultEngine<Donor> {
        donors::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Donor::from)
            .ok_or_else(|| not_found("donor", id))
    }

    /// List donors ordered by name, optionally narrowed by `filter`.
    pub async fn donors(&self, filter: &DonorFilter) -> ResultEngine<Vec<Donor>> {
        let mut query = donors::Entity::find();
        if let Some(name) = non_blank(filter.name.as_deref()) {
            query = query.filter(contains_folded(donors::Column::NameKey, name));
        }
        if let Some(email) = non_blank(filter.email.as_deref()) {
            query = query.filter(contains_folded(donors::Column::Email, email));
        }

        let models = query
            .order_by_asc(donors::Column::Name)
            .order_by_asc(donors::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Donor::from).collect())
    }

    /// Return a donor with all of their donations, newest first.
    pub async fn donor_with_donations(&self, id: i32) -> ResultEngine<DonorWithDonations> {
        let donor = self.donor(id).await?;
        let donations = self.donations_for_donor(id).await?;
        Ok(DonorWithDonations { donor, donations })
    }

    /// Apply the supplied fields of `update` to a donor.
    pub async fn update_donor(&self, id: i32, update: &DonorUpdate) -> ResultEngine<Donor> {
        with_tx!(self, |db_tx| {
            let model = donors::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found("donor", id))?;
            if update.is_empty() {
                return Ok(Donor::from(model));
            }

            ensure_donor_unique(&db_tx, update.name(), update.email(), Some(id)).await?;

            let mut active: donors::ActiveModel = model.into();
            if let Some(name) = update.name() {
                active.name = ActiveValue::Set(name.to_string());
                active.name_key = ActiveValue::Set(search_key(name));
            }
            if let Some(email) = update.email() {
                active.email = ActiveValue::Set(email.to_string());
            }
            let model = active.update(&db_tx).await?;
            tracing::info!(donor_id = id, "donor updated");
            Ok(Donor::from(model))
        })
    }

    /// Delete a donor and every donation they made.
    ///
    /// Returns `false` if the donor did not exist.
    pub async fn delete_donor(&self, id: i32) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            if donors::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Ok(false);
            }
            let removed = donations::Entity::delete_many()
                .filter(donations::Column::DonorId.eq(id))
                .exec(&db_tx)
                .await?;
            donors::Entity::delete_by_id(id).exec(&db_tx).await?;
            tracing::info!(
                donor_id = id,
                donations = removed.rows_affected,
                "donor deleted"
            );
            Ok(true)
        })
    }

    /// List the donations of a donor, newest first.
    pub async fn donations_for_donor(&self, donor_id: i32) -> ResultEngine<Vec<Donation>> {
        if donors::Entity::find_by_id(donor_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(not_found("donor", donor_id));
        }
        let models = donations::Entity::find()
            .filter(donations::Column::DonorId.eq(donor_id))
            .order_by_desc(donations::Column::Timestamp)
            .order_by_desc(donations::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Donation::from).collect())
    }
}

/// Reject `name`/`email` values already held by another donor.
async fn ensure_donor_unique<C: ConnectionTrait>(
    db: &C,
    name: Option<&str>,
    email: Option<&str>,
    exclude: Option<i32>,
) -> ResultEngine<()> {
    let checks = [
        (donors::Column::Name, name),
        (donors::Column::Email, email),
    ];
    for (column, value) in checks {
        let Some(value) = value else {
            continue;
        };
        let mut query = donors::Entity::find().filter(column.eq(value));
        if let Some(id) = exclude {
            query = query.filter(donors::Column::Id.ne(id));
        }
        if query.one(db).await?.is_some() {
            return Err(EngineError::Uniqueness(value.to_string()));
        }
    }
    Ok(())
}

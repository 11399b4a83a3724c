use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Donation, DonationUpdate, EngineError, NewDonation, ResultEngine, campaigns, donations, donors,
};

use super::{Engine, not_found, with_tx};

impl Engine {
    /// Record a donation.
    ///
    /// The donor must exist and, when given, so must the campaign; otherwise
    /// [`EngineError::Referential`] is returned and nothing is written.
    pub async fn create_donation(&self, input: &NewDonation) -> ResultEngine<Donation> {
        with_tx!(self, |db_tx| {
            ensure_references(&db_tx, input.donor_id(), input.campaign_id()).await?;
            let model = donations::ActiveModel::from(input).insert(&db_tx).await?;
            tracing::info!(
                donation_id = model.id,
                donor_id = model.donor_id,
                campaign_id = ?model.campaign_id,
                amount = model.amount,
                "donation created"
            );
            Ok(Donation::from(model))
        })
    }

    /// Return a donation by id.
    pub async fn donation(&self, id: i32) -> ResultEngine<Donation> {
        donations::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Donation::from)
            .ok_or_else(|| not_found("donation", id))
    }

    /// List every donation, newest first.
    pub async fn donations(&self) -> ResultEngine<Vec<Donation>> {
        let models = donations::Entity::find()
            .order_by_desc(donations::Column::Timestamp)
            .order_by_desc(donations::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Donation::from).collect())
    }

    /// Apply the supplied fields of `update` to a donation.
    ///
    /// A changed donor or campaign must exist, exactly as on creation.
    pub async fn update_donation(
        &self,
        id: i32,
        update: &DonationUpdate,
    ) -> ResultEngine<Donation> {
        with_tx!(self, |db_tx| {
            let model = donations::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found("donation", id))?;
            if update.is_empty() {
                return Ok(Donation::from(model));
            }

            let donor_id = update.donor_id().unwrap_or(model.donor_id);
            let campaign_id = update.campaign_id().unwrap_or(model.campaign_id);
            ensure_references(&db_tx, donor_id, campaign_id).await?;

            let mut active: donations::ActiveModel = model.into();
            if let Some(amount) = update.amount() {
                active.amount = ActiveValue::Set(amount.cents());
            }
            active.donor_id = ActiveValue::Set(donor_id);
            active.campaign_id = ActiveValue::Set(campaign_id);
            let model = active.update(&db_tx).await?;
            tracing::info!(donation_id = id, "donation updated");
            Ok(Donation::from(model))
        })
    }

    /// Delete a single donation. Returns `false` if it did not exist.
    pub async fn delete_donation(&self, id: i32) -> ResultEngine<bool> {
        let result = donations::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(donation_id = id, "donation deleted");
        }
        Ok(deleted)
    }
}

/// Check that a donation's parents exist.
async fn ensure_references<C: ConnectionTrait>(
    db: &C,
    donor_id: i32,
    campaign_id: Option<i32>,
) -> ResultEngine<()> {
    if donors::Entity::find_by_id(donor_id).one(db).await?.is_none() {
        return Err(EngineError::Referential(format!("no donor with id={donor_id}")));
    }
    if let Some(campaign_id) = campaign_id
        && campaigns::Entity::find_by_id(campaign_id)
            .one(db)
            .await?
            .is_none()
    {
        return Err(EngineError::Referential(format!(
            "no campaign with id={campaign_id}"
        )));
    }
    Ok(())
}

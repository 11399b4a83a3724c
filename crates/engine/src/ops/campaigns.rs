use sea_orm::{ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Campaign, CampaignFilter, CampaignUpdate, CampaignWithDonations, Donation, EngineError,
    NewCampaign, ResultEngine, campaigns, donations,
    util::search_key,
};

use super::{Engine, contains_folded, non_blank, not_found, with_tx};

impl Engine {
    /// Create a campaign. Titles are unique.
    pub async fn create_campaign(&self, input: &NewCampaign) -> ResultEngine<Campaign> {
        with_tx!(self, |db_tx| {
            ensure_title_unique(&db_tx, input.title(), None).await?;
            let model = campaigns::ActiveModel::from(input).insert(&db_tx).await?;
            tracing::info!(campaign_id = model.id, "campaign created");
            Ok(Campaign::from(model))
        })
    }

    /// Return a campaign by id.
    pub async fn campaign(&self, id: i32) -> ResultEngine<Campaign> {
        campaigns::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Campaign::from)
            .ok_or_else(|| not_found("campaign", id))
    }

    /// List campaigns ordered by title, optionally narrowed by `filter`.
    pub async fn campaigns(&self, filter: &CampaignFilter) -> ResultEngine<Vec<Campaign>> {
        let mut query = campaigns::Entity::find();
        if let Some(text) = non_blank(filter.text.as_deref()) {
            query = query.filter(
                Condition::any()
                    .add(contains_folded(campaigns::Column::TitleKey, text))
                    .add(contains_folded(campaigns::Column::DescriptionKey, text)),
            );
        }

        let models = query
            .order_by_asc(campaigns::Column::Title)
            .order_by_asc(campaigns::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Campaign::from).collect())
    }

    /// Return a campaign with the donations attributed to it, newest first.
    pub async fn campaign_with_donations(&self, id: i32) -> ResultEngine<CampaignWithDonations> {
        let campaign = self.campaign(id).await?;
        let donations = self.donations_for_campaign(id).await?;
        Ok(CampaignWithDonations {
            campaign,
            donations,
        })
    }

    /// Apply the supplied fields of `update` to a campaign.
    pub async fn update_campaign(
        &self,
        id: i32,
        update: &CampaignUpdate,
    ) -> ResultEngine<Campaign> {
        with_tx!(self, |db_tx| {
            let model = campaigns::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found("campaign", id))?;
            if update.is_empty() {
                return Ok(Campaign::from(model));
            }

            let mut active: campaigns::ActiveModel = model.into();
            if let Some(title) = update.title() {
                ensure_title_unique(&db_tx, title, Some(id)).await?;
                active.title = ActiveValue::Set(title.to_string());
                active.title_key = ActiveValue::Set(search_key(title));
            }
            if let Some(description) = update.description() {
                active.description = ActiveValue::Set(description.map(ToString::to_string));
                active.description_key = ActiveValue::Set(description.map(search_key));
            }
            let model = active.update(&db_tx).await?;
            tracing::info!(campaign_id = id, "campaign updated");
            Ok(Campaign::from(model))
        })
    }

    /// Delete a campaign and every donation attributed to it.
    ///
    /// Returns `false` if the campaign did not exist.
    pub async fn delete_campaign(&self, id: i32) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            if campaigns::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Ok(false);
            }
            let removed = donations::Entity::delete_many()
                .filter(donations::Column::CampaignId.eq(id))
                .exec(&db_tx)
                .await?;
            campaigns::Entity::delete_by_id(id).exec(&db_tx).await?;
            tracing::info!(
                campaign_id = id,
                donations = removed.rows_affected,
                "campaign deleted"
            );
            Ok(true)
        })
    }

    /// List the donations attributed to a campaign, newest first.
    pub async fn donations_for_campaign(&self, campaign_id: i32) -> ResultEngine<Vec<Donation>> {
        if campaigns::Entity::find_by_id(campaign_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(not_found("campaign", campaign_id));
        }
        let models = donations::Entity::find()
            .filter(donations::Column::CampaignId.eq(campaign_id))
            .order_by_desc(donations::Column::Timestamp)
            .order_by_desc(donations::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Donation::from).collect())
    }
}

async fn ensure_title_unique<C: ConnectionTrait>(
    db: &C,
    title: &str,
    exclude: Option<i32>,
) -> ResultEngine<()> {
    let mut query = campaigns::Entity::find().filter(campaigns::Column::Title.eq(title));
    if let Some(id) = exclude {
        query = query.filter(campaigns::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(EngineError::Uniqueness(title.to_string()));
    }
    Ok(())
}

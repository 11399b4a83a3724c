use sea_orm::{ConnectionTrait, Statement};

use crate::{MoneyCents, ResultEngine};

use super::Engine;

impl Engine {
    /// Sum of every donation. Zero when there are none.
    pub async fn total_donations(&self) -> ResultEngine<MoneyCents> {
        let stmt = Statement::from_string(
            self.database.get_database_backend(),
            "SELECT COALESCE(SUM(amount), 0) AS sum FROM donations;".to_string(),
        );
        let row = self.database.query_one(stmt).await?;
        let total: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);
        Ok(MoneyCents::new(total))
    }

    /// Donation sums per donor name, ordered by name.
    ///
    /// Donors without donations are not listed.
    pub async fn donations_by_donor(&self) -> ResultEngine<Vec<(String, MoneyCents)>> {
        self.grouped_totals(
            "SELECT d.name AS label, SUM(n.amount) AS sum \
             FROM donors d \
             JOIN donations n ON n.donor_id = d.id \
             GROUP BY d.id, d.name \
             ORDER BY d.name ASC;",
        )
        .await
    }

    /// Donation sums per campaign title, ordered by title.
    ///
    /// Campaigns without donations, and donations without a campaign, are
    /// not listed.
    pub async fn donations_by_campaign(&self) -> ResultEngine<Vec<(String, MoneyCents)>> {
        self.grouped_totals(
            "SELECT c.title AS label, SUM(n.amount) AS sum \
             FROM campaigns c \
             JOIN donations n ON n.campaign_id = c.id \
             GROUP BY c.id, c.title \
             ORDER BY c.title ASC;",
        )
        .await
    }

    async fn grouped_totals(&self, sql: &str) -> ResultEngine<Vec<(String, MoneyCents)>> {
        let stmt = Statement::from_string(self.database.get_database_backend(), sql.to_string());
        let rows = self.database.query_all(stmt).await?;

        let mut totals = Vec::with_capacity(rows.len());
        for row in rows {
            let label: String = row.try_get("", "label")?;
            let sum: i64 = row.try_get("", "sum")?;
            totals.push((label, MoneyCents::new(sum)));
        }
        Ok(totals)
    }
}

#![allow(dead_code)]

use sea_orm::{Database, DatabaseConnection};

use engine::{
    Campaign, Donation, Donor, Engine, MoneyCents, NewCampaign, NewDonation, NewDonor,
};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn donor(engine: &Engine, name: &str, email: &str) -> Donor {
    engine
        .create_donor(&NewDonor::new(name, email).unwrap())
        .await
        .unwrap()
}

pub async fn campaign(engine: &Engine, title: &str, description: Option<&str>) -> Campaign {
    engine
        .create_campaign(&NewCampaign::new(title, description).unwrap())
        .await
        .unwrap()
}

pub async fn donation(
    engine: &Engine,
    cents: i64,
    donor_id: i32,
    campaign_id: Option<i32>,
) -> Donation {
    engine
        .create_donation(&NewDonation::new(MoneyCents::new(cents), donor_id, campaign_id).unwrap())
        .await
        .unwrap()
}

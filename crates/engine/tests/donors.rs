mod common;

use common::{campaign, donation, donor, engine_with_db};
use engine::{DonorFilter, DonorUpdate, EngineError, NewDonor};

#[tokio::test]
async fn create_trims_name_and_lowercases_email() {
    let (engine, _db) = engine_with_db().await;

    let created = donor(&engine, "  Jane Doe  ", "Jane@Example.COM").await;
    let fetched = engine.donor(created.id).await.unwrap();

    assert_eq!(fetched.name, "Jane Doe");
    assert_eq!(fetched.email, "jane@example.com");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_writing() {
    let (engine, _db) = engine_with_db().await;
    donor(&engine, "Ada", "ada@x.com").await;

    let err = engine
        .create_donor(&NewDonor::new("Grace", "ADA@x.com").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::Uniqueness("ada@x.com".to_string()));
    let all = engine.donors(&DonorFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_writing() {
    let (engine, _db) = engine_with_db().await;
    donor(&engine, "Ada", "ada@x.com").await;

    let err = engine
        .create_donor(&NewDonor::new(" Ada ", "other@x.com").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::Uniqueness("Ada".to_string()));
    assert_eq!(
        engine.donors(&DonorFilter::default()).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn missing_donor_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.donor(42).await.unwrap_err(),
        EngineError::NotFound("donor 42".to_string())
    );
}

#[tokio::test]
async fn list_is_ordered_by_name_and_search_is_case_insensitive() {
    let (engine, _db) = engine_with_db().await;
    donor(&engine, "Grace Hopper", "grace@navy.mil").await;
    donor(&engine, "Ada Lovelace", "ada@x.com").await;
    donor(&engine, "Alan Turing", "alan@x.com").await;

    let names: Vec<String> = engine
        .donors(&DonorFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Ada Lovelace", "Alan Turing", "Grace Hopper"]);

    let found = engine.donors(&DonorFilter::by_name("LOVE")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ada Lovelace");

    let by_email = engine
        .donors(&DonorFilter {
            name: Some("a".to_string()),
            email: Some("@x.com".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(by_email.len(), 2);

    let none = engine.donors(&DonorFilter::by_name("100%")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let (engine, _db) = engine_with_db().await;
    donor(&engine, "Émile Zola", "emile@x.com").await;
    donor(&engine, "Ada", "ada@x.com").await;

    for needle in ["Émile", "émile", "ÉMILE", "E\u{301}mile"] {
        let found = engine.donors(&DonorFilter::by_name(needle)).await.unwrap();
        assert_eq!(found.len(), 1, "{needle}");
        assert_eq!(found[0].name, "Émile Zola");
    }
}

#[tokio::test]
async fn search_follows_renamed_donor() {
    let (engine, _db) = engine_with_db().await;
    let ada = donor(&engine, "Ada", "ada@x.com").await;

    engine
        .update_donor(ada.id, &DonorUpdate::new(Some("Øystein"), None).unwrap())
        .await
        .unwrap();

    assert!(engine.donors(&DonorFilter::by_name("ada")).await.unwrap().is_empty());
    let found = engine.donors(&DonorFilter::by_name("øyst")).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (engine, _db) = engine_with_db().await;
    let ada = donor(&engine, "Ada", "ada@x.com").await;

    let updated = engine
        .update_donor(ada.id, &DonorUpdate::new(None, Some(" ADA@NEW.ORG ")).unwrap())
        .await
        .unwrap();

    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.email, "ada@new.org");

    let unchanged = engine
        .update_donor(ada.id, &DonorUpdate::default())
        .await
        .unwrap();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn update_checks_uniqueness_against_other_donors() {
    let (engine, _db) = engine_with_db().await;
    let ada = donor(&engine, "Ada", "ada@x.com").await;
    donor(&engine, "Grace", "grace@x.com").await;

    // Re-submitting its own values is fine.
    engine
        .update_donor(ada.id, &DonorUpdate::new(Some("Ada"), Some("ada@x.com")).unwrap())
        .await
        .unwrap();

    let err = engine
        .update_donor(ada.id, &DonorUpdate::new(Some("Grace"), None).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Uniqueness("Grace".to_string()));
    assert_eq!(engine.donor(ada.id).await.unwrap().name, "Ada");
}

#[tokio::test]
async fn update_missing_donor_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .update_donor(7, &DonorUpdate::new(Some("Ghost"), None).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("donor 7".to_string()));
}

#[tokio::test]
async fn delete_cascades_to_donations() {
    let (engine, _db) = engine_with_db().await;
    let ada = donor(&engine, "Ada", "ada@x.com").await;
    let grace = donor(&engine, "Grace", "grace@x.com").await;
    let gala = campaign(&engine, "Gala", None).await;
    donation(&engine, 100_00, ada.id, Some(gala.id)).await;
    donation(&engine, 20_00, ada.id, None).await;
    donation(&engine, 30_00, ada.id, None).await;
    let kept = donation(&engine, 5_00, grace.id, Some(gala.id)).await;

    assert!(engine.delete_donor(ada.id).await.unwrap());

    assert!(matches!(
        engine.donor(ada.id).await,
        Err(EngineError::NotFound(_))
    ));
    assert_eq!(engine.donations().await.unwrap(), vec![kept]);
    let by_donor = engine.donations_by_donor().await.unwrap();
    assert!(by_donor.iter().all(|(name, _)| name != "Ada"));
    // The campaign itself survives.
    assert_eq!(engine.campaign(gala.id).await.unwrap(), gala);
}

#[tokio::test]
async fn delete_missing_donor_returns_false() {
    let (engine, _db) = engine_with_db().await;

    assert!(!engine.delete_donor(1).await.unwrap());
}

#[tokio::test]
async fn donor_with_donations_lists_newest_first() {
    let (engine, _db) = engine_with_db().await;
    let ada = donor(&engine, "Ada", "ada@x.com").await;
    let first = donation(&engine, 10_00, ada.id, None).await;
    let second = donation(&engine, 20_00, ada.id, None).await;

    let view = engine.donor_with_donations(ada.id).await.unwrap();

    assert_eq!(view.donor, ada);
    let ids: Vec<i32> = view.donations.iter().map(|d| d.id).collect();
    assert_eq!(ids, [second.id, first.id]);
}

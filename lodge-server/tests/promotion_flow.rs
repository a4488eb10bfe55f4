//! Promotion engine integration tests
//!
//! Runs the full create → evaluate → verify → redeem flow against an
//! in-memory datastore.

use lodge_server::db::models::{AnnouncementCreate, DiscountType, PromoScope, PromotionCreate};
use lodge_server::db::repository::{AnnouncementRepository, PromotionRepository, RepoError};
use lodge_server::{CodeVerification, Config, PromotionEngine, RedeemOutcome, ServerState};

async fn test_state() -> ServerState {
    ServerState::in_memory(Config::default())
        .await
        .expect("in-memory state")
}

fn base_create(name: &str) -> PromotionCreate {
    PromotionCreate {
        name: name.to_string(),
        discount_type: None,
        value: 20.0,
        scope: None,
        target_room: None,
        target_service: None,
        code: None,
        starts_at: 1_000,
        ends_at: 2_000,
        minimum_amount: None,
        max_redemptions: None,
        max_redemptions_per_customer: None,
        terms: None,
        created_by: None,
    }
}

#[tokio::test]
async fn test_create_applies_defaults_and_normalizes_code() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());

    let mut data = base_create("Summer Special");
    data.code = Some("summer20".to_string());
    let promo = repo.create(data).await.expect("create");

    assert_eq!(promo.discount_type, DiscountType::Percentage);
    assert_eq!(promo.scope, PromoScope::All);
    assert!(promo.is_active);
    assert_eq!(promo.redemption_count, 0);
    assert_eq!(promo.max_redemptions_per_customer, 1);
    assert_eq!(promo.code.as_deref(), Some("SUMMER20"));
}

#[tokio::test]
async fn test_duplicate_code_rejected_case_insensitively() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());

    let mut first = base_create("First");
    first.code = Some("WEEKEND".to_string());
    repo.create(first).await.expect("create first");

    let mut second = base_create("Second");
    second.code = Some("weekend".to_string());
    match repo.create(second).await {
        Err(RepoError::Duplicate(_)) => {}
        other => panic!("expected Duplicate, got {:?}", other.map(|p| p.name)),
    }
}

#[tokio::test]
async fn test_window_and_target_validation() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());

    let mut inverted = base_create("Inverted");
    inverted.starts_at = 2_000;
    inverted.ends_at = 1_000;
    assert!(matches!(
        repo.create(inverted).await,
        Err(RepoError::Validation(_))
    ));

    // A room target is meaningless on an ALL-scoped promotion
    let mut mismatched = base_create("Mismatched");
    mismatched.target_room = Some("room:deluxe".to_string());
    assert!(matches!(
        repo.create(mismatched).await,
        Err(RepoError::Validation(_))
    ));
}

#[tokio::test]
async fn test_find_active_filters_and_orders_by_value() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());
    let engine = PromotionEngine::new(state.get_db());

    let mut small = base_create("Small");
    small.value = 10.0;
    repo.create(small).await.expect("create");

    let mut large = base_create("Large");
    large.value = 30.0;
    repo.create(large).await.expect("create");

    let mut outside = base_create("Outside Window");
    outside.value = 90.0;
    outside.starts_at = 5_000;
    outside.ends_at = 6_000;
    repo.create(outside).await.expect("create");

    let mut room_only = base_create("Rooms Only");
    room_only.value = 15.0;
    room_only.scope = Some(PromoScope::Room);
    repo.create(room_only).await.expect("create");

    // Window is inclusive on both ends
    for now in [1_000, 1_500, 2_000] {
        let active = engine.find_active(None, now).await.expect("find_active");
        assert_eq!(active.len(), 3, "at t={now}");
        // Largest raw value first
        assert_eq!(active[0].name, "Large");
        assert_eq!(active[1].name, "Small");
    }
    assert!(engine.find_active(None, 999).await.expect("ok").is_empty());
    assert!(engine.find_active(None, 2_001).await.expect("ok").is_empty());

    // Scoped request matches that scope plus ALL-scoped promotions
    let rooms = engine
        .find_active(Some(PromoScope::Room), 1_500)
        .await
        .expect("find_active");
    assert_eq!(rooms.len(), 3);
    let events = engine
        .find_active(Some(PromoScope::Event), 1_500)
        .await
        .expect("find_active");
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn test_verify_code_round_trips_any_casing() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());
    let engine = PromotionEngine::new(state.get_db());

    let mut data = base_create("Summer");
    data.code = Some("summer20".to_string());
    let created = repo.create(data).await.expect("create");

    for entered in ["Summer20", "SUMMER20", "summer20"] {
        match engine.verify_code(entered, None, 1_500).await.expect("ok") {
            CodeVerification::Valid(promo) => assert_eq!(promo.id, created.id),
            other => panic!("expected Valid for {entered}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_verify_code_rejections() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());
    let engine = PromotionEngine::new(state.get_db());

    let mut room_promo = base_create("Rooms Only");
    room_promo.scope = Some(PromoScope::Room);
    room_promo.code = Some("ROOMS".to_string());
    repo.create(room_promo).await.expect("create");

    let mut capped = base_create("Capped");
    capped.code = Some("CAPPED".to_string());
    capped.max_redemptions = Some(1);
    let capped = repo.create(capped).await.expect("create");

    // Unknown code
    assert!(matches!(
        engine.verify_code("NOPE", None, 1_500).await.expect("ok"),
        CodeVerification::NotFound
    ));

    // Outside the window
    assert!(matches!(
        engine.verify_code("ROOMS", None, 2_500).await.expect("ok"),
        CodeVerification::ExpiredOrInactive
    ));

    // Scope mismatch reads as expired/inactive, not as exhausted
    assert!(matches!(
        engine
            .verify_code("ROOMS", Some(PromoScope::Service), 1_500)
            .await
            .expect("ok"),
        CodeVerification::ExpiredOrInactive
    ));
    assert!(matches!(
        engine
            .verify_code("ROOMS", Some(PromoScope::Room), 1_500)
            .await
            .expect("ok"),
        CodeVerification::Valid(_)
    ));

    // Exhausted cap is reported distinctly
    match engine.redeem(&capped.id_string()).await.expect("ok") {
        RedeemOutcome::Redeemed { new_count } => assert_eq!(new_count, 1),
        other => panic!("expected Redeemed, got {other:?}"),
    }
    assert!(matches!(
        engine.verify_code("CAPPED", None, 1_500).await.expect("ok"),
        CodeVerification::Exhausted
    ));
}

#[tokio::test]
async fn test_redeem_enforces_cap() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());
    let engine = PromotionEngine::new(state.get_db());

    let mut data = base_create("Limited");
    data.max_redemptions = Some(2);
    let promo = repo.create(data).await.expect("create");
    let id = promo.id_string();

    assert!(matches!(
        engine.redeem(&id).await.expect("ok"),
        RedeemOutcome::Redeemed { new_count: 1 }
    ));
    assert!(matches!(
        engine.redeem(&id).await.expect("ok"),
        RedeemOutcome::Redeemed { new_count: 2 }
    ));
    assert!(matches!(
        engine.redeem(&id).await.expect("ok"),
        RedeemOutcome::LimitReached
    ));

    let after = repo.find_by_id(&id).await.expect("ok").expect("found");
    assert_eq!(after.redemption_count, 2);

    assert!(matches!(
        engine.redeem("promotion:missing").await.expect("ok"),
        RedeemOutcome::NotFound
    ));
}

#[tokio::test]
async fn test_concurrent_redemptions_take_one_slot_once() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());
    let engine = PromotionEngine::new(state.get_db());

    let mut data = base_create("One Slot");
    data.max_redemptions = Some(1);
    let promo = repo.create(data).await.expect("create");
    let id = promo.id_string();

    let (a, b) = tokio::join!(
        {
            let engine = engine.clone();
            let id = id.clone();
            async move { engine.redeem(&id).await.expect("ok") }
        },
        {
            let engine = engine.clone();
            let id = id.clone();
            async move { engine.redeem(&id).await.expect("ok") }
        }
    );

    let redeemed = [&a, &b]
        .iter()
        .filter(|o| matches!(o, RedeemOutcome::Redeemed { .. }))
        .count();
    let limited = [&a, &b]
        .iter()
        .filter(|o| matches!(o, RedeemOutcome::LimitReached))
        .count();
    assert_eq!(redeemed, 1, "exactly one redemption wins the last slot");
    assert_eq!(limited, 1);

    let after = repo.find_by_id(&id).await.expect("ok").expect("found");
    assert_eq!(after.redemption_count, 1);
}

#[tokio::test]
async fn test_delete_guarded_by_announcement_binding() {
    let state = test_state().await;
    let promo_repo = PromotionRepository::new(state.get_db());
    let ann_repo = AnnouncementRepository::new(state.get_db());

    let promo = promo_repo
        .create(base_create("Bound"))
        .await
        .expect("create");

    let announcement = ann_repo
        .create(AnnouncementCreate {
            title: "Summer sale".to_string(),
            body: None,
            kind: None,
            promotion: Some(promo.id_string()),
            starts_at: None,
            ends_at: None,
            sort_order: None,
        })
        .await
        .expect("create announcement");

    assert!(matches!(
        promo_repo.delete(&promo.id_string()).await,
        Err(RepoError::Dependent(_))
    ));

    // After unbinding, the delete goes through
    let ann_id = announcement.id.as_ref().map(|t| t.to_string()).expect("id");
    ann_repo.unbind_promotion(&ann_id).await.expect("unbind");
    assert!(promo_repo.delete(&promo.id_string()).await.expect("ok"));
}

#[tokio::test]
async fn test_promotion_serializes_id_as_string() {
    let state = test_state().await;
    let repo = PromotionRepository::new(state.get_db());

    let promo = repo.create(base_create("Serde")).await.expect("create");
    let value = serde_json::to_value(&promo).expect("serialize");

    let id = value["id"].as_str().expect("id is a string");
    assert!(id.starts_with("promotion:"));
    assert_eq!(value["scope"], "ALL");
    assert_eq!(value["discount_type"], "PERCENTAGE");
}

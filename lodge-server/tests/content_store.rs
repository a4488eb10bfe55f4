//! Content store integration tests - rooms and hotel services

use lodge_server::db::models::{HotelServiceCreate, PromoScope, PromotionCreate, RoomCreate, RoomUpdate};
use lodge_server::db::repository::{
    HotelServiceRepository, PromotionRepository, RepoError, RoomRepository,
};
use lodge_server::{Config, ServerState};

async fn test_state() -> ServerState {
    ServerState::in_memory(Config::default())
        .await
        .expect("in-memory state")
}

fn room_create(name: &str) -> RoomCreate {
    RoomCreate {
        name: name.to_string(),
        description: None,
        price_per_night: 45_000,
        capacity: None,
        amenities: None,
        images: None,
        sort_order: None,
    }
}

#[tokio::test]
async fn test_room_slug_generated_and_deduped() {
    let state = test_state().await;
    let repo = RoomRepository::new(state.get_db());

    let first = repo.create(room_create("Deluxe Suite")).await.expect("create");
    assert_eq!(first.slug, "deluxe-suite");
    assert_eq!(first.capacity, 2);

    // Same name again: slug gets a timestamp suffix instead of colliding
    let second = repo.create(room_create("Deluxe Suite")).await.expect("create");
    assert_ne!(second.slug, first.slug);
    assert!(second.slug.starts_with("deluxe-suite-"));

    let found = repo
        .find_by_slug("deluxe-suite")
        .await
        .expect("ok")
        .expect("found");
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_room_update_merges_and_keeps_slug() {
    let state = test_state().await;
    let repo = RoomRepository::new(state.get_db());

    let room = repo.create(room_create("Garden View")).await.expect("create");
    let id = room.id.as_ref().map(|t| t.to_string()).expect("id");

    let updated = repo
        .update(
            &id,
            RoomUpdate {
                name: Some("Garden Panorama".to_string()),
                description: None,
                price_per_night: Some(52_000),
                capacity: None,
                amenities: Some(vec!["wifi".to_string(), "balcony".to_string()]),
                images: None,
                sort_order: None,
                is_active: None,
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "Garden Panorama");
    assert_eq!(updated.price_per_night, 52_000);
    assert_eq!(updated.amenities.len(), 2);
    // Untouched fields survive the merge; public links stay stable
    assert_eq!(updated.slug, "garden-view");
    assert_eq!(updated.capacity, 2);
}

#[tokio::test]
async fn test_room_delete_guarded_by_targeting_promotion() {
    let state = test_state().await;
    let rooms = RoomRepository::new(state.get_db());
    let promos = PromotionRepository::new(state.get_db());

    let room = rooms.create(room_create("Royal Suite")).await.expect("create");
    let room_id = room.id.as_ref().map(|t| t.to_string()).expect("id");

    let promo = promos
        .create(PromotionCreate {
            name: "Royal deal".to_string(),
            discount_type: None,
            value: 15.0,
            scope: Some(PromoScope::Room),
            target_room: Some(room_id.clone()),
            target_service: None,
            code: None,
            starts_at: 0,
            ends_at: 10_000,
            minimum_amount: None,
            max_redemptions: None,
            max_redemptions_per_customer: None,
            terms: None,
            created_by: None,
        })
        .await
        .expect("create promotion");

    assert!(matches!(
        rooms.delete(&room_id).await,
        Err(RepoError::Dependent(_))
    ));

    promos.delete(&promo.id_string()).await.expect("delete promo");
    assert!(rooms.delete(&room_id).await.expect("ok"));
}

#[tokio::test]
async fn test_hotel_service_crud() {
    let state = test_state().await;
    let repo = HotelServiceRepository::new(state.get_db());

    let service = repo
        .create(HotelServiceCreate {
            name: "Spa & Wellness".to_string(),
            description: Some("Full day access".to_string()),
            price: 25_000,
            category: Some("WELLNESS".to_string()),
            image: None,
            sort_order: None,
        })
        .await
        .expect("create");
    assert_eq!(service.slug, "spa-wellness");

    let all = repo.find_all().await.expect("ok");
    assert_eq!(all.len(), 1);

    let id = service.id.as_ref().map(|t| t.to_string()).expect("id");
    assert!(repo.delete(&id).await.expect("ok"));
    assert!(repo.find_all().await.expect("ok").is_empty());
}

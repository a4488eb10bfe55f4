//! Storage bootstrap tests - on-disk datastore under a scratch directory

use lodge_server::db::repository::RoomRepository;
use lodge_server::db::models::RoomCreate;
use lodge_server::db::DbService;

#[tokio::test]
async fn test_on_disk_datastore_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("lodge.db");

    let service = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("open datastore");

    let rooms = RoomRepository::new(service.db.clone());
    let created = rooms
        .create(RoomCreate {
            name: "Executive Suite".to_string(),
            description: None,
            price_per_night: 60_000,
            capacity: None,
            amenities: None,
            images: None,
            sort_order: None,
        })
        .await
        .expect("create");

    let found = rooms
        .find_by_slug("executive-suite")
        .await
        .expect("ok")
        .expect("found");
    assert_eq!(found.id, created.id);
    assert!(db_path.exists());
}

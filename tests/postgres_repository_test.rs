//! Postgres repository tests
//!
//! Need Docker or `TEST_DATABASE_URL`; run with `cargo test -- --ignored`.

mod helpers;

use chrono::Utc;
use helpers::*;
use serial_test::serial;
use EventDesk::models::{NewUser, ParticipantKind};
use EventDesk::DatabaseService;

#[tokio::test]
#[ignore]
#[serial]
async fn test_postgres_aggregate_loading() {
    let db = TestDatabase::new().await.expect("Failed to set up test database");
    db.cleanup().await.unwrap();
    let service = DatabaseService::new(db.pool.clone());

    let event_type = service.event_types.create("Conference").await.unwrap();
    let event = service.events.create(&two_day_event(event_type.id, "Summit", 3)).await.unwrap();
    let participant = service
        .participants
        .create(&participant_request("Ana Souza", CPF_ANA, ParticipantKind::Vip))
        .await
        .unwrap();
    let supplier = service
        .suppliers
        .create(&supplier_request("Catering", CNPJ_CATERING, 25_000))
        .await
        .unwrap();

    service.events.add_participant(event.id, participant.id, Utc::now()).await.unwrap();
    service.events.add_supplier(event.id, supplier.id, supplier.base_price_cents).await.unwrap();
    // Composite keys reject a second identical link
    assert!(service.events.add_supplier(event.id, supplier.id, 1).await.is_err());

    let aggregate = service.events.find_aggregate(event.id).await.unwrap().unwrap();
    assert_eq!(aggregate.event_type.as_ref().unwrap().description, "Conference");
    assert_eq!(aggregate.participants[0].participant.kind, ParticipantKind::Vip);
    assert_eq!(aggregate.contracted_total_cents(), 25_000);

    let with_events = service.participants.find_with_events_by_cpf(CPF_ANA).await.unwrap().unwrap();
    assert_eq!(with_events.events.len(), 1);

    assert!(service.participants.delete(participant.id).await.unwrap());
    let aggregate = service.events.find_aggregate(event.id).await.unwrap().unwrap();
    assert!(aggregate.participants.is_empty());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_postgres_users_and_paging() {
    let db = TestDatabase::new().await.expect("Failed to set up test database");
    db.cleanup().await.unwrap();
    let service = DatabaseService::new(db.pool.clone());
    service.health_check().await.unwrap();

    let user = service
        .users
        .create(&NewUser {
            name: "Ops".to_string(),
            email: "ops@example.com".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(service.users.find_by_email("ops@example.com").await.unwrap().unwrap().id, user.id);

    for (name, cpf) in [("Carla Dias", CPF_CARLA), ("Ana Souza", CPF_ANA), ("Bruno Reis", CPF_BRUNO)] {
        service
            .participants
            .create(&participant_request(name, cpf, ParticipantKind::External))
            .await
            .unwrap();
    }
    let page = service.participants.list(1, 2).await.unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Bruno Reis", "Carla Dias"]);
    assert_eq!(service.participants.count().await.unwrap(), 3);
}

//! Supplier and event type service tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use EventDesk::models::EventTypeRequest;
use EventDesk::EventDeskError;

#[tokio::test]
async fn test_supplier_crud() {
    let ctx = TestContext::new();
    let service = &ctx.services.supplier_service;

    let created = service
        .create(supplier_request("Catering", "11.222.333/0001-81", 150_000))
        .await
        .unwrap();
    assert_eq!(created.cnpj, CNPJ_CATERING);

    let updated = service
        .update(created.id, supplier_request("Premium Catering", CNPJ_CATERING, 180_000))
        .await
        .unwrap();
    assert_eq!(updated.service_name, "Premium Catering");
    assert_eq!(updated.base_price_cents, 180_000);

    assert_eq!(service.list().await.unwrap().len(), 1);
    service.delete(created.id).await.unwrap();
    assert_matches!(service.get_by_id(created.id).await, Err(EventDeskError::NotFound(_)));
}

#[tokio::test]
async fn test_supplier_rules() {
    let ctx = TestContext::new();
    let service = &ctx.services.supplier_service;

    assert_matches!(
        service.create(supplier_request("Sound", CNPJ_SOUND, 0)).await,
        Err(EventDeskError::Validation(_))
    );
    assert_matches!(
        service.create(supplier_request("", CNPJ_SOUND, 100)).await,
        Err(EventDeskError::Validation(_))
    );
    assert_matches!(
        service.create(supplier_request("Sound", "123", 100)).await,
        Err(EventDeskError::Validation(_))
    );

    let sound = service.create(supplier_request("Sound", CNPJ_SOUND, 100)).await.unwrap();
    let venue = service.create(supplier_request("Venue", CNPJ_VENUE, 100)).await.unwrap();
    assert_matches!(
        service.create(supplier_request("Sound Again", CNPJ_SOUND, 100)).await,
        Err(EventDeskError::AlreadyExists(_))
    );
    assert_matches!(
        service.update(venue.id, supplier_request("Venue", CNPJ_SOUND, 100)).await,
        Err(EventDeskError::AlreadyExists(_))
    );
    assert!(service.update(sound.id, supplier_request("Sound", CNPJ_SOUND, 250)).await.is_ok());
}

#[tokio::test]
async fn test_supplier_update_unknown_id_is_not_found_before_cnpj_conflict() {
    let ctx = TestContext::new();
    let service = &ctx.services.supplier_service;

    service.create(supplier_request("Catering", CNPJ_CATERING, 150_000)).await.unwrap();
    assert_matches!(
        service.update(999_999, supplier_request("Other", CNPJ_CATERING, 100)).await,
        Err(EventDeskError::NotFound(_))
    );
}

#[tokio::test]
async fn test_event_type_rules() {
    let ctx = TestContext::new();
    let service = &ctx.services.event_type_service;

    let workshop = service
        .create(EventTypeRequest { description: "Workshop".to_string() })
        .await
        .unwrap();
    assert_matches!(
        service.create(EventTypeRequest { description: "Workshop".to_string() }).await,
        Err(EventDeskError::AlreadyExists(_))
    );
    assert_matches!(
        service.create(EventTypeRequest { description: "   ".to_string() }).await,
        Err(EventDeskError::Validation(_))
    );
    assert_matches!(
        service.create(EventTypeRequest { description: "x".repeat(101) }).await,
        Err(EventDeskError::Validation(_))
    );
    assert_matches!(
        service.update(404, EventTypeRequest { description: "Lecture".to_string() }).await,
        Err(EventDeskError::NotFound(_))
    );

    let renamed = service
        .update(workshop.id, EventTypeRequest { description: "Hands-on Workshop".to_string() })
        .await
        .unwrap();
    assert_eq!(renamed.description, "Hands-on Workshop");
    assert_eq!(service.list().await.unwrap(), vec![renamed]);
}

#[tokio::test]
async fn test_event_type_update_unknown_id_is_not_found_before_duplicate() {
    let ctx = TestContext::new();
    let service = &ctx.services.event_type_service;

    service
        .create(EventTypeRequest { description: "Workshop".to_string() })
        .await
        .unwrap();
    assert_matches!(
        service.update(999_999, EventTypeRequest { description: "Workshop".to_string() }).await,
        Err(EventDeskError::NotFound(_))
    );
}

#[tokio::test]
async fn test_deleting_event_type_removes_its_events() {
    let ctx = TestContext::new();
    let event_type = ctx.create_event_type("Temporary").await;
    let event = ctx
        .services
        .event_service
        .create(two_day_event(event_type.id, "Short Lived", 5))
        .await
        .unwrap();

    ctx.services.event_type_service.delete(event_type.id).await.unwrap();
    assert_matches!(
        ctx.services.event_service.get_by_id(event.event.id).await,
        Err(EventDeskError::NotFound(_))
    );
}

//! Request builders and sample values shared by the tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use EventDesk::models::{EventRequest, ParticipantKind, ParticipantRequest, SupplierRequest};

pub const CPF_ANA: &str = "12345678909";
pub const CPF_BRUNO: &str = "98765432100";
pub const CPF_CARLA: &str = "11144477735";

pub const CNPJ_CATERING: &str = "11222333000181";
pub const CNPJ_SOUND: &str = "45997418000153";
pub const CNPJ_VENUE: &str = "04252011000110";

/// 2025-05-`day` at `hour`:00 UTC
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap()
}

pub fn event_request(event_type_id: i64, name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> EventRequest {
    EventRequest {
        name: name.to_string(),
        start_date: start,
        end_date: end,
        venue: Some("Centro de Convenções".to_string()),
        address: Some("Av. Paulista, 1000".to_string()),
        notes: None,
        max_capacity: 100,
        max_budget_cents: 1_000_000,
        event_type_id,
    }
}

/// A two-day event starting on `day`
pub fn two_day_event(event_type_id: i64, name: &str, day: u32) -> EventRequest {
    let start = at(day, 9);
    event_request(event_type_id, name, start, start + Duration::days(1))
}

pub fn participant_request(full_name: &str, cpf: &str, kind: ParticipantKind) -> ParticipantRequest {
    ParticipantRequest {
        full_name: full_name.to_string(),
        cpf: cpf.to_string(),
        phone: Some("(11) 91234-5678".to_string()),
        kind,
    }
}

pub fn supplier_request(service_name: &str, cnpj: &str, base_price_cents: i64) -> SupplierRequest {
    SupplierRequest {
        service_name: service_name.to_string(),
        cnpj: cnpj.to_string(),
        base_price_cents,
    }
}

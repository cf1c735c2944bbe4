use chrono::NaiveDate;
use prop_domain::{DateRange, DomainError, ReservationOutcome, ReservationRequest};
use serde_json::json;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_date_range_requires_start_before_end() {
    assert!(DateRange::new(d(2026, 3, 1), d(2026, 3, 4)).is_ok());
    let err = DateRange::new(d(2026, 3, 4), d(2026, 3, 4)).unwrap_err();
    assert_eq!(err, DomainError::ValidationError("startDate must be before endDate".into()));
}

#[test]
fn test_date_range_nights_and_overlap() {
    let a = DateRange::new(d(2026, 3, 1), d(2026, 3, 4)).unwrap();
    let b = DateRange::new(d(2026, 3, 4), d(2026, 3, 6)).unwrap();
    let c = DateRange::new(d(2026, 3, 3), d(2026, 3, 5)).unwrap();
    assert_eq!(a.nights(), 3);
    // checkout el mismo día del check-in siguiente no se solapa
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c));
    assert!(c.overlaps(&b));
}

#[test]
fn test_request_camel_case_and_defaults() {
    let req: ReservationRequest = serde_json::from_value(json!({
        "propertyId": "prop-1",
        "tenantId": "tenant-1",
        "startDate": "2026-05-01",
        "endDate": "2026-05-03"
    })).unwrap();
    assert_eq!(req.guests, 1);
    assert!(req.documents.is_empty());
    assert_eq!(req.stay().unwrap().nights(), 2);
}

#[test]
fn test_outcome_tolerates_missing_sections() {
    let out: ReservationOutcome = serde_json::from_value(json!({
        "pricing": {"nights": 2, "nightlyRateCents": 100, "feesCents": 0, "totalCents": 200, "currency": "USD"}
    })).unwrap();
    assert!(out.availability.is_none());
    assert_eq!(out.pricing.unwrap().total_cents, 200);
}

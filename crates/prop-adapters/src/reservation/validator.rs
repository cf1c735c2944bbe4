use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

use prop_core::{ProcessValidator, ValidationReport};
use prop_domain::{PropertyDirectory, ReservationRequest, ServiceError, TenantDirectory};

/// Validador de la entrada de `propertyReservation`.
///
/// Primero revisa la forma del JSON; si es correcta, consulta en paralelo la
/// existencia de la propiedad y del inquilino. Se acumulan todos los errores.
pub struct ReservationValidator {
    properties: Arc<dyn PropertyDirectory>,
    tenants: Arc<dyn TenantDirectory>,
}

impl ReservationValidator {
    pub fn new(properties: Arc<dyn PropertyDirectory>, tenants: Arc<dyn TenantDirectory>) -> Self {
        Self { properties,
               tenants }
    }
}

fn required_str<'a>(input: &'a Value, key: &str, errors: &mut Vec<String>) -> Option<&'a str> {
    match input.get(key).and_then(Value::as_str) {
        Some(s) if s.trim().is_empty() => {
            errors.push(format!("{key} is required"));
            None
        }
        Some(s) if s.trim() != s => {
            errors.push(format!("{key} must not have leading or trailing whitespace"));
            None
        }
        Some(s) => Some(s),
        None => {
            errors.push(format!("{key} is required"));
            None
        }
    }
}

fn required_date(input: &Value, key: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = required_str(input, key, errors)?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(format!("{key} must be a valid date (YYYY-MM-DD)"));
            None
        }
    }
}

/// Checks síncronos sobre el JSON. Devuelve los ids si ambos están presentes.
fn structural_errors<'a>(input: &'a Value, errors: &mut Vec<String>) -> Option<(&'a str, &'a str)> {
    if !input.is_object() {
        errors.push("reservation input must be a JSON object".to_string());
        return None;
    }
    let property = required_str(input, "propertyId", errors);
    let tenant = required_str(input, "tenantId", errors);
    let start = required_date(input, "startDate", errors);
    let end = required_date(input, "endDate", errors);
    if let (Some(s), Some(e)) = (start, end) {
        if s >= e {
            errors.push("startDate must be before endDate".to_string());
        }
    }
    match input.get("guests") {
        None | Some(Value::Null) => {}
        Some(g) if g.as_u64().is_some_and(|n| n >= 1 && n <= u32::MAX as u64) => {}
        Some(_) => errors.push("guests must be a positive integer".to_string()),
    }
    documents_errors(input, errors);
    property.zip(tenant)
}

/// `documents`, si viene, debe ser una lista de `{id, kind}` no vacíos.
fn documents_errors(input: &Value, errors: &mut Vec<String>) {
    let docs = match input.get("documents") {
        None | Some(Value::Null) => return,
        Some(Value::Array(docs)) => docs,
        Some(_) => {
            errors.push("documents must be an array".to_string());
            return;
        }
    };
    for (i, doc) in docs.iter().enumerate() {
        let field_ok = |key: &str| doc.get(key).and_then(Value::as_str).is_some_and(|v| !v.trim().is_empty());
        if !field_ok("id") || !field_ok("kind") {
            errors.push(format!("documents[{i}] must have a non-empty id and kind"));
        }
    }
}

/// Los steps decodifican la entrada como `ReservationRequest`; cualquier
/// diferencia con los checks estructurales se reporta acá.
fn decode_error(input: &Value) -> Option<String> {
    serde_json::from_value::<ReservationRequest>(input.clone()).err()
                                                               .map(|e| format!("invalid reservation request: {e}"))
}

fn existence_error(what: &str, id: &str, res: Result<bool, ServiceError>) -> Option<String> {
    match res {
        Ok(true) => None,
        Ok(false) => Some(format!("{what} {id} does not exist")),
        Err(e) => Some(format!("could not verify {what} {id}: {e}")),
    }
}

#[async_trait]
impl ProcessValidator for ReservationValidator {
    async fn validate(&self, input: &Value) -> ValidationReport {
        let mut errors = Vec::new();
        let ids = structural_errors(input, &mut errors);
        if errors.is_empty() {
            errors.extend(decode_error(input));
        }
        // Sin ids no hay nada que consultar; con errores estructurales igual
        // se consulta para reportar todo de una vez.
        if let Some((property_id, tenant_id)) = ids {
            let (property, tenant) =
                tokio::join!(self.properties.property_exists(property_id), self.tenants.tenant_exists(tenant_id));
            errors.extend(existence_error("property", property_id, property));
            errors.extend(existence_error("tenant", tenant_id, tenant));
        }
        if !errors.is_empty() {
            debug!("reservation input rejected with {} error(s)", errors.len());
        }
        ValidationReport::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structural_checks_collect_every_problem() {
        let mut errors = Vec::new();
        let payload = json!({"tenantId": "", "startDate": "2026-13-01", "endDate": "2026-01-02", "guests": 0});
        let ids = structural_errors(&payload,
                                    &mut errors);
        assert!(ids.is_none());
        assert_eq!(errors,
                   vec!["propertyId is required",
                        "tenantId is required",
                        "startDate must be a valid date (YYYY-MM-DD)",
                        "guests must be a positive integer"]);
    }

    #[test]
    fn reversed_dates_are_reported() {
        let mut errors = Vec::new();
        let payload = json!({"propertyId": "p", "tenantId": "t", "startDate": "2026-01-05", "endDate": "2026-01-02"});
        let ids = structural_errors(&payload,
                                    &mut errors);
        assert_eq!(ids, Some(("p", "t")));
        assert_eq!(errors, vec!["startDate must be before endDate"]);
    }

    #[test]
    fn padded_ids_are_rejected() {
        let mut errors = Vec::new();
        let payload = json!({"propertyId": "prop-loft ", "tenantId": "t", "startDate": "2026-01-01", "endDate": "2026-01-02"});
        let ids = structural_errors(&payload,
                                    &mut errors);
        assert!(ids.is_none());
        assert_eq!(errors, vec!["propertyId must not have leading or trailing whitespace"]);
    }

    #[test]
    fn documents_must_be_a_list_of_refs() {
        let base = json!({"propertyId": "p", "tenantId": "t", "startDate": "2026-01-01", "endDate": "2026-01-02"});
        let mut not_list = base.clone();
        not_list["documents"] = json!("passport");
        let mut errors = Vec::new();
        structural_errors(&not_list, &mut errors);
        assert_eq!(errors, vec!["documents must be an array"]);

        let mut bad_entry = base.clone();
        bad_entry["documents"] = json!([{"id": "doc-1", "kind": "passport"}, {"id": "doc-2"}]);
        let mut errors = Vec::new();
        structural_errors(&bad_entry, &mut errors);
        assert_eq!(errors, vec!["documents[1] must have a non-empty id and kind"]);
    }

    #[test]
    fn structurally_valid_input_decodes_for_the_steps() {
        let input = json!({"propertyId": "p", "tenantId": "t", "startDate": "2026-01-01", "endDate": "2026-01-02",
                           "documents": [{"id": "d", "kind": "id"}]});
        let mut errors = Vec::new();
        structural_errors(&input, &mut errors);
        assert!(errors.is_empty());
        assert_eq!(decode_error(&input), None);
    }

    #[test]
    fn non_object_input_is_rejected_early() {
        let mut errors = Vec::new();
        assert!(structural_errors(&json!([1]), &mut errors).is_none());
        assert_eq!(errors.len(), 1);
    }
}

//! Fusión del output de un step sobre el `state` acumulado.
//!
//! Merge "shallow": las claves del output reemplazan a las del state. No se
//! hace deep-merge de objetos anidados; dos steps que escriben la misma clave
//! resuelven por último-en-escribir.

use serde_json::{Map, Value};

/// Merge shallow de `data` sobre `state`. Devuelve las claves escritas (orden
/// de iteración de `data`).
pub fn merge_state(state: &mut Map<String, Value>, data: Map<String, Value>) -> Vec<String> {
    let mut written = Vec::with_capacity(data.len());
    for (k, v) in data {
        written.push(k.clone());
        state.insert(k, v);
    }
    written
}

/// Variante sobre `Value`: si ambos son objetos se mergean; si no, `b` tiene
/// precedencia.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            merge_state(&mut out, mb.clone());
            Value::Object(out)
        }
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_state_reports_written_keys() {
        let mut state = Map::new();
        state.insert("a".into(), json!(1));
        let data = json!({"b": 2, "a": 3});
        let written = merge_state(&mut state, data.as_object().cloned().unwrap());
        assert_eq!(state.get("a"), Some(&json!(3)));
        assert_eq!(state.get("b"), Some(&json!(2)));
        assert_eq!(written.len(), 2);
        assert!(written.contains(&"a".to_string()));
    }

    #[test]
    fn merge_json_non_object_overrides() {
        assert_eq!(merge_json(&json!({"x": 1}), &json!(5)), json!(5));
    }
}

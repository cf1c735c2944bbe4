//! Pruebas para el merge del state
//!
//! Verificamos la semántica shallow: claves del step posterior sobreescriben
//! las del anterior.

use prop_core::state::merge_json;
use prop_core::{FnStep, ProcessConfiguration, ProcessDefinition, ProcessEngine, ProcessRegistry, StepOutcome};
use serde_json::json;

#[test]
fn merge_shallow_overrides_keys() {
    let a = json!({"x": 1, "y": {"z": 3}, "keep": "a"});
    let b = json!({"x": 2, "y": "replaced", "new": true});

    let out = merge_json(&a, &b);

    assert_eq!(out["x"], json!(2));
    assert_eq!(out["y"], json!("replaced"));
    assert_eq!(out["keep"], json!("a"));
    assert_eq!(out["new"], json!(true));
}

#[tokio::test]
async fn last_writer_wins_between_steps() {
    let def = ProcessDefinition::builder("lw").step(FnStep::sync("first", |_| StepOutcome::from_json(json!({"x": 1, "y": {"inner": 1}}))))
                                              .step(FnStep::sync("second", |_| StepOutcome::from_json(json!({"x": 2, "y": {"other": 2}}))))
                                              .build()
                                              .unwrap();
    let mut registry = ProcessRegistry::new();
    registry.register_process("lw", def, ProcessConfiguration::new(["first", "second"]))
            .unwrap();
    let engine = ProcessEngine::new(registry);

    let res = engine.execute_process("lw", json!({})).await.unwrap();
    let data = res.data().unwrap();

    assert_eq!(data["x"], json!(2));
    // shallow: el objeto anidado se reemplaza completo
    assert_eq!(data["y"], json!({"other": 2}));
}

#[tokio::test]
async fn non_object_output_fails_the_step() {
    let def = ProcessDefinition::builder("bad").step(FnStep::sync("scalar", |_| StepOutcome::from_json(json!(7))))
                                               .build()
                                               .unwrap();
    let mut registry = ProcessRegistry::new();
    registry.register_process("bad", def, ProcessConfiguration::new(["scalar"])).unwrap();
    let engine = ProcessEngine::new(registry);

    let res = engine.execute_process("bad", json!({})).await.unwrap();
    assert_eq!(res.error().unwrap().to_string(), "step output must be a JSON object, got 7");
}

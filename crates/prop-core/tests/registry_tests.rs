use prop_core::{FnStep, ProcessConfiguration, ProcessDefinition, ProcessEngine, ProcessRegistry, RegistryError,
                StepOutcome};
use serde_json::json;

fn def_with(name: &str, steps: &[&'static str]) -> ProcessDefinition {
    let mut builder = ProcessDefinition::builder(name);
    for &s in steps {
        builder = builder.step(FnStep::sync(s, move |_| StepOutcome::from_json(json!({ s: s }))));
    }
    builder.build().unwrap()
}

#[test]
fn unknown_step_in_order_is_rejected() {
    let mut registry = ProcessRegistry::new();
    let err = registry.register_process("p", def_with("p", &["a"]), ProcessConfiguration::new(["a", "zzz"]))
                      .unwrap_err();
    assert_eq!(err,
               RegistryError::UnknownStep { process: "p".into(),
                                            step: "zzz".into() });
    assert!(!registry.contains("p"));
}

#[test]
fn unknown_step_in_overrides_is_rejected() {
    let mut registry = ProcessRegistry::new();
    let config = ProcessConfiguration::new(["a"]).disable("ghost-step");
    let err = registry.register_process("p", def_with("p", &["a"]), config).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownStep { step, .. } if step == "ghost-step"));
}

#[test]
fn colliding_declared_keys_still_register() {
    let def = ProcessDefinition::builder("c").step(FnStep::sync("a", |_| StepOutcome::empty()).writing(&["x"]))
                                             .step(FnStep::sync("b", |_| StepOutcome::empty()).writing(&["x"]))
                                             .build()
                                             .unwrap();
    let mut registry = ProcessRegistry::new();
    registry.register_process("c", def, ProcessConfiguration::new(["a", "b"])).unwrap();
    assert!(registry.contains("c"));
}

#[tokio::test]
async fn re_registration_overwrites() {
    let mut engine = ProcessEngine::default();
    engine.register_process("p", def_with("p", &["old"]), ProcessConfiguration::new(["old"]))
          .unwrap();
    engine.register_process("p", def_with("p", &["new"]), ProcessConfiguration::new(["new"]))
          .unwrap();

    assert_eq!(engine.registry().len(), 1);
    let res = engine.execute_process("p", json!({})).await.unwrap();
    assert_eq!(res.data(), Some(&json!({"new": "new"})));
}

#[test]
fn names_are_sorted() {
    let mut registry = ProcessRegistry::new();
    registry.register_process("zeta", def_with("zeta", &["a"]), ProcessConfiguration::new(["a"]))
            .unwrap();
    registry.register_process("alpha", def_with("alpha", &["a"]), ProcessConfiguration::new(["a"]))
            .unwrap();
    assert_eq!(registry.names(), vec!["alpha", "zeta"]);
}

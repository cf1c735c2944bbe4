use std::sync::{Arc, Mutex};

use prop_core::{FnStep, ProcessConfiguration, ProcessDefinition, ProcessEngine, ProcessRegistry, StepOutcome};
use serde_json::json;

/// Step que anota su nombre en `log` al ejecutarse.
fn recording(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> FnStep {
    let log = Arc::clone(log);
    FnStep::sync(name, move |_| {
        log.lock().unwrap().push(name.to_string());
        StepOutcome::from_json(json!({ name: true }))
    })
}

fn engine(def: ProcessDefinition, config: ProcessConfiguration) -> ProcessEngine {
    let mut registry = ProcessRegistry::new();
    registry.register_process("p", def, config).unwrap();
    ProcessEngine::new(registry)
}

#[tokio::test]
async fn execution_follows_configured_order_not_definition_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let def = ProcessDefinition::builder("p").step(recording("a", &log))
                                             .step(recording("b", &log))
                                             .step(recording("c", &log))
                                             .build()
                                             .unwrap();
    let engine = engine(def, ProcessConfiguration::new(["c", "a", "b"]));

    let res = engine.execute_process("p", json!({})).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["c", "a", "b"]);
    assert_eq!(res.context().completed_steps(), &["c".to_string(), "a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn steps_missing_from_order_never_run() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let def = ProcessDefinition::builder("p").step(recording("a", &log))
                                             .step(recording("b", &log))
                                             .build()
                                             .unwrap();
    let engine = engine(def, ProcessConfiguration::new(["b"]));

    engine.execute_process("p", json!({})).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["b"]);
}

#[tokio::test]
async fn skipped_steps_never_appear_in_completed() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let def = ProcessDefinition::builder("p").step(recording("a", &log))
                                             .step(recording("b", &log).when(|c| c.state().contains_key("nope")))
                                             .step(recording("c", &log))
                                             .step(recording("d", &log))
                                             .build()
                                             .unwrap();
    let config = ProcessConfiguration::new(["a", "b", "c", "d"]).disable("c")
                                                                .with_condition("d", |c| c.state().contains_key("a"));
    let engine = engine(def, config);

    let res = engine.execute_process("p", json!({})).await.unwrap();

    assert_eq!(res.context().completed_steps(), &["a".to_string(), "d".to_string()]);
    assert_eq!(*log.lock().unwrap(), vec!["a", "d"]);
}

#[tokio::test]
async fn failure_at_k_keeps_only_previous_executed_steps() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let def = ProcessDefinition::builder("p").step(recording("s1", &log))
                                             .step(recording("s2", &log))
                                             .step(FnStep::sync("s3", |_| StepOutcome::fail("s3 broke")))
                                             .step(recording("s4", &log))
                                             .build()
                                             .unwrap();
    let engine = engine(def, ProcessConfiguration::new(["s1", "s2", "s3", "s4"]).disable("s2"));

    let res = engine.execute_process("p", json!({})).await.unwrap();

    assert!(!res.is_success());
    assert_eq!(res.context().completed_steps(), &["s1".to_string()]);
    assert_eq!(*log.lock().unwrap(), vec!["s1"]);
    assert_eq!(res.error().unwrap().step(), Some("s3"));
}

#[tokio::test]
async fn conditions_see_state_before_the_step() {
    let def = ProcessDefinition::builder("p").step(FnStep::sync("set", |_| StepOutcome::from_json(json!({"ready": true}))))
                                             .step(FnStep::sync("gated", |_| StepOutcome::from_json(json!({"ran": true})))
                                                       .when(|c| c.state().get("ready") == Some(&json!(true))))
                                             .build()
                                             .unwrap();

    let ordered = engine(def, ProcessConfiguration::new(["gated", "set"]));
    let res = ordered.execute_process("p", json!({})).await.unwrap();
    assert_eq!(res.context().completed_steps(), &["set".to_string()]);
}

//! Decisión de ejecutar o saltar un step.

use crate::event::SkipReason;
use crate::model::ProcessContext;
use crate::process::ProcessConfiguration;
use crate::step::ProcessStep;

/// Devuelve el motivo para saltar `step`, o `None` si debe ejecutarse.
///
/// Se evalúan, en este orden y contra el contexto previo al step: el flag
/// `enabled` de la configuración, la condición propia del step y la condición
/// de la configuración. Cualquiera puede vetar la ejecución.
pub fn skip_reason(step: &dyn ProcessStep, config: &ProcessConfiguration, ctx: &ProcessContext) -> Option<SkipReason> {
    let toggle = config.toggle(step.name());
    if toggle.is_some_and(|t| !t.enabled) {
        return Some(SkipReason::Disabled);
    }
    if !step.condition(ctx) {
        return Some(SkipReason::StepCondition);
    }
    match toggle.and_then(|t| t.condition.as_ref()) {
        Some(cond) if !cond(ctx) => Some(SkipReason::ConfigCondition),
        _ => None,
    }
}

pub fn should_execute_step(step: &dyn ProcessStep, config: &ProcessConfiguration, ctx: &ProcessContext) -> bool {
    skip_reason(step, config, ctx).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{FnStep, StepOutcome};
    use serde_json::json;

    fn ctx() -> ProcessContext {
        ProcessContext::new("gating", json!({"flag": true}))
    }

    #[test]
    fn disabled_wins_over_conditions() {
        let step = FnStep::sync("a", |_| StepOutcome::empty());
        let cfg = ProcessConfiguration::new(["a"]).disable("a").with_condition("a", |_| true);
        assert_eq!(skip_reason(&step, &cfg, &ctx()), Some(SkipReason::Disabled));
    }

    #[test]
    fn step_condition_vetoes() {
        let step = FnStep::sync("a", |_| StepOutcome::empty()).when(|c| c.input_field("missing").is_some());
        let cfg = ProcessConfiguration::new(["a"]);
        assert_eq!(skip_reason(&step, &cfg, &ctx()), Some(SkipReason::StepCondition));
    }

    #[test]
    fn config_condition_vetoes() {
        let step = FnStep::sync("a", |_| StepOutcome::empty());
        let cfg = ProcessConfiguration::new(["a"]).with_condition("a", |c| c.input_field("flag") == Some(&json!(false)));
        assert_eq!(skip_reason(&step, &cfg, &ctx()), Some(SkipReason::ConfigCondition));
    }

    #[test]
    fn runs_when_nothing_vetoes() {
        let step = FnStep::sync("a", |_| StepOutcome::empty()).when(|c| c.input_field("flag").is_some());
        let cfg = ProcessConfiguration::new(["a"]).with_condition("a", |_| true);
        assert!(should_execute_step(&step, &cfg, &ctx()));
    }
}

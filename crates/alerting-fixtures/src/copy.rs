//! Deep copies of generated rules.

use alerting_model::AlertRule;

use crate::rule::{AlertRuleGenerator, RuleMutator};

/// Prefix of the throwaway generator handed to copy mutators.
const COPY_PREFIX: &str = "copy";

/// Returns an independent copy of `rule` with `mutators` applied to the copy.
///
/// The copy owns all of its maps, vectors and strings, so changes to either
/// side never show up on the other. Mutators receive a fresh clock-seeded
/// generator prefixed with `copy`; use [`copy_rule_with`] when they draw
/// random values that must follow a seed.
#[must_use]
pub fn copy_rule(rule: &AlertRule, mutators: &[RuleMutator]) -> AlertRule {
    if mutators.is_empty() {
        return rule.clone();
    }
    copy_rule_with(&AlertRuleGenerator::new(COPY_PREFIX), rule, mutators)
}

/// Returns an independent copy of `rule` with `mutators` applied to the
/// copy, handing them `generator`.
#[must_use]
pub fn copy_rule_with(
    generator: &AlertRuleGenerator,
    rule: &AlertRule,
    mutators: &[RuleMutator],
) -> AlertRule {
    let mut copy = rule.clone();
    for m in mutators {
        m(generator, &mut copy);
    }
    copy
}

//! Ready-made query steps for common expression and datasource queries.
//!
//! Payloads are built as typed JSON values, so caller-supplied strings are
//! always quoted correctly.

use alerting_model::{
    AlertQuery, EXPR_DATASOURCE_TYPE, EXPR_DATASOURCE_UID, LOKI_DATASOURCE_TYPE,
    PROMETHEUS_DATASOURCE_TYPE, RelativeTimeRange,
};
use serde_json::{Value, json};

use crate::error::{FixtureError, Result};

fn expr_datasource() -> Value {
    json!({ "uid": EXPR_DATASOURCE_UID, "type": EXPR_DATASOURCE_TYPE })
}

fn expression(ref_id: &str, model: Value) -> AlertQuery {
    AlertQuery {
        ref_id: ref_id.to_string(),
        query_type: EXPR_DATASOURCE_TYPE.to_string(),
        relative_time_range: RelativeTimeRange::default(),
        datasource_uid: EXPR_DATASOURCE_UID.to_string(),
        model,
    }
}

/// Builds a classic condition: `reducer(input) operation threshold`.
#[must_use]
pub fn create_classic_condition_expression(
    ref_id: &str,
    input_ref_id: &str,
    reducer: &str,
    operation: &str,
    threshold: i64,
) -> AlertQuery {
    expression(
        ref_id,
        json!({
            "refId": ref_id,
            "hide": false,
            "type": "classic_conditions",
            "datasource": expr_datasource(),
            "conditions": [{
                "type": "query",
                "evaluator": { "params": [threshold], "type": operation },
                "operator": { "type": "and" },
                "query": { "params": [input_ref_id] },
                "reducer": { "params": [], "type": reducer }
            }]
        }),
    )
}

/// Builds a reduce step collapsing `input_ref_id` with `reducer`.
#[must_use]
pub fn create_reduce_expression(ref_id: &str, input_ref_id: &str, reducer: &str) -> AlertQuery {
    expression(
        ref_id,
        json!({
            "refId": ref_id,
            "hide": false,
            "type": "reduce",
            "expression": input_ref_id,
            "reducer": reducer,
            "datasource": expr_datasource()
        }),
    )
}

/// Builds a threshold step comparing `input_ref_id` against `threshold`.
#[must_use]
pub fn create_threshold_expression(
    ref_id: &str,
    input_ref_id: &str,
    operation: &str,
    threshold: i64,
) -> AlertQuery {
    expression(
        ref_id,
        json!({
            "refId": ref_id,
            "type": "threshold",
            "datasource": expr_datasource(),
            "expression": input_ref_id,
            "conditions": [{
                "type": "query",
                "evaluator": { "params": [threshold], "type": operation }
            }]
        }),
    )
}

/// Builds a threshold step that fires above `threshold` and recovers below
/// `recovery_threshold`.
///
/// # Errors
///
/// Returns `FixtureError::UnexpectedPayload` if the built step is not
/// recognised as a hysteresis expression.
pub fn create_hysteresis_expression(
    ref_id: &str,
    input_ref_id: &str,
    threshold: i64,
    recovery_threshold: i64,
) -> Result<AlertQuery> {
    let q = expression(
        ref_id,
        json!({
            "refId": ref_id,
            "type": "threshold",
            "datasource": expr_datasource(),
            "expression": input_ref_id,
            "conditions": [{
                "type": "query",
                "evaluator": { "params": [threshold], "type": "gt" },
                "unloadEvaluator": { "params": [recovery_threshold], "type": "lt" }
            }]
        }),
    );

    if !q.is_hysteresis_expression() {
        return Err(FixtureError::UnexpectedPayload {
            ref_id: ref_id.to_string(),
            reason: "not a hysteresis expression".to_string(),
        });
    }
    Ok(q)
}

/// Builds a Prometheus query step. Instant queries are not range queries.
#[must_use]
pub fn create_prometheus_query(
    ref_id: &str,
    expr: &str,
    interval_ms: i64,
    max_data_points: i64,
    is_instant: bool,
    datasource_uid: &str,
) -> AlertQuery {
    AlertQuery {
        ref_id: ref_id.to_string(),
        query_type: String::new(),
        relative_time_range: RelativeTimeRange::default(),
        datasource_uid: datasource_uid.to_string(),
        model: json!({
            "refId": ref_id,
            "expr": expr,
            "intervalMs": interval_ms,
            "maxDataPoints": max_data_points,
            "exemplar": false,
            "instant": is_instant,
            "range": !is_instant,
            "datasource": { "uid": datasource_uid, "type": PROMETHEUS_DATASOURCE_TYPE }
        }),
    }
}

/// Builds a Loki query step.
#[must_use]
pub fn create_loki_query(
    ref_id: &str,
    expr: &str,
    interval_ms: i64,
    max_data_points: i64,
    query_type: &str,
    datasource_uid: &str,
) -> AlertQuery {
    AlertQuery {
        ref_id: ref_id.to_string(),
        query_type: query_type.to_string(),
        relative_time_range: RelativeTimeRange::default(),
        datasource_uid: datasource_uid.to_string(),
        model: json!({
            "refId": ref_id,
            "expr": expr,
            "intervalMs": interval_ms,
            "maxDataPoints": max_data_points,
            "queryType": query_type,
            "datasource": { "uid": datasource_uid, "type": LOKI_DATASOURCE_TYPE }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use test_case::test_case;

    #[test]
    fn reduce_expression_fields() {
        let q = create_reduce_expression("B", "A", "mean");
        assert_eq!(q.ref_id, "B");
        assert!(q.is_expression());
        assert_eq!(q.query_type, EXPR_DATASOURCE_TYPE);

        let parsed: Value = serde_json::from_str(&q.model.to_string()).unwrap();
        assert_eq!(parsed["type"], "reduce");
        assert_eq!(parsed["reducer"], "mean");
        assert_eq!(parsed["expression"], "A");
        assert_eq!(parsed["datasource"]["uid"], EXPR_DATASOURCE_UID);
    }

    #[test]
    fn reduce_expression_decodes_typed() {
        #[derive(Deserialize)]
        struct Reduce {
            #[serde(rename = "refId")]
            ref_id: String,
            expression: String,
            reducer: String,
        }
        let q = create_reduce_expression("B", "A", "last");
        let r: Reduce = q.decode_model().unwrap();
        assert_eq!(r.ref_id, "B");
        assert_eq!(r.expression, "A");
        assert_eq!(r.reducer, "last");
    }

    #[test]
    fn classic_condition_fields() {
        let q = create_classic_condition_expression("C", "A", "avg", "gt", 80);
        assert_eq!(q.expression_type(), Some("classic_conditions"));
        let cond = &q.model["conditions"][0];
        assert_eq!(cond["evaluator"]["params"][0], 80);
        assert_eq!(cond["evaluator"]["type"], "gt");
        assert_eq!(cond["query"]["params"][0], "A");
        assert_eq!(cond["reducer"]["type"], "avg");
        assert!(!q.is_hysteresis_expression());
    }

    #[test]
    fn threshold_is_not_hysteresis() {
        let q = create_threshold_expression("C", "B", "lt", 5);
        assert_eq!(q.expression_type(), Some("threshold"));
        assert_eq!(q.model["expression"], "B");
        assert!(!q.is_hysteresis_expression());
    }

    #[test]
    fn hysteresis_expression_recognised() {
        let q = create_hysteresis_expression("C", "B", 10, 5).unwrap();
        assert!(q.is_hysteresis_expression());
        let cond = &q.model["conditions"][0];
        assert_eq!(cond["evaluator"]["params"][0], 10);
        assert_eq!(cond["unloadEvaluator"]["params"][0], 5);
        assert_eq!(cond["unloadEvaluator"]["type"], "lt");
    }

    #[test]
    fn quotes_in_input_stay_quoted() {
        let q = create_reduce_expression("B", "A\"}", "mean");
        let parsed: Value = serde_json::from_str(&q.model.to_string()).unwrap();
        assert_eq!(parsed["expression"], "A\"}");
    }

    #[test_case(true ; "instant")]
    #[test_case(false ; "range")]
    fn prometheus_query(is_instant: bool) {
        let q = create_prometheus_query("A", "up == 0", 1000, 43200, is_instant, "prom-uid");
        assert_eq!(q.datasource_uid, "prom-uid");
        assert!(q.query_type.is_empty());
        assert!(!q.is_expression());
        assert_eq!(q.model["expr"], "up == 0");
        assert_eq!(q.model["instant"], is_instant);
        assert_eq!(q.model["range"], !is_instant);
        assert_eq!(q.model["intervalMs"], 1000);
        assert_eq!(q.model["datasource"]["type"], PROMETHEUS_DATASOURCE_TYPE);
    }

    #[test]
    fn loki_query() {
        let expr = "count_over_time({job=\"x\"}[5m])";
        let q = create_loki_query("A", expr, 1000, 100, "instant", "loki-uid");
        assert_eq!(q.query_type, "instant");
        assert_eq!(q.model["queryType"], "instant");
        assert_eq!(q.model["expr"], expr);
        assert_eq!(q.model["datasource"]["type"], LOKI_DATASOURCE_TYPE);
    }
}

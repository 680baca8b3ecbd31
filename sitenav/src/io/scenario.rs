//! Scenario files for `sitenav simulate`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde_json::Value;
use tracing::debug;

use crate::sim::scenario::Scenario;

pub const SCENARIO_SCHEMA: &str = include_str!("../../schemas/scenario/v1.schema.json");

/// Read, schema-check and parse a scenario file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let scenario = parse_scenario(&raw).with_context(|| format!("load {}", path.display()))?;
    debug!(
        path = %path.display(),
        sections = scenario.sections.len(),
        events = scenario.events.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

/// Parse scenario JSON: schema conformance first, then the typed struct.
pub fn parse_scenario(raw: &str) -> Result<Scenario> {
    let instance: Value = serde_json::from_str(raw).context("parse scenario json")?;
    let schema: Value = serde_json::from_str(SCENARIO_SCHEMA).context("parse scenario schema")?;
    validate_schema(&instance, &schema)?;
    let scenario: Scenario =
        serde_json::from_value(instance).context("parse scenario as v1 struct")?;
    Ok(scenario)
}

/// Validate JSON instance against a JSON Schema (Draft 2020-12).
fn validate_schema(instance: &Value, schema: &Value) -> Result<()> {
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

// ABOUTME: emits a json schema for the action document type to stdout.
// ABOUTME: lets producers of action files check their output before invoking the validator.

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(action_common::ActionDocument);
    let json = serde_json::to_string_pretty(&schema).context("serialize action schema")?;
    println!("{json}");
    Ok(())
}

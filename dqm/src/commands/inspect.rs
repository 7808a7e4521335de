// dqm/src/commands/inspect.rs
//
// USE CASE: Inspect a dataset (inferred schema + sample rows).

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use dqm_core::infrastructure::adapters::DuckDbSource;
use dqm_core::ports::DatasetSource;

pub fn execute(data: PathBuf, limit: usize) -> anyhow::Result<()> {
    let location = data
        .to_str()
        .with_context(|| format!("Dataset path is not valid UTF-8: {:?}", data))?;

    let source = DuckDbSource::new().context("Failed to start DuckDB")?;
    let preview = source
        .preview(location, limit)
        .with_context(|| format!("Failed to read {:?}", data))?;

    println!("\n🔍 Inspecting: '{}' ({} rows)", location, preview.total_rows);

    let mut schema = Table::new();
    schema.load_preset(UTF8_FULL).set_header(vec!["Column", "Type"]);
    for col in &preview.columns {
        schema.add_row(vec![col.name.clone(), col.data_type.to_string()]);
    }
    println!("{}", schema);

    println!("   --- Rows (Limit {}) ---", limit);
    let mut rows = Table::new();
    rows.load_preset(UTF8_FULL)
        .set_header(preview.columns.iter().map(|c| c.name.clone()));
    for row in &preview.rows {
        rows.add_row(row.iter().map(ToString::to_string));
    }
    println!("{}", rows);

    Ok(())
}

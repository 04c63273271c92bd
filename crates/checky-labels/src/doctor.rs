use anyhow::Result;

use crate::LabelTable;

/// Loads the label table and checks it is usable. Returns the label count.
pub fn check_table(path: &str) -> Result<usize> {
    let table = LabelTable::load(path)?;
    anyhow::ensure!(!table.is_empty(), "label file {} has no labels before the first blank line", path);
    Ok(table.len())
}

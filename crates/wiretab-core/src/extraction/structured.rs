use crate::drawing::{Attribute, Drawing};
use crate::mapping::schema::MappingDef;
use crate::model::OutputTable;

/// Copy tagged block attributes straight into the mapped columns.
///
/// Every block instance with at least one attribute becomes one row, in
/// document order. Returns `None` when no instance qualifies, which is the
/// signal to fall back to text heuristics.
pub fn extract_structured(drawing: &Drawing, mapping: &MappingDef) -> Option<OutputTable> {
    let mut table = OutputTable::new(&mapping.record_type, mapping.column_names());
    let mut counter = 0usize;

    for (block, attributes) in drawing.block_instances() {
        if attributes.is_empty() {
            continue;
        }
        counter += 1;

        let row = table.push_row();
        for col in mapping.usable_columns() {
            let column = col.column.trim();
            if col.is_auto_index() {
                row.set(column, counter.to_string());
                continue;
            }
            if let Some(value) = col.attribute_tag().and_then(|tag| lookup(attributes, tag)) {
                row.set(column, value);
            }
        }
        tracing::trace!(block, row = counter, "copied block attributes");
    }

    if table.rows.is_empty() {
        return None;
    }
    tracing::debug!(rows = table.rows.len(), "structured extraction");
    Some(table)
}

/// First attribute whose tag matches, ASCII case-insensitively.
fn lookup<'a>(attributes: &'a [Attribute], tag: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.tag.trim().eq_ignore_ascii_case(tag))
        .map(|a| a.value.as_str())
}

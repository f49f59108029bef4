use crate::classify::classify_row;
use crate::drawing::Drawing;
use crate::grouping::group_rows;
use crate::mapping::schema::MappingDef;
use crate::model::{OutputField, OutputTable};
use crate::parsing::tokenize;
use crate::trace::{RowTrace, TraceBundle, TraceWarning, WarningCode};

/// Build a table from loose text: tokenize, group by baseline, classify.
///
/// One row per token group, in group creation order. Columns bound to the
/// index field receive the 1-based row number.
pub fn assemble_rows(drawing: &Drawing, mapping: &MappingDef) -> (OutputTable, TraceBundle) {
    let mut table = OutputTable::new(&mapping.record_type, mapping.column_names());
    let mut trace = TraceBundle::default();

    let bindings = mapping.field_columns();
    let declared = mapping.declared_fields();
    let calibration = &mapping.calibration;

    let tokens = tokenize(drawing);
    let groups = group_rows(tokens, calibration.row_tolerance);

    for (i, group) in groups.iter().enumerate() {
        let index = i + 1;
        let result = classify_row(group, &declared, calibration);

        let row = table.push_row();
        for (field, column) in &bindings {
            let value = match field {
                OutputField::Index => Some(index.to_string()),
                other => result.fields.get(*other).map(str::to_string),
            };
            if let Some(value) = value {
                row.set(column, value);
            }
        }

        tracing::debug!(
            row = index,
            tokens = group.len(),
            assigned = result.assignments.len(),
            unassigned = result.unassigned.len(),
            "classified row"
        );

        if !result.unassigned.is_empty() {
            let leftovers: Vec<&str> = result.unassigned.iter().map(|t| t.value.as_str()).collect();
            trace.warnings.push(
                TraceWarning::new(
                    WarningCode::UnassignedTokens,
                    format!("row {index}: unassigned tokens {}", leftovers.join(", ")),
                )
                .with_row(index),
            );
        }
        trace
            .rows
            .push(RowTrace::from_classification(index, group.mean_y(), &result));
    }

    (table, trace)
}

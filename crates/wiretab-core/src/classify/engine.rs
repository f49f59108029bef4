use std::collections::BTreeSet;

use crate::classify::calibration::Calibration;
use crate::classify::outcome::{Assignment, FieldSlots, RowClassification, Stage};
use crate::model::{OutputField, TokenRow};
use crate::parsing::normalize::is_noise;
use crate::parsing::values::{
    is_purely_numeric, normalize_decimal, parse_decimal, parse_integer,
};
use crate::parsing::vocab::{has_wire_type_suffix, is_color_code, split_wire_type_suffix};

const WIRE_CODE_LEN: std::ops::RangeInclusive<usize> = 3..=10;
const CONNECTOR_LEN: std::ops::RangeInclusive<usize> = 4..=15;

/// Assign the tokens of one row to output fields.
///
/// Runs three passes over the row, left to right. A token committed by one
/// pass is skipped by every later pass, and each field takes the first
/// eligible token only. Fields outside `declared` are never written.
pub fn classify_row(
    row: &TokenRow,
    declared: &BTreeSet<OutputField>,
    calibration: &Calibration,
) -> RowClassification {
    let mut state = RowState::new(row, declared);

    stage_absolute_identifiers(&mut state, calibration);
    stage_bare_numbers(&mut state, calibration);
    stage_codes_and_connectors(&mut state);

    state.finish()
}

struct RowState<'a> {
    row: &'a TokenRow,
    declared: &'a BTreeSet<OutputField>,
    fields: FieldSlots,
    consumed: Vec<bool>,
    assignments: Vec<Assignment>,
}

impl<'a> RowState<'a> {
    fn new(row: &'a TokenRow, declared: &'a BTreeSet<OutputField>) -> Self {
        RowState {
            row,
            declared,
            fields: FieldSlots::default(),
            consumed: vec![false; row.tokens.len()],
            assignments: Vec::new(),
        }
    }

    /// Indices of tokens no earlier stage has taken.
    fn pending(&self) -> Vec<usize> {
        (0..self.row.tokens.len())
            .filter(|&i| !self.consumed[i])
            .collect()
    }

    fn value(&self, idx: usize) -> &'a str {
        self.row.tokens[idx].value.as_str()
    }

    /// Declared and still empty.
    fn open(&self, field: OutputField) -> bool {
        self.declared.contains(&field) && !self.fields.is_filled(field)
    }

    /// Write a declared, empty field and consume the token. Anything else is
    /// a no-op, so a token only counts as consumed once something was written.
    fn commit(&mut self, idx: usize, stage: Stage, field: OutputField, value: &str) {
        if !self.open(field) {
            return;
        }
        let token = &self.row.tokens[idx];
        self.fields.fill(field, value);
        self.consumed[idx] = true;
        self.assignments.push(Assignment {
            stage,
            field,
            token: token.value.clone(),
            value: value.to_string(),
            x: token.x,
        });
        tracing::trace!(?stage, %field, value, "committed token");
    }

    fn finish(self) -> RowClassification {
        let unassigned = self
            .row
            .tokens
            .iter()
            .zip(&self.consumed)
            .filter(|(_, consumed)| !**consumed)
            .map(|(t, _)| t.clone())
            .collect();

        RowClassification {
            fields: self.fields,
            assignments: self.assignments,
            unassigned,
        }
    }
}

/// Stage 1: literal color codes, then `<size><type>` compounds.
fn stage_absolute_identifiers(state: &mut RowState<'_>, calibration: &Calibration) {
    for idx in state.pending() {
        let value = state.value(idx);

        if is_color_code(value) && state.open(OutputField::Color) {
            state.commit(idx, Stage::AbsoluteIdentifier, OutputField::Color, value);
            continue;
        }

        // An undeclared type column still lets the compound supply the size.
        if state.fields.is_filled(OutputField::WireType) {
            continue;
        }
        let Some((prefix, suffix)) = split_wire_type_suffix(value) else {
            continue;
        };

        let prefix = prefix.trim();
        if prefix.is_empty() {
            state.commit(idx, Stage::AbsoluteIdentifier, OutputField::WireType, suffix);
            continue;
        }

        // A non-numeric prefix ("HARNESS-T1") means this is not a wire type.
        match parse_decimal(prefix) {
            Some(size) if calibration.is_wire_size(size) => {
                state.commit(idx, Stage::AbsoluteIdentifier, OutputField::WireType, suffix);
                state.commit(idx, Stage::AbsoluteIdentifier, OutputField::WireSize, prefix);
            }
            _ => {}
        }
    }
}

/// Stage 2: bare numbers, told apart by range.
fn stage_bare_numbers(state: &mut RowState<'_>, calibration: &Calibration) {
    for idx in state.pending() {
        let value = state.value(idx);

        let is_length = parse_integer(value).is_some_and(|n| calibration.is_cut_length(n));
        if is_length && state.open(OutputField::CutLength) {
            state.commit(idx, Stage::BareNumber, OutputField::CutLength, value.trim());
            continue;
        }

        let is_size = normalize_decimal(value).chars().count() <= calibration.wire_size_max_chars
            && parse_decimal(value).is_some_and(|d| calibration.is_wire_size(d));
        if is_size && state.open(OutputField::WireSize) {
            state.commit(idx, Stage::BareNumber, OutputField::WireSize, value.trim());
        }
    }
}

/// Stage 3: wire codes before connector names. Both shapes overlap, so the
/// wire code must be offered each token first.
fn stage_codes_and_connectors(state: &mut RowState<'_>) {
    for idx in state.pending() {
        let value = state.value(idx);
        let len = value.chars().count();
        let has_letter = value.chars().any(char::is_alphabetic);

        if !has_letter || is_noise(value) {
            continue;
        }

        let code_shaped = WIRE_CODE_LEN.contains(&len)
            && !is_color_code(value)
            && !has_wire_type_suffix(value);
        if code_shaped && state.open(OutputField::WireCode) {
            state.commit(idx, Stage::CodeOrConnector, OutputField::WireCode, value);
            continue;
        }

        if CONNECTOR_LEN.contains(&len) && !is_purely_numeric(value) {
            if state.open(OutputField::ConnectorStart) {
                state.commit(idx, Stage::CodeOrConnector, OutputField::ConnectorStart, value);
            } else if state.open(OutputField::ConnectorEnd) {
                state.commit(idx, Stage::CodeOrConnector, OutputField::ConnectorEnd, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextToken;

    fn row(values: &[&str]) -> TokenRow {
        TokenRow {
            tokens: values
                .iter()
                .enumerate()
                .map(|(i, v)| TextToken::new(*v, i as f64 * 10.0, 100.0))
                .collect(),
        }
    }

    fn all_fields() -> BTreeSet<OutputField> {
        OutputField::ALL.into_iter().collect()
    }

    fn classify(values: &[&str]) -> RowClassification {
        classify_row(&row(values), &all_fields(), &Calibration::default())
    }

    #[test]
    fn test_color_code() {
        let out = classify(&["R"]);
        assert_eq!(out.fields.get(OutputField::Color), Some("R"));
    }

    #[test]
    fn test_second_color_left_unassigned() {
        let out = classify(&["R", "B"]);
        assert_eq!(out.fields.get(OutputField::Color), Some("R"));
        assert_eq!(out.unassigned.len(), 1);
        assert_eq!(out.unassigned[0].value, "B");
    }

    #[test]
    fn test_size_and_type_compound() {
        let out = classify(&["1.5AVS"]);
        assert_eq!(out.fields.get(OutputField::WireType), Some("AVS"));
        assert_eq!(out.fields.get(OutputField::WireSize), Some("1.5"));
    }

    #[test]
    fn test_cavs_not_misread_as_avs() {
        let out = classify(&["0.5CAVS"]);
        assert_eq!(out.fields.get(OutputField::WireType), Some("CAVS"));
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0.5"));
    }

    #[test]
    fn test_size_keeps_comma_spelling() {
        let out = classify(&["0,5 FLRY"]);
        assert_eq!(out.fields.get(OutputField::WireType), Some("FLRY"));
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0,5"));
    }

    #[test]
    fn test_bare_type_without_size() {
        let out = classify(&["AVSS"]);
        assert_eq!(out.fields.get(OutputField::WireType), Some("AVSS"));
        assert_eq!(out.fields.get(OutputField::WireSize), None);
    }

    #[test]
    fn test_non_numeric_prefix_rejected() {
        // Falls through to stage 3 as a connector name instead.
        let out = classify(&["HARNESS-T1"]);
        assert_eq!(out.fields.get(OutputField::WireType), None);
        assert_eq!(out.fields.get(OutputField::ConnectorStart), Some("HARNESS-T1"));
    }

    #[test]
    fn test_out_of_range_prefix_rejected() {
        let out = classify(&["12AVSS"]);
        assert_eq!(out.fields.get(OutputField::WireType), None);
        assert_eq!(out.fields.get(OutputField::WireSize), None);
    }

    #[test]
    fn test_cut_length_range() {
        let out = classify(&["150"]);
        assert_eq!(out.fields.get(OutputField::CutLength), Some("150"));

        let out = classify(&["3000"]);
        assert_eq!(out.fields.get(OutputField::CutLength), None);
        assert_eq!(out.unassigned.len(), 1);
        assert_eq!(out.assignments.len(), 0);
    }

    #[test]
    fn test_bare_size() {
        let out = classify(&["0,35"]);
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0,35"));
    }

    #[test]
    fn test_small_integer_is_size_not_length() {
        let out = classify(&["2"]);
        assert_eq!(out.fields.get(OutputField::WireSize), Some("2"));
        assert_eq!(out.fields.get(OutputField::CutLength), None);
    }

    #[test]
    fn test_long_decimal_not_size() {
        let out = classify(&["0.12345"]);
        assert_eq!(out.fields.get(OutputField::WireSize), None);
    }

    #[test]
    fn test_compound_size_blocks_bare_size() {
        let out = classify(&["0.5", "0.75AVSS"]);
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0.75"));
        assert_eq!(out.unassigned[0].value, "0.5");
    }

    #[test]
    fn test_code_before_connectors() {
        let out = classify(&["W101", "CN-ECU", "CN-HEAD1"]);
        assert_eq!(out.fields.get(OutputField::WireCode), Some("W101"));
        assert_eq!(out.fields.get(OutputField::ConnectorStart), Some("CN-ECU"));
        assert_eq!(out.fields.get(OutputField::ConnectorEnd), Some("CN-HEAD1"));
    }

    #[test]
    fn test_long_name_skips_code_slot() {
        let out = classify(&["CONNECTOR-ECU1", "W7A"]);
        assert_eq!(out.fields.get(OutputField::ConnectorStart), Some("CONNECTOR-ECU1"));
        assert_eq!(out.fields.get(OutputField::WireCode), Some("W7A"));
    }

    #[test]
    fn test_full_row() {
        let out = classify(&["W101", "R", "0.5AVSS", "350", "CN-ECU1", "CN-LMP2"]);
        assert_eq!(out.fields.get(OutputField::WireCode), Some("W101"));
        assert_eq!(out.fields.get(OutputField::Color), Some("R"));
        assert_eq!(out.fields.get(OutputField::WireType), Some("AVSS"));
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0.5"));
        assert_eq!(out.fields.get(OutputField::CutLength), Some("350"));
        assert_eq!(out.fields.get(OutputField::ConnectorStart), Some("CN-ECU1"));
        assert_eq!(out.fields.get(OutputField::ConnectorEnd), Some("CN-LMP2"));
        assert!(out.unassigned.is_empty());
        assert_eq!(out.fields.get(OutputField::Index), None);
    }

    #[test]
    fn test_undeclared_field_falls_through() {
        let declared: BTreeSet<OutputField> =
            [OutputField::WireCode, OutputField::ConnectorStart].into_iter().collect();
        let out = classify_row(&row(&["R", "150", "W101"]), &declared, &Calibration::default());
        assert_eq!(out.fields.get(OutputField::Color), None);
        assert_eq!(out.fields.get(OutputField::CutLength), None);
        assert_eq!(out.fields.get(OutputField::WireCode), Some("W101"));
        assert_eq!(out.unassigned.len(), 2);
    }

    #[test]
    fn test_each_field_assigned_at_most_once() {
        let rows: [&[&str]; 4] = [
            &["R", "B", "G", "0.5AVSS", "0.75AVS", "100", "200", "0.5", "W1A", "W2B"],
            &["CN-A1", "CN-B2", "CN-C3", "CN-D4", "T1", "T2", "300"],
            &["1.5", "2.0", "2,5", "AVSS", "FLRY", "GY", "LB"],
            &["X", "", "9999", "12345678901234567", "PI", "P", "CODE1"],
        ];
        for values in rows {
            let out = classify(values);
            let mut fields: Vec<OutputField> = Vec::new();
            for a in &out.assignments {
                assert!(!fields.contains(&a.field), "{:?} assigned twice", a.field);
                fields.push(a.field);
            }
            // exactly-once consumption: every token is either assigned or left over
            let consumed: BTreeSet<String> =
                out.assignments.iter().map(|a| format!("{}@{}", a.token, a.x)).collect();
            assert_eq!(consumed.len() + out.unassigned.len(), values.len());
        }
    }

    #[test]
    fn test_compound_sizes_without_type_column() {
        let declared: BTreeSet<OutputField> =
            [OutputField::Color, OutputField::WireSize, OutputField::CutLength]
                .into_iter()
                .collect();
        let out = classify_row(
            &row(&["R", "0.5AVSS", "300"]),
            &declared,
            &Calibration::default(),
        );
        assert_eq!(out.fields.get(OutputField::WireSize), Some("0.5"));
        assert_eq!(out.fields.get(OutputField::WireType), None);
        assert_eq!(out.fields.get(OutputField::CutLength), Some("300"));
        assert!(out.unassigned.is_empty());

        // A bare type has nothing to give and stays unassigned.
        let out = classify_row(&row(&["AVSS"]), &declared, &Calibration::default());
        assert_eq!(out.unassigned.len(), 1);
    }

    #[test]
    fn test_field_values_independent_of_x_order() {
        let original = row(&["W101", "R", "0.5AVSS", "350", "CN-ECU1", "CN-LMP2"]);
        let shuffled = row(&["350", "0.5AVSS", "R", "W101", "CN-ECU1", "CN-LMP2"]);

        let a = classify_row(&original, &all_fields(), &Calibration::default());
        let b = classify_row(&shuffled, &all_fields(), &Calibration::default());
        assert_eq!(a.fields, b.fields);

        let set = |out: &RowClassification| -> BTreeSet<(OutputField, String)> {
            out.assignments
                .iter()
                .map(|a| (a.field, a.value.clone()))
                .collect()
        };
        assert_eq!(set(&a), set(&b));
    }

    #[test]
    fn test_only_competing_tokens_depend_on_x_order() {
        // Two connector names compete for the start/end slots; everything
        // else has a single eligible token.
        let forward = classify(&["R", "350", "CN-ECU1", "CN-LMP2"]);
        let reversed = classify(&["CN-LMP2", "CN-ECU1", "350", "R"]);

        for field in [OutputField::Color, OutputField::CutLength] {
            assert_eq!(forward.fields.get(field), reversed.fields.get(field));
        }
        // CN-ECU1 and CN-LMP2 both fit the wire-code shape, so the leftmost
        // one takes the code slot and the other becomes the start connector.
        assert_eq!(forward.fields.get(OutputField::WireCode), Some("CN-ECU1"));
        assert_eq!(forward.fields.get(OutputField::ConnectorStart), Some("CN-LMP2"));
        assert_eq!(reversed.fields.get(OutputField::WireCode), Some("CN-LMP2"));
        assert_eq!(reversed.fields.get(OutputField::ConnectorStart), Some("CN-ECU1"));
    }

    #[test]
    fn test_assignments_record_stage() {
        let out = classify(&["W101", "R", "350"]);
        let stages: Vec<(OutputField, Stage)> =
            out.assignments.iter().map(|a| (a.field, a.stage)).collect();
        assert_eq!(
            stages,
            vec![
                (OutputField::Color, Stage::AbsoluteIdentifier),
                (OutputField::CutLength, Stage::BareNumber),
                (OutputField::WireCode, Stage::CodeOrConnector),
            ]
        );
    }
}

use wiretab_core::extraction::{Extraction, ExtractionPath};
use wiretab_core::mapping::schema::MappingDef;
use wiretab_core::model::OutputTable;
use wiretab_core::trace::TraceSeverity;

pub fn print(mapping: &MappingDef, extraction: &Extraction, verbose: bool) {
    let source = match extraction.path {
        ExtractionPath::Structured => "block attributes",
        ExtractionPath::Fallback => "text heuristics",
    };
    println!(
        "=== {} ({}) ===\n",
        extraction.table.record_type, mapping.name
    );
    println!("  Source: {source}\n");

    if extraction.table.rows.is_empty() {
        println!("  No rows extracted.\n");
    } else {
        print!("{}", format_table(&extraction.table));
        println!();
    }

    for w in &extraction.warnings {
        println!("  warning: {}", w.message);
    }

    if verbose {
        for row in &extraction.trace.rows {
            println!("  row {} (y={:.2})", row.row, row.mean_y);
            for a in &row.assignments {
                println!(
                    "    {:<16} {:<16} <- {} ({:?})",
                    a.field.to_string(),
                    a.value,
                    a.token,
                    a.stage
                );
            }
            if !row.unassigned.is_empty() {
                println!("    unassigned: {}", row.unassigned.join(", "));
            }
        }
    } else {
        let info = extraction
            .trace
            .warnings
            .iter()
            .filter(|w| w.severity == TraceSeverity::Info)
            .count();
        if info > 0 {
            println!("  {info} row(s) with unassigned tokens (use --verbose for details)");
        }
    }
    println!();
}

/// Render with every column as wide as its widest cell.
pub fn format_table(table: &OutputTable) -> String {
    let records = table.records();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            records
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format_line(&table.columns, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format_line(&rule, &widths));
    for record in records {
        out.push_str(&format_line(&record, &widths));
    }
    out
}

fn format_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c.as_ref(), w = *w))
        .collect();
    format!("  {}\n", padded.join("  ").trim_end())
}

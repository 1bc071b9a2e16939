//! LaTeX `tabular` emission.
//!
//! Cells are written as-is. Identifiers may contain `_`, `#`, `$` or `*`;
//! callers pasting into a document that needs escaping must handle it.

use aam_model::Table;

/// Render the table as a floating `tabular` with a caption row.
///
/// The label column is separated from the benchmark columns by a rule and a
/// horizontal rule follows the header row.
pub fn table_to_latex(table: &Table, title: &str) -> String {
    let benchmark_columns = vec!["l"; table.column_count().saturating_sub(1)].join(" ");
    let mut latex = String::from("\\begin{table}[H]\n");
    latex.push_str(&format!("\\begin{{tabular}}{{l|{benchmark_columns}}}\n"));
    for (idx, row) in table.rows().iter().enumerate() {
        latex.push_str(&row.join(" & "));
        latex.push_str(" \\\\\n");
        if idx == 0 {
            latex.push_str("\\hline\n");
        }
    }
    latex.push_str(&format!(
        "\\multicolumn{{{}}}{{c}}{{{title}}}\n",
        table.column_count()
    ));
    latex.push_str("\\end{tabular}\n\\end{table}");
    latex
}

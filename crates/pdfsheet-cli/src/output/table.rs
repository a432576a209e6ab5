use pdfsheet_core::model::Table;

pub fn print(tables: &[Table]) {
    if tables.is_empty() {
        println!("No tables detected.");
        return;
    }

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "=== Sheet{} ({} row(s), {} column(s)) ===\n",
            i + 1,
            table.rows.len(),
            table.column_count()
        );
        print_rows(table);
    }
}

fn print_rows(table: &Table) {
    // Column widths over all rows; rows from other extractors may be ragged.
    let mut widths: Vec<usize> = Vec::new();
    for row in &table.rows {
        for (c, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(c) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    for (r, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| format!("{:<width$}", cell, width = widths[c]))
            .collect();
        println!("  {}", cells.join("  ").trim_end());

        // Underline the header
        if r == 0 && table.rows.len() > 1 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            println!("  {}", rule.join("  "));
        }
    }
}

use crate::model::Table;

/// Split text lines into tables.
///
/// A table is a run of non-blank lines with the same number of
/// whitespace-separated tokens. A blank line closes the open table; a line
/// with a different token count closes it and opens a new one. The first row
/// of every table is its header.
pub fn detect_tables<S: AsRef<str>>(lines: &[S]) -> Vec<Table> {
    let mut detector = TableDetector::default();
    for line in lines {
        detector.push_line(line.as_ref());
    }
    detector.finish()
}

/// Cell separators: Unicode whitespace plus the C0 information separators
/// `\x1c`..`\x1f`, which a single-byte decode can produce.
fn is_cell_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(is_cell_separator)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Default)]
struct TableDetector {
    tables: Vec<Table>,
    open_block: Vec<Vec<String>>,
    expected_width: Option<usize>,
}

impl TableDetector {
    fn push_line(&mut self, line: &str) {
        let cells = split_cells(line);
        if cells.is_empty() {
            self.close_block();
            return;
        }

        if self.expected_width.is_some_and(|w| w != cells.len()) {
            self.close_block();
        }
        self.expected_width = Some(cells.len());
        self.open_block.push(cells);
    }

    fn close_block(&mut self) {
        if !self.open_block.is_empty() {
            let rows = std::mem::take(&mut self.open_block);
            self.tables.push(Table::new(rows));
        }
        self.expected_width = None;
    }

    fn finish(mut self) -> Vec<Table> {
        self.close_block();
        self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rows(table: &Table) -> Vec<Vec<&str>> {
        table
            .rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_blank_line_and_width_change_split_tables() {
        let lines = ["a b c", "1 2 3", "4 5 6", "", "x y", "7 8"];
        let tables = detect_tables(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(
            rows(&tables[0]),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"], vec!["4", "5", "6"]]
        );
        assert_eq!(rows(&tables[1]), vec![vec!["x", "y"], vec!["7", "8"]]);
    }

    #[test]
    fn test_width_change_without_blank_line() {
        let lines = ["a b", "1 2", "x y z", "7 8 9"];
        let tables = detect_tables(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].column_count(), 2);
        assert_eq!(tables[1].column_count(), 3);
    }

    #[test]
    fn test_single_line_is_a_table() {
        let tables = detect_tables(&["", "lonely line here", "   "]);
        assert_eq!(tables.len(), 1);
        assert_eq!(rows(&tables[0]), vec![vec!["lonely", "line", "here"]]);
    }

    #[test]
    fn test_repeated_blank_lines_are_no_ops() {
        let tables = detect_tables(&["", "\t", "a b", "", "", "c d"]);
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn test_no_lines_no_tables() {
        let lines: [&str; 0] = [];
        assert!(detect_tables(&lines).is_empty());
    }

    #[test]
    fn test_information_separators_split_cells() {
        let tables = detect_tables(&["a\x1fb c", "\x1c\x1d", "x\u{a0}y\u{85}z"]);
        assert_eq!(tables.len(), 1);
        assert_eq!(
            rows(&tables[0]),
            vec![vec!["a", "b", "c"], vec!["x", "y", "z"]]
        );
    }

    #[test]
    fn test_tokens_split_on_whitespace_runs() {
        let tables = detect_tables(&["  Name \t  Age  "]);
        assert_eq!(rows(&tables[0]), vec![vec!["Name", "Age"]]);
    }

    /// Reference partition: start a new group at every blank line and at
    /// every change in token count.
    fn expected_partition(lines: &[String]) -> Vec<Vec<Vec<String>>> {
        let mut groups: Vec<Vec<Vec<String>>> = Vec::new();
        let mut previous: Option<usize> = None;
        for line in lines {
            let cells: Vec<String> = line
                .split(is_cell_separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if cells.is_empty() {
                previous = None;
                continue;
            }
            match (previous, groups.last_mut()) {
                (Some(w), Some(group)) if w == cells.len() => group.push(cells.clone()),
                _ => groups.push(vec![cells.clone()]),
            }
            previous = Some(cells.len());
        }
        groups
    }

    proptest! {
        #[test]
        fn prop_tables_partition_lines(lines in prop::collection::vec("[a-c \\x1f]{0,8}", 0..40)) {
            let tables = detect_tables(&lines);
            let got: Vec<Vec<Vec<String>>> = tables.iter().map(|t| t.rows.clone()).collect();
            prop_assert_eq!(&got, &expected_partition(&lines));
            for table in &tables {
                let width = table.column_count();
                prop_assert!(width > 0);
                prop_assert!(table.rows.iter().all(|r| r.len() == width));
            }
        }
    }
}

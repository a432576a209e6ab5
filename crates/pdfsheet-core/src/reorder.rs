use crate::model::Table;

/// A column order for one table: `order[i]` is the source column that ends up
/// at position `i`. Always a permutation of `0..header.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPermutation {
    order: Vec<usize>,
}

impl ColumnPermutation {
    /// Put the columns named in `priority` first, in priority order, then the
    /// remaining columns in their original order.
    ///
    /// Names are matched case-sensitively against the header; a name selects
    /// the first column carrying it. Unknown and repeated names are skipped.
    pub fn for_header<S: AsRef<str>>(header: &[String], priority: &[S]) -> Self {
        let mut placed = vec![false; header.len()];
        let mut order = Vec::with_capacity(header.len());

        for name in priority {
            let name = name.as_ref();
            if let Some(idx) = header.iter().position(|h| h == name) {
                if !placed[idx] {
                    placed[idx] = true;
                    order.push(idx);
                }
            }
        }
        order.extend((0..header.len()).filter(|&i| !placed[i]));

        ColumnPermutation { order }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(pos, &src)| pos == src)
    }

    /// Reorder one row. Missing cells in a short row become empty strings,
    /// and the result always has exactly `len()` cells.
    pub fn apply(&self, row: &[String]) -> Vec<String> {
        self.order
            .iter()
            .map(|&src| row.get(src).cloned().unwrap_or_default())
            .collect()
    }
}

/// Move the priority columns of `table` to the front.
///
/// The permutation is computed from the header and applied to every row,
/// header included, so labels travel with their data.
pub fn reorder_table<S: AsRef<str>>(table: Table, priority: &[S]) -> Table {
    let Some(header) = table.header() else {
        return table;
    };

    let permutation = ColumnPermutation::for_header(header, priority);
    if permutation.is_identity() && table.rows.iter().all(|r| r.len() == permutation.len()) {
        return table;
    }

    let rows = table.rows.iter().map(|r| permutation.apply(r)).collect();
    Table::new(rows)
}

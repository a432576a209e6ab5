//! A1-style cell references.
//!
//! Columns use bijective base-26: there is no zero digit, so `A` is 0,
//! `Z` is 25 and `AA` is 26.

/// Column letters for a zero-based column index.
pub fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Cell reference for a one-based row and zero-based column, e.g. `(1, 27)` -> `AB1`.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row)
}

/// Parse a cell reference back into `(row, col)` with a one-based row and a
/// zero-based column. Lowercase letters and `$` anchors are not accepted.
pub fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let split = reference
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('0') {
        return None;
    }

    let mut col: usize = 0;
    for b in letters.bytes() {
        col = col
            .checked_mul(26)?
            .checked_add(usize::from(b - b'A') + 1)?;
    }
    let row = digits.parse().ok()?;
    Some((row, col - 1))
}

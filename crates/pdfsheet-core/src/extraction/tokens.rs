//! Recovers text drawn by `Tj`/`TJ` operators from raw PDF bytes.
//!
//! This is a byte scanner, not a PDF parser. It only finds literal string
//! operands in uncompressed content streams and makes no attempt to decode
//! escapes or fonts. `TJ` is treated like `Tj`, so only a literal directly
//! before the operator counts: `[(a) 10 (b)] TJ` recovers nothing because the
//! closing bracket sits between `(b)` and `TJ`.

/// Text-show operators whose literal operand is recovered.
const TEXT_SHOW_OPERATORS: [&[u8; 2]; 2] = [b"Tj", b"TJ"];

/// Whitespace allowed between a literal operand and its operator.
const OPERAND_WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Characters that end a line in the joined text.
const LINE_TERMINATORS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}',
];

/// Extract text lines from PDF bytes.
///
/// Each literal operand followed by a text-show operator contributes one
/// fragment; fragments are joined with newlines and split into lines. Never
/// fails: unrecognised content yields no lines.
pub fn extract_lines(pdf_bytes: &[u8]) -> Vec<String> {
    let fragments = scan_text_fragments(pdf_bytes);
    let text = fragments
        .iter()
        .map(|f| decode_single_byte(f))
        .collect::<Vec<_>>()
        .join("\n");
    split_lines(&text)
}

/// Find the interior byte runs of `( ... ) Tj` and `( ... ) TJ` in stream order.
fn scan_text_fragments(bytes: &[u8]) -> Vec<&[u8]> {
    let mut fragments = Vec::new();
    // Start of the open literal's interior, if inside one.
    let mut open: Option<usize> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match open {
            None => {
                if b == b'(' {
                    open = Some(i + 1);
                    escaped = false;
                }
            }
            Some(start) => {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'(' {
                    // Nested literals are not supported; restart at the inner one.
                    open = Some(i + 1);
                } else if b == b')' {
                    open = None;
                    if let Some(after) = text_show_operator_end(bytes, i + 1) {
                        fragments.push(&bytes[start..i]);
                        i = after;
                        continue;
                    }
                }
            }
        }
        i += 1;
    }

    fragments
}

/// If a text-show operator follows `pos` (after optional whitespace), return
/// the position just past it.
fn text_show_operator_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut j = pos;
    while j < bytes.len() && OPERAND_WHITESPACE.contains(&bytes[j]) {
        j += 1;
    }
    let token = bytes.get(j..j + 2)?;
    TEXT_SHOW_OPERATORS
        .iter()
        .any(|op| token == op.as_slice())
        .then_some(j + 2)
}

/// Latin-1 decode: every byte maps to the code point of the same value.
fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(LINE_TERMINATORS) {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let tail = &rest[pos..];
                let skip = if tail.starts_with("\r\n") {
                    2
                } else {
                    tail.chars().next().map_or(1, char::len_utf8)
                };
                rest = &tail[skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

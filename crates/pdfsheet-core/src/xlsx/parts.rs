//! Builders for the XML parts of a minimal SpreadsheetML package.
//!
//! The package holds exactly the parts a reader needs and nothing it would
//! have to resolve elsewhere: no styles, no shared strings, no document
//! properties.

use std::borrow::Cow;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::PdfSheetError;
use crate::model::Sheet;
use crate::xlsx::address::cell_ref;

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_SPREADSHEET: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_DOC_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

/// Archive path of the `index`-th worksheet (1-based).
pub fn worksheet_path(index: usize) -> String {
    format!("xl/worksheets/sheet{index}.xml")
}

/// Relationship id linking the workbook to its `index`-th worksheet (1-based).
pub fn worksheet_rel_id(index: usize) -> String {
    format!("rId{index}")
}

/// `[Content_Types].xml`
pub fn content_types(sheet_count: usize) -> Result<Vec<u8>, PdfSheetError> {
    let mut writer = start_part()?;

    let mut types = BytesStart::new("Types");
    types.push_attribute(("xmlns", NS_CONTENT_TYPES));
    writer.write_event(Event::Start(types))?;

    for (extension, content_type) in [("rels", CT_RELATIONSHIPS), ("xml", CT_XML)] {
        let mut default = BytesStart::new("Default");
        default.push_attribute(("Extension", extension));
        default.push_attribute(("ContentType", content_type));
        writer.write_event(Event::Empty(default))?;
    }

    write_override(&mut writer, &format!("/{WORKBOOK_PATH}"), CT_WORKBOOK)?;
    for i in 1..=sheet_count {
        write_override(&mut writer, &format!("/{}", worksheet_path(i)), CT_WORKSHEET)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Types")))?;
    Ok(finish_part(writer))
}

fn write_override(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    part_name: &str,
    content_type: &str,
) -> Result<(), PdfSheetError> {
    let mut el = BytesStart::new("Override");
    el.push_attribute(("PartName", part_name));
    el.push_attribute(("ContentType", content_type));
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

/// `_rels/.rels`: the package root points at the workbook.
pub fn root_rels() -> Result<Vec<u8>, PdfSheetError> {
    relationships(&[("rId1".to_string(), REL_OFFICE_DOCUMENT, WORKBOOK_PATH.to_string())])
}

/// `xl/_rels/workbook.xml.rels`: one worksheet relationship per sheet.
pub fn workbook_rels(sheet_count: usize) -> Result<Vec<u8>, PdfSheetError> {
    let rels: Vec<_> = (1..=sheet_count)
        .map(|i| {
            (
                worksheet_rel_id(i),
                REL_WORKSHEET,
                format!("worksheets/sheet{i}.xml"),
            )
        })
        .collect();
    relationships(&rels)
}

fn relationships(rels: &[(String, &str, String)]) -> Result<Vec<u8>, PdfSheetError> {
    let mut writer = start_part()?;

    let mut root = BytesStart::new("Relationships");
    root.push_attribute(("xmlns", NS_PACKAGE_RELS));
    writer.write_event(Event::Start(root))?;

    for (id, rel_type, target) in rels {
        let mut rel = BytesStart::new("Relationship");
        rel.push_attribute(("Id", id.as_str()));
        rel.push_attribute(("Type", *rel_type));
        rel.push_attribute(("Target", target.as_str()));
        writer.write_event(Event::Empty(rel))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(finish_part(writer))
}

/// `xl/workbook.xml`: sheet `i` is bound to relationship `rId{i}`.
pub fn workbook(sheets: &[Sheet]) -> Result<Vec<u8>, PdfSheetError> {
    let mut writer = start_part()?;

    let mut root = BytesStart::new("workbook");
    root.push_attribute(("xmlns", NS_SPREADSHEET));
    root.push_attribute(("xmlns:r", NS_DOC_RELS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("sheets")))?;

    for (i, sheet) in sheets.iter().enumerate() {
        let index = i + 1;
        let mut el = BytesStart::new("sheet");
        el.push_attribute(("name", sheet.name.as_str()));
        el.push_attribute(("sheetId", index.to_string().as_str()));
        el.push_attribute(("r:id", worksheet_rel_id(index).as_str()));
        writer.write_event(Event::Empty(el))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheets")))?;
    writer.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(finish_part(writer))
}

/// `xl/worksheets/sheet{i}.xml`: every cell is an inline string.
pub fn worksheet(rows: &[Vec<String>]) -> Result<Vec<u8>, PdfSheetError> {
    let mut writer = start_part()?;

    let mut root = BytesStart::new("worksheet");
    root.push_attribute(("xmlns", NS_SPREADSHEET));
    writer.write_event(Event::Start(root))?;

    if rows.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("sheetData")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("sheetData")))?;
        for (r, row) in rows.iter().enumerate() {
            let row_number = r + 1;
            let mut row_el = BytesStart::new("row");
            row_el.push_attribute(("r", row_number.to_string().as_str()));
            writer.write_event(Event::Start(row_el))?;
            for (col, value) in row.iter().enumerate() {
                write_inline_string_cell(&mut writer, &cell_ref(row_number, col), value)?;
            }
            writer.write_event(Event::End(BytesEnd::new("row")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(finish_part(writer))
}

fn write_inline_string_cell(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    reference: &str,
    value: &str,
) -> Result<(), PdfSheetError> {
    let mut cell = BytesStart::new("c");
    cell.push_attribute(("r", reference));
    cell.push_attribute(("t", "inlineStr"));
    writer.write_event(Event::Start(cell))?;
    writer.write_event(Event::Start(BytesStart::new("is")))?;

    let mut t = BytesStart::new("t");
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        t.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(t))?;
    if has_xml_forbidden(value) {
        log::warn!("cell {reference}: encoded characters not allowed in XML");
    }
    let text = encode_xstring(value);
    writer.write_event(Event::Text(BytesText::new(&text)))?;
    writer.write_event(Event::End(BytesEnd::new("t")))?;

    writer.write_event(Event::End(BytesEnd::new("is")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn start_part() -> Result<Writer<Cursor<Vec<u8>>>, PdfSheetError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn finish_part(writer: Writer<Cursor<Vec<u8>>>) -> Vec<u8> {
    writer.into_inner().into_inner()
}

/// Apply the OOXML `_xHHHH_` escape to characters XML 1.0 cannot carry.
///
/// A literal `_xHHHH_` run gets its underscore escaped as `_x005F_` so a
/// reader does not decode it. Markup characters are left to the XML writer.
pub fn encode_xstring(text: &str) -> Cow<'_, str> {
    if !text
        .char_indices()
        .any(|(i, c)| is_xml_forbidden(c) || (c == '_' && is_escape_run(&text[i..])))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for (i, c) in text.char_indices() {
        if is_xml_forbidden(c) {
            out.push_str(&format!("_x{:04X}_", u32::from(c)));
        } else if c == '_' && is_escape_run(&text[i..]) {
            out.push_str("_x005F_");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Does `text` hold a character that XML 1.0 cannot carry?
pub fn has_xml_forbidden(text: &str) -> bool {
    text.chars().any(is_xml_forbidden)
}

fn is_xml_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Does `s` start with `_xHHHH_`?
fn is_escape_run(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    fn sheet(name: &str, rows: &[&[&str]]) -> Sheet {
        Sheet {
            name: name.to_string(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_every_part_has_utf8_declaration() {
        let parts = [
            content_types(1).unwrap(),
            root_rels().unwrap(),
            workbook(&[sheet("Sheet1", &[])]).unwrap(),
            workbook_rels(1).unwrap(),
            worksheet(&[]).unwrap(),
        ];
        for part in parts {
            assert!(text(part).starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        }
    }

    #[test]
    fn test_content_types_override_per_sheet() {
        let xml = text(content_types(2).unwrap());
        assert!(xml.contains(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#));
        assert!(xml.contains(r#"<Default Extension="xml" ContentType="application/xml"/>"#));
        assert!(xml.contains(r#"PartName="/xl/workbook.xml""#));
        assert!(xml.contains(r#"PartName="/xl/worksheets/sheet1.xml""#));
        assert!(xml.contains(r#"PartName="/xl/worksheets/sheet2.xml""#));
        assert!(!xml.contains("sheet3.xml"));
        assert!(!xml.contains("styles"));
    }

    #[test]
    fn test_content_types_without_sheets() {
        let xml = text(content_types(0).unwrap());
        assert!(xml.contains("/xl/workbook.xml"));
        assert!(!xml.contains("worksheet+xml"));
    }

    #[test]
    fn test_root_rels_points_at_workbook() {
        let xml = text(root_rels().unwrap());
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="xl/workbook.xml""#));
        assert!(xml.contains("relationships/officeDocument"));
    }

    #[test]
    fn test_workbook_and_rels_agree() {
        let sheets = [sheet("Sheet1", &[]), sheet("Sheet2", &[])];
        let wb = text(workbook(&sheets).unwrap());
        let rels = text(workbook_rels(2).unwrap());
        for i in 1..=2 {
            assert!(wb.contains(&format!(
                r#"<sheet name="Sheet{i}" sheetId="{i}" r:id="rId{i}"/>"#
            )));
            assert!(rels.contains(&format!(
                r#"Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml""#
            )));
        }
    }

    #[test]
    fn test_worksheet_cells() {
        let xml = text(worksheet(&sheet("Sheet1", &[&["id", "name"], &["1", "Ann"]]).rows).unwrap());
        assert!(xml.contains(r#"<row r="1"><c r="A1" t="inlineStr"><is><t>id</t></is></c><c r="B1" t="inlineStr"><is><t>name</t></is></c></row>"#));
        assert!(xml.contains(r#"<c r="B2" t="inlineStr"><is><t>Ann</t></is></c>"#));
    }

    #[test]
    fn test_worksheet_escapes_markup() {
        let xml = text(worksheet(&sheet("Sheet1", &[&["a<b", "x&y", "\"q\""]]).rows).unwrap());
        assert!(xml.contains("a&lt;b"));
        assert!(xml.contains("x&amp;y"));
        assert!(xml.contains("&quot;q&quot;"));
        assert!(!xml.contains("a<b"));
    }

    #[test]
    fn test_worksheet_empty_and_padded_cells() {
        let xml = text(worksheet(&sheet("Sheet1", &[&["a", ""], &[" x"]]).rows).unwrap());
        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t></t></is></c>"#));
        assert!(xml.contains(r#"<t xml:space="preserve"> x</t>"#));
    }

    #[test]
    fn test_worksheet_without_rows() {
        let xml = text(worksheet(&[]).unwrap());
        assert!(xml.ends_with("<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\"><sheetData/></worksheet>"));
    }

    #[test]
    fn test_encode_xstring() {
        assert!(matches!(encode_xstring("plain & simple"), Cow::Borrowed(_)));
        assert_eq!(encode_xstring("a\u{1}b"), "a_x0001_b");
        assert_eq!(encode_xstring("tab\tok"), "tab\tok");
        assert_eq!(encode_xstring("_x0041_"), "_x005F_x0041_");
        assert_eq!(encode_xstring("_x41_"), "_x41_");
    }

    #[test]
    fn test_escape_run_alone_is_not_forbidden() {
        assert!(matches!(encode_xstring("_x0041_"), Cow::Owned(_)));
        assert!(!has_xml_forbidden("_x0041_"));
        assert!(has_xml_forbidden("a\u{1}b"));
        assert!(!has_xml_forbidden("tab\tok\r\n"));
    }
}

#![allow(dead_code)]

use base64::Engine;
use hkt::domain::model::EXPECTED_COLUMNS;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_private_key.pem");

/// Base64 encoded service account key whose token endpoint is `token_uri`.
pub fn service_account_key_base64(token_uri: &str) -> String {
    let key = serde_json::json!({
        "type": "service_account",
        "client_email": "hkt-test@hkt.iam.gserviceaccount.com",
        "private_key_id": "test-key-1",
        "private_key": TEST_PRIVATE_KEY,
        "token_uri": token_uri,
    });
    base64::engine::general_purpose::STANDARD.encode(key.to_string())
}

pub fn header_row() -> Vec<String> {
    EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// `home_slots` are indexes 0..10 (Monday morning .. Friday afternoon) marked with 1.
pub fn child_row(name: &str, group: &str, home_slots: &[usize], comment: &str) -> Vec<String> {
    let mut row = vec![name.to_string(), group.to_string()];
    for slot in 0..10 {
        row.push(if home_slots.contains(&slot) { "1" } else { "" }.to_string());
    }
    row.push(String::new());
    row.push(comment.to_string());
    row
}

/// Two groups: Bears (Mia, Ben) and Foxes (Ada).
pub fn sample_rows() -> Vec<Vec<String>> {
    vec![
        header_row(),
        child_row("Mia", "Bears", &[0, 1], ""),
        child_row("Ben", "Bears", &[0, 9], "picked up by grandma"),
        child_row("Ada", "Foxes", &[], ""),
    ]
}

fn column_name(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}

fn sheet_xml(rows: &[Vec<String>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_name(c), r + 1);
            if value.parse::<f64>().is_ok() {
                xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
            } else {
                xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    cell_ref,
                    quick_xml::escape::escape(value.as_str())
                ));
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Writes a minimal single-sheet xlsx workbook.
pub fn write_xlsx(path: &Path, rows: &[Vec<String>]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

/// Reads one entry of a zip container (DOCX) as text.
pub fn read_zip_entry(path: &Path, entry: &str) -> anyhow::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut content = String::new();
    std::io::Read::read_to_string(&mut archive.by_name(entry)?, &mut content)?;
    Ok(content)
}

//! Minimal WordprocessingML writer for daily overview tables.
//!
//! A `.docx` file is a ZIP package of XML parts; only the parts Word needs
//! to open a single-table document are written.

use crate::domain::model::OverviewSheet;
use crate::utils::error::Result;
use quick_xml::escape::escape;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// 0.5 inch，單位 twip
const VERTICAL_MARGIN: u32 = 720;
const HORIZONTAL_MARGIN: u32 = 1440;
/// A4
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;

const BORDER: &str = r#"w:val="single" w:sz="4" w:space="0" w:color="000000""#;

pub fn build_overview_docx(sheet: &OverviewSheet) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml().as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(rels_xml().as_bytes())?;

    zip.start_file("docProps/core.xml", options)?;
    zip.write_all(core_props_xml(&sheet.title()).as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(sheet).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#
}

fn core_props_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
<dc:title>{}</dc:title>
<dc:creator>hkt</dc:creator>
</cp:coreProperties>"#,
        escape(title)
    )
}

/// 儲存格內換行轉成 `<w:br/>`
fn run_xml(text: &str, bold: bool) -> String {
    let mut run = String::from("<w:r>");
    if bold {
        run.push_str("<w:rPr><w:b/></w:rPr>");
    }
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run.push_str("<w:br/>");
        }
        run.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)));
    }
    run.push_str("</w:r>");
    run
}

fn cell_xml(text: &str, width: u32, bold: bool) -> String {
    format!(
        concat!(
            "<w:tc><w:tcPr>",
            r#"<w:tcW w:w="{width}" w:type="dxa"/>"#,
            "<w:tcBorders><w:top {b}/><w:left {b}/><w:bottom {b}/><w:right {b}/></w:tcBorders>",
            r#"<w:shd w:val="clear" w:color="auto" w:fill="FFFFFF"/>"#,
            "</w:tcPr><w:p>{run}</w:p></w:tc>"
        ),
        width = width,
        b = BORDER,
        run = run_xml(text, bold)
    )
}

fn document_xml(sheet: &OverviewSheet) -> String {
    let headers = sheet.headers();
    let column_width = (PAGE_WIDTH - 2 * HORIZONTAL_MARGIN) / headers.len() as u32;

    let mut body = String::new();
    body.push_str(&format!("<w:p>{}</w:p>", run_xml(&sheet.title(), true)));

    body.push_str("<w:tbl><w:tblPr>");
    body.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    body.push_str(&format!(
        "<w:tblBorders><w:top {b}/><w:left {b}/><w:bottom {b}/><w:right {b}/><w:insideH {b}/><w:insideV {b}/></w:tblBorders>",
        b = BORDER
    ));
    body.push_str("</w:tblPr><w:tblGrid>");
    for _ in &headers {
        body.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, column_width));
    }
    body.push_str("</w:tblGrid>");

    body.push_str("<w:tr>");
    for header in &headers {
        body.push_str(&cell_xml(header, column_width, true));
    }
    body.push_str("</w:tr>");

    for row in &sheet.rows {
        body.push_str("<w:tr>");
        for value in row {
            body.push_str(&cell_xml(value, column_width, false));
        }
        body.push_str("</w:tr>");
    }
    body.push_str("</w:tbl>");

    // Word 要求表格後面還有段落
    body.push_str("<w:p/>");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="{pw}" w:h="{ph}"/><w:pgMar w:top="{vm}" w:right="{hm}" w:bottom="{vm}" w:left="{hm}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        body = body,
        pw = PAGE_WIDTH,
        ph = PAGE_HEIGHT,
        vm = VERTICAL_MARGIN,
        hm = HORIZONTAL_MARGIN
    )
}

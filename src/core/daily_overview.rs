use crate::adapters::wkhtmltopdf::PdfRenderer;
use crate::core::docx::build_overview_docx;
use crate::core::html::render_overview_html;
use crate::domain::model::{Attendance, Child, DayPart, Mark, OverviewSheet, Roster, WEEKDAYS};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Weekday;
use std::path::PathBuf;

/// 名單輸出格式
#[derive(Debug, Clone)]
pub struct OverviewOptions {
    pub pdf: Option<PdfRenderer>,
    pub docx: bool,
    pub keep_html: bool,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            pdf: Some(PdfRenderer::new("wkhtmltopdf", Some(PathBuf::from("style.css")))),
            docx: true,
            keep_html: false,
        }
    }
}

fn slot_text(mark: &Mark, attendance: Attendance) -> String {
    if attendance.matches(mark) {
        return attendance.label().to_string();
    }
    match mark {
        Mark::Other(text) => text.clone(),
        _ => String::new(),
    }
}

/// 上午或下午符合即列入
pub fn build_overview_sheet(
    group: &str,
    children: &[&Child],
    weekday: Weekday,
    attendance: Attendance,
) -> OverviewSheet {
    let rows = children
        .iter()
        .filter(|child| {
            let day = child.day(weekday);
            attendance.matches(&day.morning) || attendance.matches(&day.afternoon)
        })
        .map(|child| {
            [
                child.name.clone(),
                child.group.clone(),
                slot_text(child.mark(weekday, DayPart::Morning), attendance),
                slot_text(child.mark(weekday, DayPart::Afternoon), attendance),
            ]
        })
        .collect();

    OverviewSheet {
        group: group.to_string(),
        weekday,
        attendance,
        rows,
    }
}

/// 每組 × 週一到週五 × （留在家、到 KITA）
pub fn overview_sheets(roster: &Roster) -> Vec<OverviewSheet> {
    let mut sheets = Vec::new();
    for (group, children) in roster.groups() {
        for weekday in WEEKDAYS {
            for attendance in Attendance::ALL {
                sheets.push(build_overview_sheet(group, &children, weekday, attendance));
            }
        }
    }
    sheets
}

pub async fn create_daily_overviews<S: Storage>(
    roster: &Roster,
    storage: &S,
    options: &OverviewOptions,
) -> Result<Vec<PathBuf>> {
    tracing::info!(
        "📝 Creating daily overviews in {}",
        storage.root().display()
    );
    storage.prepare().await?;

    let mut produced = Vec::new();
    for sheet in overview_sheets(roster) {
        let stem = sheet.file_stem();
        let html_name = format!("{}.html", stem);
        let html_path = storage
            .write_file(&html_name, render_overview_html(&sheet).as_bytes())
            .await?;

        if let Some(renderer) = &options.pdf {
            let pdf_path = storage.resolve(&format!("{}.pdf", stem));
            renderer.render(&html_path, &pdf_path).await?;
            produced.push(pdf_path);
        }

        if options.docx {
            let docx = build_overview_docx(&sheet)?;
            produced.push(storage.write_file(&format!("{}.docx", stem), &docx).await?);
        }

        if options.keep_html {
            produced.push(html_path);
        } else {
            storage.remove_file(&html_name).await?;
        }

        tracing::debug!("{}: {} children", stem, sheet.rows.len());
    }

    tracing::info!("✅ Created {} daily overview files", produced.len());
    Ok(produced)
}

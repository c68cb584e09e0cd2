use crate::domain::model::{Child, DayMarks, Mark, Roster, EXPECTED_COLUMNS};
use crate::utils::error::{HktError, Result};
use crate::utils::validation::validate_file_extension;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};

pub const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

const NAME_COL: usize = 0;
const GROUP_COL: usize = 1;
const FIRST_SLOT_COL: usize = 2;
const ASSIGNED_COL: usize = 12;
const COMMENTS_COL: usize = 13;

/// 讀取並驗證輸入檔（第一個工作表）
pub fn read_roster(path: &Path) -> Result<Roster> {
    validate_file_extension(
        "input_file",
        &path.display().to_string(),
        &WORKBOOK_EXTENSIONS,
    )?;

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| HktError::ValidationError {
            message: format!("{} contains no worksheet", path.display()),
        })??;

    let roster = parse_range(&range)?;
    tracing::info!(
        "📖 Read {} children in {} groups from {}",
        roster.len(),
        roster.groups().len(),
        path.display()
    );
    Ok(roster)
}

/// 在 blocking 執行緒讀取，避免卡住 runtime
pub async fn load_roster(path: PathBuf) -> Result<Roster> {
    tokio::task::spawn_blocking(move || read_roster(&path))
        .await
        .map_err(|e| HktError::ProcessingError {
            message: format!("workbook task failed: {}", e),
        })?
}

pub fn parse_range(range: &Range<Data>) -> Result<Roster> {
    let mut rows = range.rows();

    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .unwrap_or_default();
    validate_header(&header)?;

    let mut children = Vec::new();
    for (index, row) in rows.enumerate() {
        // 標題列是第 1 列
        let row_number = index + 2;

        if row.iter().all(is_blank) {
            continue;
        }

        let name = cell(row, NAME_COL).map(cell_text).unwrap_or_default();
        let group = cell(row, GROUP_COL).map(cell_text).unwrap_or_default();
        if group.is_empty() {
            tracing::warn!("⚠️ Row {} ({}) has no group, skipping", row_number, name);
            continue;
        }

        let mut week: [DayMarks; 5] = Default::default();
        for (day, marks) in week.iter_mut().enumerate() {
            let morning_col = FIRST_SLOT_COL + day * 2;
            marks.morning = cell(row, morning_col).map(cell_mark).unwrap_or(Mark::Kita);
            marks.afternoon = cell(row, morning_col + 1).map(cell_mark).unwrap_or(Mark::Kita);
        }

        children.push(Child {
            name,
            group,
            week,
            assigned_by_us: cell(row, ASSIGNED_COL).map(cell_text).unwrap_or_default(),
            comments: cell(row, COMMENTS_COL).map(cell_text).unwrap_or_default(),
        });
    }

    Ok(Roster { children })
}

fn validate_header(header: &[String]) -> Result<()> {
    if header.len() == EXPECTED_COLUMNS.len()
        && header.iter().zip(EXPECTED_COLUMNS.iter()).all(|(a, b)| a == b)
    {
        return Ok(());
    }

    tracing::debug!("Unexpected header: {:?}", header);
    Err(HktError::ValidationError {
        message: format!(
            "Columns of the input file are not as expected. Expected ordered set of columns: {:?}",
            EXPECTED_COLUMNS
        ),
    })
}

fn cell(row: &[Data], index: usize) -> Option<&Data> {
    row.get(index)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn header_text(cell: &Data) -> String {
    cell_text(cell).replace("\r\n", "\n")
}

/// 儲存格轉文字；整數值的浮點數不帶小數
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// 1 表示留在家，空白表示到 KITA
pub fn cell_mark(cell: &Data) -> Mark {
    match cell {
        Data::Empty => Mark::Kita,
        Data::Int(1) => Mark::Home,
        Data::Float(f) if *f == 1.0 => Mark::Home,
        Data::String(s) if s.trim().is_empty() => Mark::Kita,
        Data::String(s) if s.trim() == "1" => Mark::Home,
        other => Mark::Other(cell_text(other)),
    }
}

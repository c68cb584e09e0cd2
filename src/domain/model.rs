use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 一週上課日（週一到週五）
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// 輸入試算表的欄位，順序必須一致
pub const EXPECTED_COLUMNS: [&str; 14] = [
    "Name",
    "Group",
    "Monday\nmorning",
    "Monday\nafternoon",
    "Tuesday\nmorning",
    "Tuesday\nafternoon",
    "Wednesday\nmorning",
    "Wednesday\nafternoon",
    "Thursday\nmorning",
    "Thursday\nafternoon",
    "Friday\nmorning",
    "Friday\nafternoon",
    "Assigned by us?",
    "Comments",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
}

impl DayPart {
    pub const ALL: [DayPart; 2] = [DayPart::Morning, DayPart::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 試算表欄位標題，例如 `Monday\nmorning`
pub fn slot_column(day: Weekday, part: DayPart) -> String {
    format!("{}\n{}", weekday_name(day), part)
}

/// 單一半天的標記
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    /// 儲存格為 1：留在家
    Home,
    /// 空白：到 KITA
    Kita,
    /// 其他內容原樣保留
    Other(String),
}

impl Mark {
    pub fn is_home(&self) -> bool {
        matches!(self, Mark::Home)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMarks {
    pub morning: Mark,
    pub afternoon: Mark,
}

impl DayMarks {
    pub fn get(&self, part: DayPart) -> &Mark {
        match part {
            DayPart::Morning => &self.morning,
            DayPart::Afternoon => &self.afternoon,
        }
    }
}

impl Default for DayMarks {
    fn default() -> Self {
        Self {
            morning: Mark::Kita,
            afternoon: Mark::Kita,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    pub group: String,
    /// 週一到週五
    pub week: [DayMarks; 5],
    pub assigned_by_us: String,
    pub comments: String,
}

impl Child {
    pub fn day(&self, day: Weekday) -> &DayMarks {
        &self.week[day.num_days_from_monday() as usize]
    }

    pub fn mark(&self, day: Weekday, part: DayPart) -> &Mark {
        self.day(day).get(part)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub children: Vec<Child>,
}

impl Roster {
    /// 依組別分組，組名排序，組內維持原本列順序
    pub fn groups(&self) -> BTreeMap<&str, Vec<&Child>> {
        let mut groups: BTreeMap<&str, Vec<&Child>> = BTreeMap::new();
        for child in &self.children {
            groups.entry(child.group.as_str()).or_default().push(child);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attendance {
    StayAtHome,
    ComeToKita,
}

impl Attendance {
    pub const ALL: [Attendance; 2] = [Attendance::StayAtHome, Attendance::ComeToKita];

    pub fn label(&self) -> &'static str {
        match self {
            Attendance::StayAtHome => "Stay at home",
            Attendance::ComeToKita => "Come to KITA",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Attendance::StayAtHome => "stay_at_home",
            Attendance::ComeToKita => "come_to_kita",
        }
    }

    pub fn matches(&self, mark: &Mark) -> bool {
        matches!(
            (self, mark),
            (Attendance::StayAtHome, Mark::Home) | (Attendance::ComeToKita, Mark::Kita)
        )
    }
}

/// 某組某天某種出席狀態的名單
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewSheet {
    pub group: String,
    pub weekday: Weekday,
    pub attendance: Attendance,
    pub rows: Vec<[String; 4]>,
}

impl OverviewSheet {
    pub fn headers(&self) -> [String; 4] {
        [
            "Name".to_string(),
            "Group".to_string(),
            slot_column(self.weekday, DayPart::Morning),
            slot_column(self.weekday, DayPart::Afternoon),
        ]
    }

    pub fn title(&self) -> String {
        format!(
            "{}: {}, {}",
            self.attendance.label(),
            self.group,
            weekday_name(self.weekday)
        )
    }

    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.attendance.slug(),
            sanitize_file_component(&self.group),
            self.weekday.number_from_monday(),
            weekday_name(self.weekday)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub part: DayPart,
    pub at_home: usize,
    pub in_kita: usize,
}

impl SlotCount {
    pub fn label(&self) -> String {
        format!("{} {}", weekday_name(self.weekday), self.part)
    }
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDistribution {
    pub group: String,
    pub total: usize,
    pub slots: Vec<SlotCount>,
}

impl GroupDistribution {
    pub fn file_stem(&self) -> String {
        format!("{}_daily_distributions", sanitize_file_component(&self.group))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBundle {
    pub daily_overviews: Vec<PathBuf>,
    pub statistics: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub uploaded: Vec<DriveFile>,
}

/// 組名會出現在檔名中，去掉路徑分隔符
pub fn sanitize_file_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(name: &str, group: &str) -> Child {
        Child {
            name: name.to_string(),
            group: group.to_string(),
            week: Default::default(),
            assigned_by_us: String::new(),
            comments: String::new(),
        }
    }

    #[test]
    fn test_expected_columns_follow_weekday_slots() {
        let slots: Vec<String> = WEEKDAYS
            .iter()
            .flat_map(|day| DayPart::ALL.iter().map(move |part| slot_column(*day, *part)))
            .collect();
        assert_eq!(&EXPECTED_COLUMNS[2..12], slots.as_slice());
    }

    #[test]
    fn test_groups_are_sorted_and_keep_row_order() {
        let roster = Roster {
            children: vec![child("Mia", "Zebras"), child("Ben", "Bears"), child("Ada", "Zebras")],
        };

        let groups = roster.groups();
        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["Bears", "Zebras"]);
        assert_eq!(groups["Zebras"][0].name, "Mia");
        assert_eq!(groups["Zebras"][1].name, "Ada");
    }

    #[test]
    fn test_overview_file_stem() {
        let sheet = OverviewSheet {
            group: "Bären".to_string(),
            weekday: Weekday::Wed,
            attendance: Attendance::ComeToKita,
            rows: vec![],
        };
        assert_eq!(sheet.file_stem(), "come_to_kita_Bären_3_Wednesday");
        assert_eq!(sheet.headers()[2], "Wednesday\nmorning");
    }

    #[test]
    fn test_sanitize_file_component() {
        assert_eq!(sanitize_file_component("A/B\\C"), "A_B_C");
    }

    #[test]
    fn test_attendance_matches_marks() {
        assert!(Attendance::StayAtHome.matches(&Mark::Home));
        assert!(!Attendance::StayAtHome.matches(&Mark::Kita));
        assert!(Attendance::ComeToKita.matches(&Mark::Kita));
        assert!(!Attendance::ComeToKita.matches(&Mark::Other("x".to_string())));
    }
}

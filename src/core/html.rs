use crate::domain::model::OverviewSheet;
use quick_xml::escape::escape;

fn cell_html(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// 產生名單的 HTML 表格（wkhtmltopdf 的輸入）
pub fn render_overview_html(sheet: &OverviewSheet) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&sheet.title())));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(&sheet.title())));

    html.push_str("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr style=\"text-align: right;\">\n");
    for header in sheet.headers() {
        html.push_str(&format!("      <th>{}</th>\n", cell_html(&header)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in &sheet.rows {
        html.push_str("    <tr>\n");
        for value in row {
            html.push_str(&format!("      <td>{}</td>\n", cell_html(value)));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Attendance;
    use chrono::Weekday;

    #[test]
    fn test_render_escapes_and_breaks_lines() {
        let sheet = OverviewSheet {
            group: "Bears & Foxes".to_string(),
            weekday: Weekday::Mon,
            attendance: Attendance::StayAtHome,
            rows: vec![[
                "<Mia>".to_string(),
                "Bears & Foxes".to_string(),
                "Stay at home".to_string(),
                String::new(),
            ]],
        };

        let html = render_overview_html(&sheet);

        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<h1>Stay at home: Bears &amp; Foxes, Monday</h1>"));
        assert!(html.contains("<th>Monday<br>morning</th>"));
        assert!(html.contains("<td>&lt;Mia&gt;</td>"));
        assert!(html.contains("<td>Stay at home</td>"));
        assert_eq!(html.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_render_empty_sheet_has_header_only() {
        let sheet = OverviewSheet {
            group: "Bears".to_string(),
            weekday: Weekday::Fri,
            attendance: Attendance::ComeToKita,
            rows: vec![],
        };

        let html = render_overview_html(&sheet);
        assert!(html.contains("<th>Friday<br>afternoon</th>"));
        assert!(!html.contains("<td>"));
    }
}

use crate::domain::model::{Child, DayPart, GroupDistribution, Roster, SlotCount, WEEKDAYS};
use crate::domain::ports::Storage;
use crate::utils::error::{HktError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);
const BAR_WIDTH: f64 = 0.35;
const HOME_COLOR: RGBColor = RGBColor(0, 128, 0);
const KITA_COLOR: RGBColor = RGBColor(255, 0, 0);

/// 每個半天留在家 / 在 KITA 的人數；不是 1 的都算在 KITA
pub fn compute_distribution(group: &str, children: &[&Child]) -> GroupDistribution {
    let total = children.len();
    let mut slots = Vec::with_capacity(WEEKDAYS.len() * DayPart::ALL.len());

    for weekday in WEEKDAYS {
        for part in DayPart::ALL {
            let at_home = children
                .iter()
                .filter(|child| child.mark(weekday, part).is_home())
                .count();
            slots.push(SlotCount {
                weekday,
                part,
                at_home,
                in_kita: total - at_home,
            });
        }
    }

    GroupDistribution {
        group: group.to_string(),
        total,
        slots,
    }
}

pub fn distributions(roster: &Roster) -> Vec<GroupDistribution> {
    roster
        .groups()
        .into_iter()
        .map(|(group, children)| compute_distribution(group, &children))
        .collect()
}

pub fn distribution_csv(distribution: &GroupDistribution) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for slot in &distribution.slots {
        writer.serialize(slot)?;
    }
    writer.into_inner().map_err(|e| HktError::ProcessingError {
        message: format!("CSV buffer flush failed: {}", e),
    })
}

fn chart_error<E: std::fmt::Display>(e: E) -> HktError {
    HktError::ChartError {
        message: e.to_string(),
    }
}

/// 分組長條圖：綠色 At home、紅色 In KITA，柱上標數字
pub fn render_distribution_chart(distribution: &GroupDistribution, path: &Path) -> Result<()> {
    let labels: Vec<String> = distribution.slots.iter().map(SlotCount::label).collect();
    let slot_count = labels.len();
    let max_value = distribution
        .slots
        .iter()
        .map(|s| s.at_home.max(s.in_kita))
        .max()
        .unwrap_or(0);
    // 留空間給柱上的數字
    let y_max = ((max_value as f64) * 1.15).ceil().max(1.0) as u32 + 1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let x_range = -0.5f64..(slot_count as f64 - 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(130)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0u32..y_max)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|x| {
            let index = x.round();
            if index >= 0.0 && (index as usize) < labels.len() && (x - index).abs() < 1e-6 {
                labels[index as usize].clone()
            } else {
                String::new()
            }
        })
        .x_label_style(
            TextStyle::from(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
                .pos(Pos::new(HPos::Left, VPos::Center)),
        )
        .y_desc("Number of children")
        .draw()
        .map_err(chart_error)?;

    let series: [(&str, RGBColor, f64, Vec<u32>); 2] = [
        (
            "At home",
            HOME_COLOR,
            -BAR_WIDTH,
            distribution.slots.iter().map(|s| s.at_home as u32).collect(),
        ),
        (
            "In KITA",
            KITA_COLOR,
            0.0,
            distribution.slots.iter().map(|s| s.in_kita as u32).collect(),
        ),
    ];

    let value_style = TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));

    for (label, color, offset, values) in &series {
        let color = *color;
        chart
            .draw_series(values.iter().enumerate().map(|(i, value)| {
                let left = i as f64 + offset;
                Rectangle::new([(left, 0), (left + BAR_WIDTH, *value)], color.filled())
            }))
            .map_err(chart_error)?
            .label(*label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

        chart
            .draw_series(values.iter().enumerate().map(|(i, value)| {
                let center = i as f64 + offset + BAR_WIDTH / 2.0;
                Text::new(value.to_string(), (center, *value), value_style.clone())
            }))
            .map_err(chart_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

pub async fn create_statistics<S: Storage>(roster: &Roster, storage: &S) -> Result<Vec<PathBuf>> {
    tracing::info!("📊 Creating statistics in {}", storage.root().display());
    storage.prepare().await?;

    let mut produced = Vec::new();
    for distribution in distributions(roster) {
        let stem = distribution.file_stem();

        let chart_path = storage.resolve(&format!("{}.png", stem));
        let chart_distribution = distribution.clone();
        let chart_target = chart_path.clone();
        // plotters 是同步繪圖
        tokio::task::spawn_blocking(move || render_distribution_chart(&chart_distribution, &chart_target))
            .await
            .map_err(|e| HktError::ProcessingError {
                message: format!("chart task failed: {}", e),
            })??;
        produced.push(chart_path);

        let csv = distribution_csv(&distribution)?;
        produced.push(storage.write_file(&format!("{}.csv", stem), &csv).await?);

        tracing::debug!("{}: {} children", distribution.group, distribution.total);
    }

    tracing::info!("✅ Created {} statistics files", produced.len());
    Ok(produced)
}

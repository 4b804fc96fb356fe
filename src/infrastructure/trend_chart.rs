// Plotters-backed trend chart renderer
use crate::application::chart_renderer::{ChartOutcome, ChartRenderer, VisualizeError};
use crate::domain::pool::Pool;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Width of the trailing window shown on each chart.
pub const WINDOW_DAYS: i64 = 7;

const CHART_SIZE: (u32, u32) = (1200, 600);
const LINE_COLOR: RGBColor = RGBColor(0x34, 0x98, 0xdb);

pub struct TrendChartRenderer {
    data_dir: PathBuf,
}

impl TrendChartRenderer {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn chart_path(&self, pool: &Pool) -> PathBuf {
        self.data_dir.join(pool.chart_file_name())
    }
}

#[async_trait]
impl ChartRenderer for TrendChartRenderer {
    async fn render(
        &self,
        pool: &Pool,
        readings: &[Reading],
    ) -> Result<ChartOutcome, VisualizeError> {
        let now = Local::now().naive_local();
        draw_trend_chart(&self.chart_path(pool), &pool.name, readings, now)
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> VisualizeError {
    VisualizeError::Render(e.to_string())
}

/// Draw the chart for `readings` as of `now`, overwriting `path`.
///
/// Readings older than the trailing window are excluded. When the window
/// is empty but older readings exist, all of them are charted instead;
/// with no readings at all the image is skipped entirely.
pub(crate) fn draw_trend_chart(
    path: &Path,
    pool_name: &str,
    readings: &[Reading],
    now: NaiveDateTime,
) -> Result<ChartOutcome, VisualizeError> {
    if readings.is_empty() {
        return Ok(ChartOutcome::Skipped);
    }

    let window_start = now - Duration::days(WINDOW_DAYS);
    let recent: Vec<&Reading> = readings
        .iter()
        .filter(|r| r.taken_at >= window_start)
        .collect();

    let (points, x_start) = if recent.is_empty() {
        let earliest = readings
            .iter()
            .map(|r| r.taken_at)
            .min()
            .unwrap_or(window_start);
        (readings.iter().collect::<Vec<_>>(), earliest)
    } else {
        (recent, window_start)
    };

    let min_count = points.iter().map(|r| r.count).min().unwrap_or(0);
    let max_count = points.iter().map(|r| r.count).max().unwrap_or(0);
    // i64 so the +2 padding cannot wrap for counts near the u32 limit.
    let y_low = min_count.saturating_sub(2) as i64;
    let y_high = max_count as i64 + 2;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Guest Count - {pool_name}"), ("sans-serif", 32))
        .margin(12)
        .x_label_area_size(56)
        .y_label_area_size(56)
        .build_cartesian_2d(RangedDateTime::from(x_start..now), y_low..y_high)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .y_desc("Number of Guests")
        .x_label_formatter(&|t: &NaiveDateTime| t.format("%H:%M %d.%m").to_string())
        .draw()
        .map_err(render_err)?;

    let series: Vec<(NaiveDateTime, i64)> = points
        .iter()
        .map(|r| (r.taken_at, r.count as i64))
        .collect();

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &LINE_COLOR))
        .map_err(render_err)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|&(t, c)| Circle::new((t, c), 3, LINE_COLOR.filled())),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(ChartOutcome::Rendered {
        points: series.len(),
    })
}

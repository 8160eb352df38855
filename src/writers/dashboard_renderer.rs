//! Three-panel dashboard image: daily lines, average weekly bars, hourly scatter.

use crate::error::{ProcessingError, Result};
use crate::models::{BucketTable, EnergyDataset};
use crate::utils::constants::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingErrorKind;
use std::ops::Range;
use std::path::Path;
use tracing::{info, warn};

const FONT_FAMILY: &str = "sans-serif";

const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

type DrawResult<E> = std::result::Result<(), DrawingAreaErrorKind<E>>;

/// Failed draw, remembering whether only text rendering was at fault
#[derive(Debug)]
struct DrawFailure {
    font: bool,
    message: String,
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for DrawFailure {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        let font = matches!(
            err,
            DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(_))
        );
        Self {
            font,
            message: err.to_string(),
        }
    }
}

/// Plot-ready series derived from the aggregates
#[derive(Debug, Clone, Default)]
struct DashboardData {
    first_day: Option<NaiveDate>,
    daily_series: Vec<(String, Vec<(f64, f64)>)>,
    weekly_means: Vec<(String, f64)>,
    first_hour: Option<NaiveDateTime>,
    hourly_points: Vec<(f64, f64)>,
}

impl DashboardData {
    fn prepare(daily: &BucketTable, weekly: &BucketTable, dataset: &EnergyDataset) -> Self {
        let first_day = daily.buckets().first().copied();
        let daily_series = match first_day {
            Some(start) => daily
                .sources()
                .iter()
                .map(|source| {
                    let points = daily
                        .buckets()
                        .iter()
                        .zip(daily.column(source))
                        .map(|(day, kwh)| ((*day - start).num_days() as f64, kwh))
                        .collect();
                    (source.clone(), points)
                })
                .collect(),
            None => Vec::new(),
        };

        let weekly_means = weekly
            .sources()
            .iter()
            .map(|source| (source.clone(), weekly.column_mean(source)))
            .collect();

        let first_hour = dataset.iter().map(|r| r.hour()).min();
        let hourly_points = match first_hour {
            Some(start) => dataset
                .iter()
                .map(|r| ((r.hour() - start).num_hours() as f64, r.kwh))
                .collect(),
            None => Vec::new(),
        };

        Self {
            first_day,
            daily_series,
            weekly_means,
            first_hour,
            hourly_points,
        }
    }

    fn last_day_offset(&self) -> f64 {
        self.daily_series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(x, _)| *x))
            .fold(0.0, f64::max)
    }

    fn last_hour_offset(&self) -> f64 {
        self.hourly_points.iter().map(|(x, _)| *x).fold(0.0, f64::max)
    }
}

pub struct DashboardRenderer {
    width: u32,
    height: u32,
}

impl DashboardRenderer {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render the dashboard to `path` (format chosen by extension, PNG by
    /// convention). When fonts are unavailable the panels are redrawn
    /// without any text.
    pub fn render(
        &self,
        daily: &BucketTable,
        weekly: &BucketTable,
        dataset: &EnergyDataset,
        path: &Path,
    ) -> Result<()> {
        let data = DashboardData::prepare(daily, weekly, dataset);

        match self.draw_to_file(&data, path, true) {
            Ok(()) => {}
            Err(failure) if failure.font => {
                warn!(
                    "Text rendering unavailable ({}), drawing dashboard without labels",
                    failure.message
                );
                self.draw_to_file(&data, path, false)
                    .map_err(|failure| ProcessingError::Render(failure.message))?;
            }
            Err(failure) => return Err(ProcessingError::Render(failure.message)),
        }

        info!("Dashboard written to {}", path.display());
        Ok(())
    }

    fn draw_to_file(
        &self,
        data: &DashboardData,
        path: &Path,
        labelled: bool,
    ) -> std::result::Result<(), DrawFailure> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        draw_dashboard(&root, data, labelled)?;
        root.present()?;
        Ok(())
    }
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    labelled: bool,
) -> DrawResult<DB::ErrorType> {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    draw_daily_panel(&panels[0], data, labelled)?;
    draw_weekly_panel(&panels[1], data, labelled)?;
    draw_hourly_panel(&panels[2], data, labelled)?;
    Ok(())
}

fn chart_builder<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    title: &str,
    labelled: bool,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(15);
    if labelled {
        builder
            .caption(title, (FONT_FAMILY, 22))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    builder
}

fn draw_daily_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    labelled: bool,
) -> DrawResult<DB::ErrorType> {
    let y_range = value_range(
        data.daily_series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|(_, y)| *y)),
    );
    let mut chart = chart_builder(area, "Daily Consumption", labelled)
        .build_cartesian_2d(-0.5..data.last_day_offset() + 0.5, y_range)?;

    if labelled {
        let start = data.first_day;
        let day_label = |x: &f64| match start {
            Some(start) => (start + Duration::days(x.round() as i64))
                .format("%Y-%m-%d")
                .to_string(),
            None => String::new(),
        };
        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&day_label)
            .y_desc("kWh")
            .draw()?;
    }

    for (i, (source, points)) in data.daily_series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(source.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(points.iter().map(|p| Circle::new(*p, 3, color.filled())))?;
    }

    if labelled && !data.daily_series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_weekly_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    labelled: bool,
) -> DrawResult<DB::ErrorType> {
    let bar_count = data.weekly_means.len();
    let y_range = value_range(data.weekly_means.iter().map(|(_, mean)| *mean));
    let mut chart = chart_builder(area, "Average Weekly Consumption", labelled)
        .build_cartesian_2d(-0.5..bar_count.max(1) as f64 - 0.5, y_range)?;

    if labelled {
        let names: Vec<&str> = data.weekly_means.iter().map(|(s, _)| s.as_str()).collect();
        let source_label = |x: &f64| {
            let index = x.round();
            if (x - index).abs() < 1e-6 && index >= 0.0 && (index as usize) < names.len() {
                names[index as usize].to_string()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bar_count.max(2))
            .x_label_formatter(&source_label)
            .y_desc("kWh / week")
            .draw()?;
    }

    chart.draw_series(data.weekly_means.iter().enumerate().map(|(i, (_, mean))| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, *mean)],
            PALETTE[i % PALETTE.len()].filled(),
        )
    }))?;

    Ok(())
}

fn draw_hourly_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &DashboardData,
    labelled: bool,
) -> DrawResult<DB::ErrorType> {
    let y_range = value_range(data.hourly_points.iter().map(|(_, y)| *y));
    let mut chart = chart_builder(area, "Hourly Consumption", labelled)
        .build_cartesian_2d(-0.5..data.last_hour_offset() + 0.5, y_range)?;

    if labelled {
        let start = data.first_hour;
        let hour_label = |x: &f64| match start {
            Some(start) => (start + Duration::hours(x.round() as i64))
                .format("%m-%d %H:00")
                .to_string(),
            None => String::new(),
        };
        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&hour_label)
            .y_desc("kWh")
            .draw()?;
    }

    let color = PALETTE[0];
    chart.draw_series(
        data.hourly_points
            .iter()
            .map(|p| Circle::new(*p, 3, color.mix(0.7).filled())),
    )?;

    Ok(())
}

/// Y range covering zero and every value, padded by 5%
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (max - min).abs() < f64::EPSILON {
        return 0.0..1.0;
    }
    let padding = (max - min) * 0.05;
    (min - padding)..(max + padding)
}

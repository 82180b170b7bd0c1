//! SVG rendering with plotters

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use benchplot_core::ProgressContext;
use benchplot_report::Metric;
use plotters::coord::Shift;
use plotters::prelude::*;
use rayon::prelude::*;

use crate::group::ChartGroup;

const CAPTION_FONT_SIZE: u32 = 20;
const LABEL_FONT_SIZE: u32 = 13;
const AXIS_DESC_FONT_SIZE: u32 = 15;

/// Approximate label width per character at `LABEL_FONT_SIZE`
const LABEL_CHAR_WIDTH: u32 = 7;

/// One color per bar, cycled
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Canvas size of one chart file (the whole 2×2 grid)
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
        }
    }
}

/// Files written by [`render_charts`], in group order.
#[derive(Debug, Default)]
pub struct ChartSummary {
    pub written: Vec<PathBuf>,
}

/// Render every group to `<output_dir>/<stem>.svg`, in parallel.
pub fn render_charts(
    groups: &[ChartGroup],
    output_dir: &Path,
    options: &ChartOptions,
    progress: &ProgressContext,
) -> Result<ChartSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let pb = progress.count_bar("charts", groups.len() as u64);
    let written = groups
        .par_iter()
        .enumerate()
        .map(|(idx, group)| {
            let path = output_dir.join(format!("{}.svg", group.file_stem(idx)));
            draw_group(group, &path, options)
                .with_context(|| format!("Failed to render chart for {}", group.key))?;
            log::info!("Creating charts for {}: {}", group.mode, group.key);
            pb.inc(1);
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();

    Ok(ChartSummary { written })
}

fn draw_group(group: &ChartGroup, path: &Path, options: &ChartOptions) -> Result<()> {
    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 2));
    for (metric, area) in Metric::ALL.iter().zip(panels.iter()) {
        draw_panel(area, group, *metric)?;
    }

    root.present()?;
    log::debug!("Generated: {}", path.display());
    Ok(())
}

/// Bar label, marking runs whose value can't be drawn.
fn bar_label(label: &str, value: Option<f64>) -> String {
    match value {
        Some(_) => label.to_string(),
        None => format!("{label} (inf)"),
    }
}

/// Horizontal bar chart of one metric, one bar per entry of `group.bars`.
fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    group: &ChartGroup,
    metric: Metric,
) -> Result<()> {
    let values: Vec<Option<f64>> = group.bars.iter().map(|(_, r)| metric.value(r)).collect();
    let labels: Vec<String> = group
        .bars
        .iter()
        .zip(&values)
        .map(|((label, _), value)| bar_label(label, *value))
        .collect();

    let count = labels.len();
    let max = values.iter().flatten().fold(0.0_f64, |a, &b| a.max(b));
    let x_max = if max > 0.0 { max * 1.1 } else { 1.0 };
    let widest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    let mut chart = ChartBuilder::on(area)
        .caption(group.title(metric.title()), ("sans-serif", CAPTION_FONT_SIZE))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size((widest * LABEL_CHAR_WIDTH).clamp(60, 360))
        .build_cartesian_2d(0.0..x_max, (0..count).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        // segment boundaries: count + 1 key points
        .y_labels(count + 1)
        .y_label_formatter(&|y| match y {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(metric.title())
        .y_desc(group.mode.axis())
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_DESC_FONT_SIZE))
        .draw()?;

    chart.draw_series(values.iter().enumerate().filter_map(|(i, value)| {
        let value = (*value)?;
        let color = COLORS[i % COLORS.len()];
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(i)), (value, SegmentValue::Exact(i + 1))],
            color.filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        Some(bar)
    }))?;

    Ok(())
}

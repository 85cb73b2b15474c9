//! SVG chart adapter: dual-line cumulative-return comparison.
//!
//! Strategy in red, benchmark in blue, shared y-scale over both series.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::SigperfError;
use crate::ports::chart_port::ChartPort;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;

pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn polyline(values: &[f64], min: f64, scale_x: f64, scale_y: f64) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (v - min) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_comparison_chart(
    dates: &[NaiveDate],
    strategy: &[f64],
    benchmark: &[f64],
) -> Result<String, SigperfError> {
    if dates.is_empty() || strategy.len() != dates.len() || benchmark.len() != dates.len() {
        return Err(SigperfError::InvalidWindow {
            reason: "chart needs equal-length, non-empty date and return series".into(),
        });
    }

    let min = strategy
        .iter()
        .chain(benchmark)
        .fold(f64::INFINITY, |a, &b| a.min(b));
    let max = strategy
        .iter()
        .chain(benchmark)
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let range = max - min;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if dates.len() > 1 {
        plot_width / (dates.len() - 1) as f64
    } else {
        0.0
    };

    let strategy_points = polyline(strategy, min, scale_x, scale_y);
    let benchmark_points = polyline(benchmark, min, scale_x, scale_y);

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <rect width="{w:.0}" height="{h:.0}" fill="white"/>
  <text x="{mid:.0}" y="24" text-anchor="middle" font-size="16">Investment Performance</text>
  <line x1="{pad:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="black"/>
  <line x1="{pad:.0}" y1="{pad:.0}" x2="{pad:.0}" y2="{bottom:.0}" stroke="black"/>
  <text x="{pad:.0}" y="{label_y:.0}" font-size="11">{first}</text>
  <text x="{right:.0}" y="{label_y:.0}" text-anchor="end" font-size="11">{last}</text>
  <polyline fill="none" stroke="red" stroke-width="1" points="{strategy}"/>
  <polyline fill="none" stroke="blue" stroke-width="1" points="{benchmark}"/>
  <text x="{right:.0}" y="{pad:.0}" text-anchor="end" font-size="11" fill="red">Investment Return</text>
  <text x="{right:.0}" y="{legend2:.0}" text-anchor="end" font-size="11" fill="blue">Market Return</text>
</svg>
"#,
        w = WIDTH,
        h = HEIGHT,
        mid = WIDTH / 2.0,
        pad = PADDING,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        label_y = HEIGHT - PADDING + 16.0,
        first = dates[0],
        last = dates[dates.len() - 1],
        strategy = strategy_points,
        benchmark = benchmark_points,
        legend2 = PADDING + 14.0,
    ))
}

impl ChartPort for SvgChartAdapter {
    fn render(
        &self,
        dates: &[NaiveDate],
        strategy: &[f64],
        benchmark: &[f64],
        output: &Path,
    ) -> Result<(), SigperfError> {
        let svg = format_comparison_chart(dates, strategy, benchmark)?;
        fs::write(output, svg)?;
        Ok(())
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Projects aggregated series onto drawing primitives inside a pixel box.
//!
//! The output is a plain list of [`DrawCommand`]s; any renderer can draw it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::analytics::{CategoryTotal, MonthTotal};

pub const POINT_RADIUS: f64 = 3.0;
const VALUE_LABEL_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 40.0,
            right: 20.0,
            top: 20.0,
            bottom: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBox {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Horizontal space between neighbouring bars.
    pub bar_gap: f64,
}

impl Default for ChartBox {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 250.0,
            margins: Margins::default(),
            bar_gap: 10.0,
        }
    }
}

impl ChartBox {
    pub fn usable_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    pub fn usable_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Bottom edge of the plotting area.
    pub fn baseline(&self) -> f64 {
        self.margins.top + self.usable_height()
    }

    /// Vertical centre of the strip below the plotting area.
    fn axis_label_y(&self) -> f64 {
        self.height - self.margins.bottom / 2.0
    }

    fn y_for(&self, value: f64, max: f64) -> f64 {
        let frac = if max > 0.0 { value / max } else { 0.0 };
        self.margins.top + (1.0 - frac) * self.usable_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Value,
    Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    Point {
        x: f64,
        y: f64,
        radius: f64,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        role: TextRole,
    },
}

fn to_f64(v: Decimal) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

fn series_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// One rectangle, one value label and one category label per bar.
pub fn project_bars(
    series: &[CategoryTotal],
    chart: &ChartBox,
    fmt: impl Fn(Decimal) -> String,
) -> Vec<DrawCommand> {
    if series.is_empty() {
        return Vec::new();
    }
    let values: Vec<f64> = series.iter().map(|c| to_f64(c.amount)).collect();
    let max = series_max(&values);
    let slot = chart.usable_width() / series.len() as f64;
    let bar_width = (slot - chart.bar_gap).max(0.0);
    let y1 = chart.baseline();

    let mut out = Vec::with_capacity(series.len() * 3);
    for (i, (item, value)) in series.iter().zip(&values).enumerate() {
        let x0 = chart.margins.left + i as f64 * (bar_width + chart.bar_gap);
        let x1 = x0 + bar_width;
        let y0 = chart.y_for(*value, max);
        let cx = (x0 + x1) / 2.0;
        out.push(DrawCommand::Rect { x0, y0, x1, y1 });
        out.push(DrawCommand::Text {
            x: cx,
            y: y0 - VALUE_LABEL_OFFSET,
            text: fmt(item.amount),
            role: TextRole::Value,
        });
        out.push(DrawCommand::Text {
            x: cx,
            y: chart.axis_label_y(),
            text: item.category.clone(),
            role: TextRole::Axis,
        });
    }
    out
}

/// Markers with value labels, then connecting segments, then month labels.
pub fn project_line(
    series: &[MonthTotal],
    chart: &ChartBox,
    fmt: impl Fn(Decimal) -> String,
) -> Vec<DrawCommand> {
    if series.is_empty() {
        return Vec::new();
    }
    let values: Vec<f64> = series.iter().map(|m| to_f64(m.amount)).collect();
    let max = series_max(&values);
    let x_gap = chart.usable_width() / (series.len().saturating_sub(1).max(1)) as f64;

    let coords: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (chart.margins.left + i as f64 * x_gap, chart.y_for(*v, max)))
        .collect();

    let mut out = Vec::with_capacity(series.len() * 4);
    for ((x, y), item) in coords.iter().zip(series) {
        out.push(DrawCommand::Point {
            x: *x,
            y: *y,
            radius: POINT_RADIUS,
        });
        out.push(DrawCommand::Text {
            x: *x,
            y: y - VALUE_LABEL_OFFSET,
            text: fmt(item.amount),
            role: TextRole::Value,
        });
    }
    for pair in coords.windows(2) {
        out.push(DrawCommand::Line {
            x0: pair[0].0,
            y0: pair[0].1,
            x1: pair[1].0,
            y1: pair[1].1,
        });
    }
    for ((x, _), item) in coords.iter().zip(series) {
        out.push(DrawCommand::Text {
            x: *x,
            y: chart.axis_label_y(),
            text: item.month.label(),
            role: TextRole::Axis,
        });
    }
    out
}

/// Rows describing each primitive, for terminal output.
pub fn describe(commands: &[DrawCommand]) -> Vec<Vec<String>> {
    commands
        .iter()
        .map(|c| match c {
            DrawCommand::Rect { x0, y0, x1, y1 } => vec![
                "rect".into(),
                format!("({:.1}, {:.1}) - ({:.1}, {:.1})", x0, y0, x1, y1),
                String::new(),
            ],
            DrawCommand::Point { x, y, radius } => vec![
                "point".into(),
                format!("({:.1}, {:.1}) r={:.1}", x, y, radius),
                String::new(),
            ],
            DrawCommand::Line { x0, y0, x1, y1 } => vec![
                "line".into(),
                format!("({:.1}, {:.1}) - ({:.1}, {:.1})", x0, y0, x1, y1),
                String::new(),
            ],
            DrawCommand::Text { x, y, text, role } => vec![
                match role {
                    TextRole::Value => "value".into(),
                    TextRole::Axis => "axis".into(),
                },
                format!("({:.1}, {:.1})", x, y),
                text.clone(),
            ],
        })
        .collect()
}

pub mod html;
pub mod table;

use clap::ValueEnum;
use serde::Deserialize;

/// Chart drawn over the top-ranked entries. Has no effect on the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Line,
    Scatter,
    Area,
    Box,
    /// Drawn as a line chart; counts have no open/close/high/low.
    Candlestick,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "词频柱状图",
            ChartKind::Pie => "词频饼图",
            ChartKind::Line => "词频趋势图",
            ChartKind::Scatter => "词频散点图",
            ChartKind::Area => "词频面积图",
            ChartKind::Box => "词频箱型图",
            ChartKind::Candlestick => "词频K线图",
        }
    }
}

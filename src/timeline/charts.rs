//! The net income line chart.
//!
//! The chart is generated as an ECharts configuration and rendered with a container
//! and the JavaScript that initializes it.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, LineStyle,
        Tooltip, Trigger,
    },
    series::Line,
};
use maud::PreEscaped;
use serde::Serialize;

use crate::{html::HeadElement, month::YearMonth};

/// The line colour when the net income is negative in at least one month.
pub const NEGATIVE_LINE_COLOR: &str = "#ef4444";
/// The line colour when the net income is never negative.
pub const POSITIVE_LINE_COLOR: &str = "#10b981";

/// A chart with its HTML container ID and ECharts configuration.
pub struct TimelineChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
    /// Overrides the value axis range chosen by ECharts.
    pub y_axis_bounds: Option<YAxisBounds>,
}

/// The value axis range of the net income chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YAxisBounds {
    pub min: f64,
    pub max: f64,
}

/// Pads the range of `net_income` by 10% above and below.
///
/// # Returns
/// `None` if there are no values or all values are equal, in which case ECharts picks the range.
/// Padding a zero range would give the empty axis `[v, v]`, so flat series are left to ECharts
/// rather than following the formula.
pub fn y_axis_bounds(net_income: &BTreeMap<YearMonth, f64>) -> Option<YAxisBounds> {
    let min = net_income.values().copied().reduce(f64::min)?;
    let max = net_income.values().copied().reduce(f64::max)?;
    let range = max - min;

    if range <= 0.0 {
        return None;
    }

    Some(YAxisBounds {
        min: min - range * 0.1,
        max: max + range * 0.1,
    })
}

/// Red if the net income dips below zero in any month, green otherwise.
pub fn net_income_line_color(net_income: &BTreeMap<YearMonth, f64>) -> &'static str {
    if net_income.values().any(|value| *value < 0.0) {
        NEGATIVE_LINE_COLOR
    } else {
        POSITIVE_LINE_COLOR
    }
}

/// The net income for every month on the timeline, labelled like "Jan 24".
pub fn net_income_chart(net_income: &BTreeMap<YearMonth, f64>) -> Chart {
    let labels: Vec<String> = net_income.keys().map(|month| month.label()).collect();
    let values: Vec<f64> = net_income.values().copied().collect();
    let color = net_income_line_color(net_income);

    Chart::new()
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top("8%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Net Income")
                .line_style(LineStyle::new().color(color))
                .item_style(ItemStyle::new().color(color))
                .data(values),
        )
}

/// Generates JavaScript initialization code for the charts.
///
/// Each chart instance is stored on `window.timelineCharts` by its ID so the
/// page scripts can reach it.
pub fn charts_script(charts: &[TimelineChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            let bounds = match chart.y_axis_bounds {
                Some(YAxisBounds { min, max }) => format!(
                    "chart.setOption({{ yAxis: {{ min: {}, max: {} }} }});",
                    min.floor(),
                    max.ceil()
                ),
                None => String::new(),
            };

            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{ return; }}
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);
                    {}

                    window.timelineCharts = window.timelineCharts || {{}};
                    window.timelineCharts["{}"] = chart;
                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options, bounds, chart.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD',
              maximumFractionDigits: 0
            });
            return currencyFormatter.format(number);",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

//! Chart generation and rendering for the summary page.
//!
//! The charts are built as ECharts configuration with `charming` and rendered
//! client-side:
//! - **Spending by category**: a pie chart of the total spent in each category
//! - **Daily spending**: a line chart of the total spent on each day

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{category::Category, html::HeadElement};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct SummaryChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the charts for the given totals, skipping any chart without data.
pub(super) fn summary_charts(
    category_totals: &BTreeMap<Category, f64>,
    daily_totals: &BTreeMap<Date, f64>,
) -> Vec<SummaryChart> {
    let mut charts = Vec::new();

    if !category_totals.is_empty() {
        charts.push(SummaryChart {
            id: "category-chart",
            options: category_chart(category_totals).to_string(),
        });
    }

    if !daily_totals.is_empty() {
        charts.push(SummaryChart {
            id: "daily-chart",
            options: daily_chart(daily_totals).to_string(),
        });
    }

    charts
}

/// Renders the HTML containers for the charts.
pub(super) fn charts_view(charts: &[SummaryChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript that initializes an ECharts instance for each chart.
pub(super) fn charts_script(charts: &[SummaryChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});
                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

fn category_chart(category_totals: &BTreeMap<Category, f64>) -> Chart {
    let data = category_totals
        .iter()
        .map(|(category, total)| (*total, category.label()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Spending")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

fn daily_chart(daily_totals: &BTreeMap<Date, f64>) -> Chart {
    let labels = daily_totals
        .keys()
        .map(|date| date.to_string())
        .collect::<Vec<_>>();
    let values = daily_totals.values().copied().collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Daily Spending"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter()),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Spent").data(values))
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

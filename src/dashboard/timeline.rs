//! The expense timeline and net income chart panels.
//!
//! Both panels scroll horizontally and are kept at the same relative position. Scroll events
//! are reported to the viewport endpoint, which decides the peer offset, the visible bar
//! labels and the net income badge.

use maud::{Markup, PreEscaped, html};

use crate::{
    endpoints,
    expense::Expense,
    html::{HeadElement, format_currency},
    timeline::{
        TimelineSummary,
        bars::{BAR_HEIGHT_PX, ExpenseBar, expense_bars, timeline_layout},
        charts::{TimelineChart, charts_script, net_income_chart},
        summary::{MonthSummary, net_income_badge},
    },
};

/// The HTML element ID of the net income chart.
pub const NET_INCOME_CHART_ID: &str = "net-income-chart";

const HEADER_CELL_STYLE: &str = "absolute top-0 h-[60px] px-1 py-1 text-center text-xs \
    border-r border-gray-200 dark:border-gray-700 bg-gray-100 dark:bg-gray-700";
const BAR_STYLE: &str = "absolute rounded text-xs text-white overflow-hidden whitespace-nowrap";
const PANEL_STYLE: &str = "w-full overflow-x-auto rounded-lg shadow bg-white dark:bg-gray-800";

/// The timeline, the chart and the scripts that drive them.
pub struct TimelinePanels {
    pub content: Markup,
    pub scripts: Vec<HeadElement>,
}

pub fn timeline_panels(summary: &TimelineSummary, expenses: &[Expense]) -> TimelinePanels {
    let months = summary.timeline();
    let bars = expense_bars(expenses, &months);
    let layout = timeline_layout(expenses.len(), months.len());
    let cell_width_percent = 100.0 / months.len().max(1) as f64;
    let badge = summary.months.first().map(net_income_badge);

    let chart = TimelineChart {
        id: NET_INCOME_CHART_ID,
        options: net_income_chart(&summary.net_income_by_month()).to_string(),
        y_axis_bounds: summary.y_axis_bounds,
    };

    let content = html! {
        section id="timeline" class="w-full space-y-4"
        {
            h2 class="text-xl font-semibold" { "Expense Timeline" }

            div id="timeline-scroll" class=(PANEL_STYLE)
            {
                div
                    id="timeline-content"
                    class="relative"
                    style={
                        "width: " (layout.content_width_percent) "%; "
                        "height: " (layout.content_height_px) "px;"
                    }
                {
                    @for (index, month) in summary.months.iter().enumerate() {
                        (month_header_cell(index, month, cell_width_percent))
                    }

                    @for bar in &bars {
                        (expense_bar(bar))
                    }
                }
            }

            h2 class="text-xl font-semibold" { "Net Income" }

            div class="relative"
            {
                @if let Some(badge) = &badge {
                    div
                        id="net-income-badge"
                        class="absolute top-2 left-2 z-10 px-3 py-1 rounded-full text-sm \
                            font-semibold text-white shadow"
                        style={ "background-color: " (badge.color) ";" }
                    {
                        "Net Income (" span id="net-income-badge-month" { (badge.label) } "): "
                        span id="net-income-badge-value" { (format_currency(badge.net_income)) }
                    }
                }

                div id="chart-scroll" class=(PANEL_STYLE)
                {
                    div style={ "width: " (layout.content_width_percent) "%;" }
                    {
                        div id=(chart.id) class="h-[320px] w-full" {}
                    }
                }
            }
        }
    };

    let scripts = vec![
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(&[chart]),
        scroll_sync_script(),
    ];

    TimelinePanels { content, scripts }
}

fn month_header_cell(index: usize, month: &MonthSummary, width_percent: f64) -> Markup {
    let balance = month.net_income;
    let balance_style = if balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        div
            class=(HEADER_CELL_STYLE)
            data-month=(month.month)
            style={
                "left: " (index as f64 * width_percent) "%; "
                "width: " (width_percent) "%;"
            }
        {
            div class="font-semibold text-gray-900 dark:text-white" { (month.label) }
            div class="text-gray-600 dark:text-gray-300" { (format_currency(month.total)) }
            div class=(balance_style) { (format_currency(balance)) }
        }
    }
}

fn expense_bar(bar: &ExpenseBar) -> Markup {
    html! {
        div
            class=(BAR_STYLE)
            data-expense-id=(bar.expense_id)
            title=(bar.label)
            style={
                "left: " (bar.left_percent) "%; "
                "width: " (bar.width_percent) "%; "
                "top: " (bar.top_px()) "px; "
                "height: " (BAR_HEIGHT_PX) "px; "
                "background-color: " (bar.color) ";"
            }
        {
            span class="bar-label relative px-1 leading-5" style="left: 0%;" { (bar.label) }
        }
    }
}

fn scroll_sync_script() -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
    const timeline = document.getElementById('timeline-scroll');
    const chart = document.getElementById('chart-scroll');
    if (!timeline || !chart) {{ return; }}

    const currencyFormatter = new Intl.NumberFormat('en-US', {{ style: 'currency', currency: 'USD' }});
    let syncing = false;
    let pending = null;

    function applyReport(report, peer) {{
        if (report.peerScrollLeft !== null && Math.abs(peer.scrollLeft - report.peerScrollLeft) > 1) {{
            syncing = true;
            peer.scrollLeft = report.peerScrollLeft;
        }}

        const visible = new Map(report.visibleLabels.map(label => [String(label.expenseId), label]));
        document.querySelectorAll('#timeline-content [data-expense-id]').forEach(bar => {{
            const label = bar.querySelector('.bar-label');
            const info = visible.get(bar.dataset.expenseId);
            label.style.visibility = info ? 'visible' : 'hidden';
            label.style.left = info ? info.offsetPercent + '%' : '0%';
        }});

        const badge = document.getElementById('net-income-badge');
        if (badge && report.badge) {{
            badge.style.backgroundColor = report.badge.color;
            document.getElementById('net-income-badge-month').textContent = report.badge.label;
            document.getElementById('net-income-badge-value').textContent =
                currencyFormatter.format(report.badge.netIncome);
        }}
    }}

    function reportScroll(source, peer) {{
        if (syncing) {{
            syncing = false;
            return;
        }}
        if (pending) {{ cancelAnimationFrame(pending); }}

        pending = requestAnimationFrame(function() {{
            const params = new URLSearchParams({{
                scroll_left: source.scrollLeft,
                client_width: source.clientWidth,
                scroll_width: source.scrollWidth,
                peer_client_width: peer.clientWidth,
                peer_scroll_width: peer.scrollWidth,
            }});

            fetch('{viewport_endpoint}?' + params)
                .then(response => response.ok ? response.json() : Promise.reject(response.status))
                .then(report => applyReport(report, peer))
                .catch(error => console.error('Could not update the timeline view:', error));
        }});
    }}

    timeline.addEventListener('scroll', () => reportScroll(timeline, chart));
    chart.addEventListener('scroll', () => reportScroll(chart, timeline));
    window.addEventListener('resize', () => reportScroll(timeline, chart));
    reportScroll(timeline, chart);
}});"#,
        viewport_endpoint = endpoints::VIEWPORT_API
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

#[cfg(test)]
mod timeline_panels_tests {
    use scraper::{Html, Selector};

    use crate::{
        expense::{Expense, ExpenseTitle},
        html::HeadElement,
        test_utils::assert_valid_html,
        timeline::TimelineSummary,
    };

    use super::{NET_INCOME_CHART_ID, timeline_panels};

    fn expense(id: i64, title: &str, amount: f64, start: &str, end: &str) -> Expense {
        Expense {
            id,
            title: ExpenseTitle::new_unchecked(title),
            amount,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    fn render(expenses: &[Expense]) -> (Html, Vec<HeadElement>) {
        let summary = TimelineSummary::new(expenses, 5000.0);
        let panels = timeline_panels(&summary, expenses);

        (
            Html::parse_fragment(&panels.content.into_string()),
            panels.scripts,
        )
    }

    #[test]
    fn renders_header_cell_per_month() {
        let (html, _) = render(&[expense(1, "Rent", 1200.0, "2024-01", "2024-12")]);
        assert_valid_html(&html);

        let cells: Vec<_> = html
            .select(&Selector::parse("[data-month]").unwrap())
            .collect();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0].value().attr("data-month"), Some("2023-07"));

        let june = cells[11].text().collect::<Vec<_>>();
        assert_eq!(june, vec!["Jun 24", "$1,200.00", "$3,800.00"]);
    }

    #[test]
    fn renders_bar_per_expense() {
        let (html, _) = render(&[
            expense(1, "Rent", 1200.0, "2024-01", "2024-12"),
            expense(2, "Gym", 50.0, "2024-03", "2024-04"),
        ]);

        let bars: Vec<_> = html
            .select(&Selector::parse("[data-expense-id]").unwrap())
            .collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].value().attr("data-expense-id"), Some("2"));
        assert_eq!(bars[1].value().attr("title"), Some("Gym ($50/mo)"));
        let style = bars[1].value().attr("style").unwrap();
        assert!(style.contains("top: 100px"), "got style {style}");
    }

    #[test]
    fn badge_starts_at_first_month() {
        let (html, _) = render(&[expense(1, "Holiday", 6000.0, "2024-01", "2024-01")]);

        let badge = html
            .select(&Selector::parse("#net-income-badge").unwrap())
            .next()
            .expect("No badge found");
        let text = badge.text().collect::<String>();
        assert_eq!(text, "Net Income (Jul 23): $5,000.00");
        assert!(badge.value().attr("style").unwrap().contains("#16a34a"));
    }

    #[test]
    fn includes_chart_container_and_scripts() {
        let (html, scripts) = render(&[expense(1, "Rent", 1200.0, "2024-01", "2024-12")]);

        let selector = Selector::parse(&format!("#{NET_INCOME_CHART_ID}")).unwrap();
        assert!(html.select(&selector).next().is_some());
        assert!(scripts.iter().any(|script| matches!(
            script,
            HeadElement::ScriptSource(source) if source.0.contains("/api/viewport")
        )));
    }
}

//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for sales data:
//! - **Location map**: a bubble per place of purchase on a map of Brazil, sized by the measure
//! - **Top locations**: bar chart of the five largest places of purchase
//! - **Monthly totals**: one line per year over the months of the year
//! - **Categories**: bar chart of the measure per product category
//! - **Top sellers**: horizontal bar chart of the N largest sellers
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, CoordinateSystem, JsFunction, Label,
        LabelPosition, LineStyle, LineStyleType, Tooltip, Trigger,
    },
    series::{Line, Scatter, bar},
};
use maud::{Markup, PreEscaped, html};
use time::Month;

use crate::dashboard::aggregation::{
    CategoryTotal, LocationTotal, Measure, MonthlyTotal, SellerTotals, month_label,
};

/// The ECharts library, loaded in the page head.
pub(super) const ECHARTS_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The outlines of the Brazilian states, registered with ECharts as [BRAZIL_MAP].
const BRAZIL_GEOJSON_URL: &str = "https://cdn.jsdelivr.net/gh/codeforgermany/click_that_hood@main/public/data/brazil-states.geojson";

/// The name the map of Brazil is registered under.
const BRAZIL_MAP: &str = "brasil";

/// The geographic component the location map draws its bubbles on.
///
/// charming has no setter for the top level `geo` option, so it is added to
/// the serialized options by [DashboardChart::on_map].
const GEO_COMPONENT: &str = r##"{"map": "brasil", "roam": true, "itemStyle": {"areaColor": "#e5e7eb", "borderColor": "#9ca3af"}, "emphasis": {"itemStyle": {"areaColor": "#d1d5db"}, "label": {"show": false}}}"##;

/// How many places of purchase the top locations chart shows.
const TOP_LOCATIONS: usize = 5;

const MIN_BUBBLE_SIZE: f64 = 8.0;
const MAX_BUBBLE_SIZE: f64 = 60.0;

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
    /// Whether the chart is drawn on the map of Brazil.
    pub uses_map: bool,
}

impl DashboardChart {
    pub fn new(id: &'static str, chart: Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
            uses_map: false,
        }
    }

    /// A chart whose series are placed on the map of Brazil.
    pub fn on_map(id: &'static str, chart: Chart) -> Self {
        let options = chart.to_string();
        let options = match options.strip_prefix('{') {
            Some(rest) => format!("{{\n  \"geo\": {GEO_COMPONENT},{rest}"),
            None => options,
        };

        Self {
            id,
            options,
            uses_map: true,
        }
    }
}

/// Renders the container for a single chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Keeps one ECharts instance per chart container.
///
/// Defined once per page. The resize and theme listeners are registered here
/// and act on the live charts only, so swapping the dashboard content does
/// not add listeners. Charts whose container was swapped out are disposed.
const CHART_REGISTRY_SCRIPT: &str = r#"window.dashboardCharts = window.dashboardCharts || (function() {
    const charts = new Map();
    const maps = new Map();
    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
    const theme = () => darkModeMediaQuery.matches ? 'dark' : 'default';

    window.addEventListener('resize', () => charts.forEach((chart) => chart.resize()));
    darkModeMediaQuery.addEventListener('change', () => {
        charts.forEach((chart) => chart.setTheme(theme()));
    });

    const loadMap = (map) => {
        if (!maps.has(map.name)) {
            maps.set(map.name, fetch(map.url)
                .then((response) => response.json())
                .then((geoJson) => echarts.registerMap(map.name, geoJson)));
        }
        return maps.get(map.name);
    };

    const dispose = (id) => {
        const chart = charts.get(id);
        if (chart) {
            chart.dispose();
            charts.delete(id);
        }
    };

    return {
        render(id, option, map) {
            charts.forEach((chart, chartId) => {
                if (!chart.getDom().isConnected) { dispose(chartId); }
            });
            dispose(id);

            const chartDom = document.getElementById(id);
            if (!chartDom) { return; }

            const show = () => {
                if (!chartDom.isConnected) { return; }
                const existing = echarts.getInstanceByDom(chartDom);
                if (existing) { existing.dispose(); }
                const chart = echarts.init(chartDom);
                chart.setTheme(theme());
                chart.setOption(option);
                charts.set(id, chart);
            };

            if (map) {
                loadMap(map)
                    .then(show)
                    .catch((error) => console.error('Could not load the map ' + map.name, error));
            } else {
                show();
            }
        },
    };
})();"#;

/// Generates JavaScript initialization code for dashboard charts.
///
/// The script is placed after the chart containers inside the dashboard
/// content, so it runs both on page load and after HTMX swaps the content.
///
/// # Returns
/// A script element with the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let map = format!(r#"{{ name: "{BRAZIL_MAP}", url: "{BRAZIL_GEOJSON_URL}" }}"#);

    let render_calls = charts
        .iter()
        .map(|chart| {
            format!(
                r#"window.dashboardCharts.render("{}", {}, {});"#,
                chart.id,
                escape_script(&chart.options),
                if chart.uses_map { map.as_str() } else { "null" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(CHART_REGISTRY_SCRIPT)) "\n" (PreEscaped(render_calls)) })
}

/// Stops text from a data source closing the surrounding script element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// A bubble per place of purchase, placed on the map of Brazil by its
/// coordinates.
///
/// Each place is its own series so that it can be toggled in the legend.
/// Bubble areas are proportional to the measure. Render it with
/// [DashboardChart::on_map].
pub(super) fn location_map_chart(locations: &[LocationTotal], measure: Measure) -> Chart {
    let title = match measure {
        Measure::Revenue => "Receita por estado",
        Measure::SalesCount => "Quantidade de vendas por estado",
    };
    let max_value = locations
        .iter()
        .map(|location| location.value)
        .fold(0.0, f64::max);

    let mut chart = Chart::new()
        .title(Title::new().text(title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .formatter(location_formatter(measure)),
        );

    for location in locations {
        chart = chart.series(
            Scatter::new()
                .name(location.location.as_str())
                .coordinate_system(CoordinateSystem::Geo)
                .symbol_size(bubble_size(location.value, max_value))
                .data(vec![vec![
                    location.longitude,
                    location.latitude,
                    round_value(location.value),
                ]]),
        );
    }

    chart
}

/// The diameter of a bubble whose area is proportional to `value`.
fn bubble_size(value: f64, max_value: f64) -> f64 {
    if max_value <= 0.0 {
        return MIN_BUBBLE_SIZE;
    }

    MIN_BUBBLE_SIZE + (MAX_BUBBLE_SIZE - MIN_BUBBLE_SIZE) * (value / max_value).sqrt()
}

/// The five largest places of purchase.
///
/// `locations` must already be sorted from largest to smallest.
pub(super) fn top_locations_chart(locations: &[LocationTotal], measure: Measure) -> Chart {
    let top = &locations[..locations.len().min(TOP_LOCATIONS)];
    let (labels, values): (Vec<String>, Vec<f64>) = top
        .iter()
        .map(|location| (location.location.clone(), round_value(location.value)))
        .unzip();

    let title = match measure {
        Measure::Revenue => "Top estados (receita)",
        Measure::SalesCount => "Top estados (vendas)",
    };

    vertical_bar_chart(title, labels, values, measure)
}

/// One line per year over the months of the year.
///
/// Every other year is drawn dashed. Months without sales are left as gaps.
pub(super) fn monthly_chart(months: &[MonthlyTotal], measure: Measure) -> Chart {
    let mut calendar_months: Vec<Month> = months.iter().map(|total| total.month).collect();
    calendar_months.sort_by_key(|month| *month as u8);
    calendar_months.dedup();

    let mut years: Vec<i32> = months.iter().map(|total| total.year).collect();
    years.dedup();

    let labels: Vec<&str> = calendar_months.iter().map(|month| month_label(*month)).collect();

    let (title, axis_name) = match measure {
        Measure::Revenue => ("Receita mensal", "Receita"),
        Measure::SalesCount => ("Quantidade de vendas mensal", "Quantidade de vendas"),
    };

    let mut chart = Chart::new()
        .title(Title::new().text(title))
        .tooltip(measure_tooltip(measure))
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(measure_axis(measure).name(axis_name));

    for (index, year) in years.iter().enumerate() {
        let data: Vec<Option<f64>> = calendar_months
            .iter()
            .map(|month| {
                months
                    .iter()
                    .find(|total| total.year == *year && total.month == *month)
                    .map(|total| round_value(total.value))
            })
            .collect();

        let mut line = Line::new().name(year.to_string()).data(data);
        if index % 2 == 1 {
            line = line.line_style(LineStyle::new().type_(LineStyleType::Dashed));
        }

        chart = chart.series(line);
    }

    chart
}

/// The measure per product category.
///
/// `categories` must already be sorted from largest to smallest.
pub(super) fn category_chart(categories: &[CategoryTotal], measure: Measure) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = categories
        .iter()
        .map(|category| (category.category.clone(), round_value(category.value)))
        .unzip();

    let title = match measure {
        Measure::Revenue => "Receita por categoria",
        Measure::SalesCount => "Vendas por categoria",
    };

    vertical_bar_chart(title, labels, values, measure)
}

/// A horizontal bar per seller with the largest seller at the top.
///
/// `sellers` must already be sorted from largest to smallest. `top` is the
/// number of sellers asked for, which may be more than there are.
pub(super) fn top_sellers_chart(sellers: &[SellerTotals], measure: Measure, top: usize) -> Chart {
    // ECharts draws the first category at the bottom of a vertical axis.
    let (labels, values): (Vec<String>, Vec<f64>) = sellers
        .iter()
        .rev()
        .map(|seller| (seller.seller.clone(), round_value(seller.value(measure))))
        .unzip();

    let title = match measure {
        Measure::Revenue => format!("Top {top} vendedores (receita)"),
        Measure::SalesCount => format!("Top {top} vendedores (quantidade de vendas)"),
    };

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(measure_tooltip(measure))
        .grid(
            Grid::new()
                .left("3%")
                .right("8%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(measure_axis(measure))
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(
            bar::Bar::new()
                .name(measure_name(measure))
                .label(Label::new().show(true).position(LabelPosition::Right))
                .data(values),
        )
}

fn vertical_bar_chart(
    title: &str,
    labels: Vec<String>,
    values: Vec<f64>,
    measure: Measure,
) -> Chart {
    Chart::new()
        .title(Title::new().text(title))
        .tooltip(measure_tooltip(measure))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(measure_axis(measure))
        .series(
            bar::Bar::new()
                .name(measure_name(measure))
                .label(Label::new().show(true).position(LabelPosition::Top))
                .data(values),
        )
}

fn measure_name(measure: Measure) -> &'static str {
    match measure {
        Measure::Revenue => "Receita",
        Measure::SalesCount => "Vendas",
    }
}

fn measure_axis(measure: Measure) -> Axis {
    let axis = Axis::new().type_(AxisType::Value);

    match measure {
        Measure::Revenue => axis.axis_label(AxisLabel::new().formatter(currency_formatter())),
        Measure::SalesCount => axis,
    }
}

/// Creates an axis tooltip, formatting revenue as currency.
fn measure_tooltip(measure: Measure) -> Tooltip {
    let tooltip = Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow));

    match measure {
        Measure::Revenue => tooltip.value_formatter(currency_formatter()),
        Measure::SalesCount => tooltip,
    }
}

/// Shows the place name and its total, the third value of each point.
fn location_formatter(measure: Measure) -> JsFunction {
    let value = match measure {
        Measure::Revenue => "currencyFormatter.format(params.value[2])",
        Measure::SalesCount => "params.value[2]",
    };

    JsFunction::new_with_args(
        "params",
        &format!(
            "const currencyFormatter = new Intl.NumberFormat('pt-BR', {{
                  style: 'currency',
                  currency: 'BRL'
                }});
                return params.seriesName + ': ' + {value};"
        ),
    )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

fn round_value(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

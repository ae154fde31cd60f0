//! HTML views for the dashboard page.
//!
//! The whole dashboard is one form: the sidebar holds the filters and the
//! main area holds the tab selector and the charts of the active tab. Any
//! change to the form requests the content again through HTMX.

use maud::{Markup, html};

use crate::{
    dashboard::{
        aggregation::{
            Measure, top_sellers, total_revenue, total_sales, totals_by_category,
            totals_by_location, totals_by_month, totals_by_seller,
        },
        charts::{
            DashboardChart, ECHARTS_SCRIPT, category_chart, chart_view, charts_script,
            location_map_chart, monthly_chart, top_locations_chart, top_sellers_chart,
        },
        metrics::{revenue_metric, sales_count_metric},
        query::{DashboardFilters, Period, TOP_SELLERS, Tab, YEARS},
        tables::seller_table,
    },
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE, FORM_SELECT_STYLE,
        base,
    },
    sales::{Region, Sale},
};

/// The ID of the element that HTMX swaps the dashboard form into.
const DASHBOARD_CONTENT_ID: &str = "dashboard-content";

const TAB_STYLE: &str = "inline-flex items-center px-4 py-2 border-b-2 cursor-pointer \
    text-sm font-medium border-transparent text-gray-500 hover:text-gray-700 \
    hover:border-gray-300 dark:text-gray-400 dark:hover:text-gray-300 \
    has-[:checked]:text-blue-600 has-[:checked]:border-blue-600 \
    dark:has-[:checked]:text-blue-500 dark:has-[:checked]:border-blue-500";

/// Renders the full dashboard page around the dashboard `form`.
pub(super) fn dashboard_page(form: Markup) -> Markup {
    let content = html!(
        div class="flex flex-col px-4 py-6 mx-auto lg:py-8"
        {
            h1 class="mb-6 text-3xl font-bold text-gray-900 dark:text-white"
            {
                "Dashboard de vendas 🛒"
            }

            div id=(DASHBOARD_CONTENT_ID) { (form) }
        }
    );

    base("Dashboard", &[ECHARTS_SCRIPT], &content)
}

/// Renders the dashboard form with the filter sidebar and `body` as the
/// main area.
///
/// # Arguments
/// * `filters` - The current filter selection, used to preset the controls
/// * `seller_options` - The sellers offered in the seller filter
/// * `body` - The content of the active tab
pub(super) fn dashboard_form(
    filters: &DashboardFilters,
    seller_options: &[String],
    body: Markup,
) -> Markup {
    html!(
        form
            id="dashboard"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-trigger="change"
            hx-target={"#" (DASHBOARD_CONTENT_ID)}
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="flex flex-col lg:flex-row gap-6"
        {
            (filter_sidebar(filters, seller_options))

            main class="flex-1 min-w-0"
            {
                (tab_selector(filters.tab))

                div id="indicator" class="mb-2 h-5"
                {
                    span class="htmx-indicator text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Carregando..."
                    }
                }

                (body)
            }
        }
    )
}

fn filter_sidebar(filters: &DashboardFilters, seller_options: &[String]) -> Markup {
    let is_all_periods = filters.period == Period::All;

    html!(
        aside
            class="w-full lg:w-72 shrink-0 p-4 rounded-lg shadow-md
                bg-white dark:bg-gray-800 space-y-6"
        {
            h2 class="text-xl font-semibold text-gray-900 dark:text-white" { "Filtros" }

            div
            {
                label for="region" class=(FORM_LABEL_STYLE) { "Região" }

                select id="region" name="region" class=(FORM_SELECT_STYLE)
                {
                    @for region in Region::ALL {
                        option value=(region.slug()) selected[region == filters.region]
                        {
                            (region.label())
                        }
                    }
                }
            }

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Período" }

                @for (period, text) in [
                    (Period::All, "Dados de todo o período"),
                    (Period::Year, "Ano específico"),
                ] {
                    label class="flex items-center gap-2 mb-2 text-sm text-gray-900 dark:text-white"
                    {
                        input
                            type="radio"
                            name="period"
                            value=(period.as_query_value())
                            checked[period == filters.period]
                            class=(FORM_RADIO_INPUT_STYLE);

                        (text)
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE)
                {
                    "Ano: "
                    span id="year-value" { (filters.year) }
                }

                input
                    id="year"
                    type="range"
                    name="year"
                    min=(YEARS.start())
                    max=(YEARS.end())
                    step="1"
                    value=(filters.year)
                    disabled[is_all_periods]
                    oninput="document.getElementById('year-value').textContent = this.value"
                    class="w-full cursor-pointer disabled:cursor-not-allowed disabled:opacity-50";

                div class="flex justify-between text-xs text-gray-500 dark:text-gray-400"
                {
                    span { (YEARS.start()) }
                    span { (YEARS.end()) }
                }
            }

            div
            {
                label for="seller" class=(FORM_LABEL_STYLE) { "Vendedores" }

                select
                    id="seller"
                    name="seller"
                    multiple
                    size="8"
                    class=(FORM_SELECT_STYLE)
                {
                    @for seller in seller_options {
                        option value=(seller) selected[filters.sellers.contains(seller)]
                        {
                            (seller)
                        }
                    }
                }

                p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
                {
                    "Nenhum vendedor selecionado mostra todos."
                }
            }

            button
                type="submit"
                formaction=(endpoints::DASHBOARD_EXPORT)
                formmethod="get"
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Exportar CSV"
            }
        }
    )
}

fn tab_selector(active_tab: Tab) -> Markup {
    html!(
        nav
            class="flex flex-wrap mb-4 border-b border-gray-200 dark:border-gray-700"
            aria-label="Abas"
        {
            @for tab in Tab::ALL {
                label class=(TAB_STYLE)
                {
                    input
                        type="radio"
                        name="tab"
                        value=(tab.as_query_value())
                        checked[tab == active_tab]
                        class="sr-only";

                    (tab.label())
                }
            }
        }
    )
}

/// Renders the metrics, charts and tables of the active tab for `sales`.
///
/// No sales is not an error: the metrics show zero, the charts are empty
/// and a note explains that nothing matched the filters.
pub(super) fn dashboard_body(filters: &DashboardFilters, sales: &[Sale]) -> Markup {
    let revenue = total_revenue(sales);
    let sales_count = total_sales(sales);

    let (content, charts) = match filters.tab {
        Tab::Revenue => measure_tab(sales, Measure::Revenue, revenue, sales_count, filters.top),
        Tab::SalesCount => {
            measure_tab(sales, Measure::SalesCount, revenue, sales_count, filters.top)
        }
        Tab::Sellers => sellers_tab(sales, revenue, sales_count, filters.top),
    };

    html!(
        @if sales.is_empty() {
            (no_sales_note())
        }

        (content)
        (charts_script(&charts))
    )
}

/// The revenue and sales count tabs share a layout and differ in the measure
/// their charts show.
fn measure_tab(
    sales: &[Sale],
    measure: Measure,
    revenue: f64,
    sales_count: usize,
    top: usize,
) -> (Markup, Vec<DashboardChart>) {
    let locations = totals_by_location(sales, measure);

    let map = DashboardChart::on_map(
        "location-map-chart",
        location_map_chart(&locations, measure),
    );
    let top_locations =
        DashboardChart::new("top-locations-chart", top_locations_chart(&locations, measure));
    let monthly = DashboardChart::new(
        "monthly-chart",
        monthly_chart(&totals_by_month(sales, measure), measure),
    );
    let categories = DashboardChart::new(
        "category-chart",
        category_chart(&totals_by_category(sales, measure), measure),
    );

    let content = html!(
        // Keeps the top sellers selection when switching tabs.
        input type="hidden" name="top" value=(top);

        section id="charts" class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            div class="space-y-4"
            {
                (revenue_metric(revenue))
                (chart_view(&map))
                (chart_view(&top_locations))
            }

            div class="space-y-4"
            {
                (sales_count_metric(sales_count))
                (chart_view(&monthly))
                (chart_view(&categories))
            }
        }
    );

    (content, vec![map, top_locations, monthly, categories])
}

fn sellers_tab(
    sales: &[Sale],
    revenue: f64,
    sales_count: usize,
    top: usize,
) -> (Markup, Vec<DashboardChart>) {
    let seller_totals = totals_by_seller(sales);

    let by_revenue = DashboardChart::new(
        "top-sellers-revenue-chart",
        top_sellers_chart(
            &top_sellers(&seller_totals, Measure::Revenue, top),
            Measure::Revenue,
            top,
        ),
    );
    let by_count = DashboardChart::new(
        "top-sellers-count-chart",
        top_sellers_chart(
            &top_sellers(&seller_totals, Measure::SalesCount, top),
            Measure::SalesCount,
            top,
        ),
    );

    let content = html!(
        div class="mb-4 max-w-xs"
        {
            label for="top" class=(FORM_LABEL_STYLE) { "Quantidade de vendedores" }

            input
                id="top"
                type="number"
                name="top"
                min=(TOP_SELLERS.start())
                max=(TOP_SELLERS.end())
                value=(top)
                class=(FORM_SELECT_STYLE);
        }

        section id="charts" class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            div class="space-y-4"
            {
                (revenue_metric(revenue))
                (chart_view(&by_revenue))
            }

            div class="space-y-4"
            {
                (sales_count_metric(sales_count))
                (chart_view(&by_count))
            }
        }

        (seller_table(&seller_totals))
    );

    (content, vec![by_revenue, by_count])
}

fn no_sales_note() -> Markup {
    html!(
        p
            id="no-sales"
            class="p-4 mb-4 text-sm text-blue-800 rounded-lg bg-blue-50
                dark:bg-gray-800 dark:text-blue-400"
        {
            "Nenhuma venda encontrada para os filtros selecionados."
        }
    )
}

/// Shown in place of the charts when the sales could not be loaded.
pub(super) fn error_panel() -> Markup {
    html!(
        div
            id="data-error"
            role="alert"
            class="p-4 mb-4 text-red-800 rounded-lg bg-red-50 dark:bg-gray-800
                dark:text-red-400"
        {
            p class="font-semibold" { "Não foi possível carregar os dados de vendas." }
            p class="text-sm" { "Tente novamente em alguns instantes ou altere os filtros." }
        }
    )
}

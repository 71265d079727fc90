//! Sentiment Chart Component
//!
//! Line chart of average sentiment per period. Uses ECharts via wasm-bindgen
//! JS interop; the option object is built from serde structs.

use dioxus::prelude::*;
use narrascope_core::ChartSeries;
use serde::Serialize;
use wasm_bindgen::prelude::*;

const CHART_ID: &str = "trend-sentiment-chart";

// ─────────────────────────────────────────────────────────────────────────────
// ECharts JS Interop
// ─────────────────────────────────────────────────────────────────────────────

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = echarts, js_name = init)]
    fn echarts_init(dom: &web_sys::Element) -> JsValue;

    #[wasm_bindgen(js_namespace = echarts, js_name = getInstanceByDom)]
    fn echarts_get_instance(dom: &web_sys::Element) -> JsValue;
}

fn chart_element(element_id: &str) -> Option<web_sys::Element> {
    web_sys::window()?
        .document()?
        .get_element_by_id(element_id)
}

fn existing_instance(element: &web_sys::Element) -> Option<JsValue> {
    let instance = echarts_get_instance(element);
    (!instance.is_null() && !instance.is_undefined()).then_some(instance)
}

fn init_chart(element_id: &str) -> Option<JsValue> {
    let element = chart_element(element_id)?;
    existing_instance(&element).or_else(|| Some(echarts_init(&element)))
}

fn call_method(chart: &JsValue, name: &str, arg: Option<&JsValue>) {
    let method = js_sys::Reflect::get(chart, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(func) = method {
        let _ = match arg {
            Some(arg) => func.call1(chart, arg),
            None => func.call0(chart),
        };
    }
}

fn dispose_chart(element_id: &str) {
    if let Some(element) = chart_element(element_id)
        && let Some(instance) = existing_instance(&element)
    {
        call_method(&instance, "dispose", None);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chart Option
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartOption<'a> {
    tooltip: Tooltip,
    grid: Grid,
    x_axis: Axis<'a>,
    y_axis: Axis<'a>,
    series: [LineSeries<'a>; 1],
}

#[derive(Serialize)]
struct Tooltip {
    trigger: &'static str,
}

#[derive(Serialize)]
struct Grid {
    left: &'static str,
    right: &'static str,
    top: &'static str,
    bottom: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Axis<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    axis_label: AxisLabel,
}

#[derive(Serialize)]
struct AxisLabel {
    color: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LineSeries<'a> {
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a [f64],
    smooth: bool,
    item_style: ItemStyle,
    area_style: ItemStyle,
}

#[derive(Serialize)]
struct ItemStyle {
    color: &'static str,
}

fn build_sentiment_option(series: &ChartSeries) -> ChartOption<'_> {
    ChartOption {
        tooltip: Tooltip { trigger: "axis" },
        grid: Grid {
            left: "50",
            right: "30",
            top: "30",
            bottom: "40",
        },
        x_axis: Axis {
            kind: "category",
            name: None,
            data: Some(&series.labels),
            min: None,
            max: None,
            axis_label: AxisLabel { color: "#888" },
        },
        // Sentiment scores are bounded
        y_axis: Axis {
            kind: "value",
            name: Some("Sentiment"),
            data: None,
            min: Some(-1.0),
            max: Some(1.0),
            axis_label: AxisLabel { color: "#888" },
        },
        series: [LineSeries {
            name: "Average Sentiment",
            kind: "line",
            data: &series.values,
            smooth: true,
            item_style: ItemStyle { color: "#4a90d9" },
            area_style: ItemStyle {
                color: "rgba(74, 144, 217, 0.15)",
            },
        }],
    }
}

fn render_chart(series: &ChartSeries) {
    let Some(chart) = init_chart(CHART_ID) else {
        tracing::warn!("sentiment chart container not found");
        return;
    };

    match serde_wasm_bindgen::to_value(&build_sentiment_option(series)) {
        Ok(option) => {
            call_method(&chart, "setOption", Some(&option));
            call_method(&chart, "resize", None);
        }
        Err(err) => tracing::warn!(error = %err, "failed to build sentiment chart option"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

/// Renders `series` once the container is in the DOM; rebuilt on change.
#[component]
pub fn SentimentChart(series: ChartSeries) -> Element {
    use_effect(use_reactive(&series, |series| {
        spawn(async move {
            // Delay to ensure the container exists after render
            gloo_timers::future::TimeoutFuture::new(50).await;
            render_chart(&series);
        });
    }));

    use_drop(|| dispose_chart(CHART_ID));

    rsx! {
        div { id: CHART_ID, class: "chart-container" }
    }
}

#![allow(non_snake_case)]

use charming::{
  component::{Axis, Grid, Legend, Title},
  element::{AxisType, Color, TextStyle, Tooltip, Trigger},
  series::{Bar, Pie},
  Chart, WasmRenderer,
};
use dioxus::{logger::tracing::{info, warn}, prelude::*};
use moontracker_client::{
  format::Formatter,
  stats::{ChartData, StatsView, EXPENSE_LABEL, INCOME_LABEL},
};
use rust_decimal::prelude::ToPrimitive;

static CANVAS_ID: &str = "stats-chart";

const INCOME_COLOR: &str = "#10b981";
const EXPENSE_COLOR: &str = "#ef4444";

// Resolves once echarts is available on the page.
const LOAD_ECHARTS: &str = r#"
  if (window.echarts) {
    dioxus.send(true);
  } else {
    const scriptElem = document.createElement('script');
    scriptElem.src = 'https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js';
    scriptElem.async = true;
    scriptElem.onload = function() { dioxus.send(true); };
    scriptElem.onerror = function() {
      console.error('Error loading echarts');
      dioxus.send(false);
    };
    document.head.appendChild(scriptElem);
  }
"#;

const DISPOSE_CHART: &str = r#"
  const element = document.getElementById('stats-chart');
  if (element && window.echarts) {
    const chart = echarts.getInstanceByDom(element);
    if (chart) { chart.dispose(); }
  }
"#;

fn to_f64(values: &[rust_decimal::Decimal]) -> Vec<f64> {
  values.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect()
}

fn build_chart(data: &ChartData, fmt: &Formatter) -> Chart {
  let chart = Chart::new()
    .background_color("rgba(0,0,0,0)")
    .color(vec![Color::Value(INCOME_COLOR.to_string()), Color::Value(EXPENSE_COLOR.to_string())]);

  match data {
    ChartData::Totals { income, expense } => {
      let slices: Vec<(f64, String)> = [income, expense]
        .iter()
        .map(|s| (s.value.to_f64().unwrap_or(0.0), format!("{} {}", s.label, fmt.format_percent(s.percent))))
        .collect();
      chart
        .title(Title::new().text("Income vs expense").text_style(TextStyle::new().color("#e2e8f0")))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("0").text_style(TextStyle::new().color("#cbd5e1")))
        .series(
          Pie::new()
            .name("Totals")
            .radius(vec!["45%", "70%"])
            .data(slices.iter().map(|(v, l)| (*v, l.as_str())).collect::<Vec<(f64, &str)>>()),
        )
    }
    ChartData::Breakdown { labels, income, expense } => chart
      .title(Title::new().text("By category").text_style(TextStyle::new().color("#e2e8f0")))
      .tooltip(Tooltip::new().trigger(Trigger::Axis))
      .legend(
        Legend::new()
          .data(vec![INCOME_LABEL, EXPENSE_LABEL])
          .bottom("0")
          .text_style(TextStyle::new().color("#cbd5e1")),
      )
      .grid(Grid::new().left("3%").right("4%").contain_label(true))
      .x_axis(Axis::new().type_(AxisType::Category).data(labels.clone()))
      .y_axis(Axis::new().type_(AxisType::Value))
      .series(Bar::new().name(INCOME_LABEL).data(to_f64(income)))
      .series(Bar::new().name(EXPENSE_LABEL).data(to_f64(expense))),
  }
}

/// Draws whatever the chart slot currently holds. A new slot revision
/// disposes the previous echarts instance before rendering.
#[component]
pub fn ChartPanel(stats: ReadOnlySignal<Option<StatsView>>, formatter: Formatter) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, None));
  let mut echarts_ready = use_signal(|| false);
  let mut rendered_revision = use_signal(|| 0u64);

  use_future(move || async move {
    let mut loader = document::eval(LOAD_ECHARTS);
    match loader.recv::<bool>().await {
      Ok(true) => echarts_ready.set(true),
      Ok(false) => warn!("echarts failed to load, chart disabled"),
      Err(e) => warn!("echarts loader error: {:?}", e),
    }
  });

  use_effect(move || {
    if !echarts_ready() {
      return;
    }
    let Some(view) = stats() else {
      return;
    };
    let revision = view.chart.revision();
    if revision == *rendered_revision.peek() {
      return;
    }
    let Some(data) = view.chart.current() else {
      return;
    };

    document::eval(DISPOSE_CHART);
    let chart = build_chart(data, &formatter);
    match renderer.read_unchecked().render(CANVAS_ID, &chart) {
      Ok(_) => {
        info!("chart rendered, revision {}", revision);
        rendered_revision.set(revision);
      }
      Err(e) => warn!("failed to render chart: {:?}", e),
    }
  });

  rsx! {
    div {
      class: "chart-card",
      div { id: CANVAS_ID, class: "chart-canvas" }
    }
  }
}

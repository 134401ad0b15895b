#![allow(non_snake_case)]

use charming::{component::{Axis, Grid, Title}, element::{AxisLabel, AxisType, Color, FormatterFunction, LineStyle, NameLocation, SplitLine, TextStyle, Tooltip}, series::Bar, Chart, WasmRenderer};
use dioxus::{logger::tracing::error, prelude::*};

use crate::utils::{chartdata::{histogram_points, market_cap_points, scatter_option}, server::{BarChart, Histogram, ScatterChart}};

static CANVAS_ID_BAR: &str = "market-cap-bar";
static CANVAS_ID_SCATTER: &str = "price-cap-scatter";
static CANVAS_ID_HIST: &str = "price-change-hist";

fn chart_title(text: &str) -> Title {
  Title::new()
    .text(text)
    .text_style(
      TextStyle::new()
      .color("rgba(255, 255, 255, 1)")
      .font_family("Arial")
      .font_size(18)
    )
    // top, right, bottom, left
    .padding((12, 0, 5, 20))
}

fn value_axis(name: &str, gap: f64) -> Axis {
  Axis::new()
    .type_(AxisType::Value)
    .name(name)
    .name_location(NameLocation::Middle)
    .name_gap(gap)
    .name_text_style(
      TextStyle::new()
      .color("#ffffff")
      .font_family("Consolas")
      .font_size(14)
    )
    .split_line(
      SplitLine::new()
      .line_style(
        LineStyle::new()
        .color("#737373")
      )
    )
    .axis_label(
      AxisLabel::new()
      .color("#cccccc")
    )
}

#[component]
pub fn MarketCapBar(bar: ReadOnlySignal<BarChart>) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, Some(420)));

  use_effect(move || {
    let bar = bar();
    let names = bar.names.iter().map(String::as_str).collect::<Vec<_>>();

    let chart = Chart::new()
    .title(chart_title(&bar.title))
    .background_color("rgba(41,52,65,1)")
    .color(vec![Color::Value("#72ccff".to_string())])
    .tooltip(
      Tooltip::new()
      .formatter("{b}: ${c}")
    )
    .grid(
      Grid::new()
      .left("10%")
      .bottom("14%")
      .contain_label(true)
    )
    .x_axis(
      Axis::new()
      .type_(AxisType::Category)
      .name(bar.x_label.as_str())
      .name_location(NameLocation::Middle)
      .name_gap(30.0)
      .data(names)
      .axis_label(
        AxisLabel::new()
        .color("#cccccc")
      )
    )
    .y_axis(value_axis(&bar.y_label, 60.0))
    .series(
      Bar::new()
      .name("Market cap")
      .data(market_cap_points(&bar.market_caps))
    );

    if let Err(e) = renderer.read_unchecked().render(CANVAS_ID_BAR, &chart) {
      error!("failed to render market cap bar chart: {:?}", e);
    }
  });

  rsx! {
    div { id: CANVAS_ID_BAR }
  }
}

#[component]
pub fn PriceChangeHist(histogram: ReadOnlySignal<Histogram>) -> Element {
  let renderer = use_signal(|| WasmRenderer::new_opt(None, Some(350)));

  use_effect(move || {
    let histogram = histogram();

    let chart = Chart::new()
    .title(chart_title(&histogram.title))
    .background_color("rgba(41,52,65,1)")
    .color(vec![Color::Value("#fc97af".to_string())])
    .tooltip(
      Tooltip::new()
      // params.value = [centre, count, lower, upper, label]
      .formatter(FormatterFunction::new_with_args(
        "params",
        r#"
        var vals = params.value;
        return 'Change : ' + vals[4] + '%<br/>Count : ' + vals[1];
        "#
      ))
    )
    .grid(
      Grid::new()
      .show(false)
      .contain_label(true)
      .left("10%")
      .bottom("14%")
      .right("8%")
    )
    .x_axis(value_axis(&histogram.x_label, 30.0).scale(true))
    .y_axis(value_axis(&histogram.y_label, 40.0))
    .series(
      Bar::new()
      .name("Assets")
      .data(histogram_points(&histogram.bins))
    );

    if let Err(e) = renderer.read_unchecked().render(CANVAS_ID_HIST, &chart) {
      error!("failed to render price change histogram: {:?}", e);
    }
  });

  rsx! {
    div { id: CANVAS_ID_HIST }
  }
}

/// charming has no per-point symbol size, so the scatter option goes to ECharts directly.
#[component]
pub fn PriceVsCapScatter(scatter: ReadOnlySignal<ScatterChart>) -> Element {

  use_effect(move || {
    let option = scatter_option(&scatter());
    let script = format!(
      r#"
      var element = document.getElementById("{CANVAS_ID_SCATTER}");
      if (!element) {{ console.log('no scatter element found'); }}
      else {{
        var chart = echarts.getInstanceByDom(element) || echarts.init(element, null, {{ width: null, height: 420 }});
        var option = {option};
        option.tooltip.formatter = function (params) {{
          var v = params.value;
          return '<b>' + params.name + '</b><br/>'
            + 'Market cap: $' + v[0].toLocaleString() + '<br/>'
            + 'Price: $' + v[1].toLocaleString() + '<br/>'
            + 'Volume: $' + v[2].toLocaleString() + '<br/>'
            + '24h change: ' + v[3].toFixed(2) + '%';
        }};
        chart.setOption(option, true);
        if (!element.dataset.observed) {{
          new ResizeObserver(function () {{ chart.resize(); }}).observe(element);
          element.dataset.observed = "1";
        }}
      }}
      "#
    );
    document::eval(&script);
  });

  rsx! {
    div { id: CANVAS_ID_SCATTER }
  }
}

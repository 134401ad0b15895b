use charming::datatype::{CompositeValue, DataPoint, NumericValue};
use serde_json::{json, Value};

use super::server::{HistogramBin, ScatterChart};

// plasma-like ramp from falling to rising prices
pub const CHANGE_COLORS: [&str; 5] = ["#0d0887", "#7e03a8", "#cc4778", "#f89540", "#f0f921"];

pub fn market_cap_points(market_caps: &[f64]) -> Vec<DataPoint> {
  market_caps.iter()
    .map(|&cap| DataPoint::Value(CompositeValue::Number(NumericValue::Float(cap))))
    .collect()
}

fn bin_label(bin: &HistogramBin) -> String {
  format!("{:.2} to {:.2}", bin.lower, bin.upper)
}

/// Each bin becomes `[centre, count, lower, upper, label]` so the tooltip can show its range.
pub fn histogram_points(bins: &[HistogramBin]) -> Vec<DataPoint> {
  bins.iter().map(|bin| {
    let centre = (bin.lower + bin.upper) / 2.0;
    DataPoint::Value(CompositeValue::Array(vec![
      CompositeValue::Number(NumericValue::Float(centre)),
      CompositeValue::Number(NumericValue::Integer(bin.count as i64)),
      CompositeValue::Number(NumericValue::Float(bin.lower)),
      CompositeValue::Number(NumericValue::Float(bin.upper)),
      CompositeValue::String(bin_label(bin)),
    ]))
  }).collect()
}

/// Full ECharts option for the scatter: per-point `symbolSize` carries volume and a
/// continuous visual map over the 24h change carries colour.
pub fn scatter_option(scatter: &ScatterChart) -> Value {
  let data = scatter.points.iter().map(|p| json!({
    "name": p.name,
    "value": [p.market_cap, p.current_price, p.total_volume, p.price_change_percentage_24h],
    "symbolSize": p.marker_size,
  })).collect::<Vec<_>>();

  // a zero-width colour range renders every point in the lowest colour
  let (min, max) = if scatter.color_min < scatter.color_max {
    (scatter.color_min, scatter.color_max)
  } else {
    (scatter.color_min - 1.0, scatter.color_max + 1.0)
  };

  json!({
    "title": {
      "text": scatter.title,
      "textStyle": { "color": "rgba(255, 255, 255, 1)", "fontFamily": "Arial", "fontSize": 18 },
      "padding": [12, 0, 5, 20]
    },
    "backgroundColor": "rgba(41,52,65,1)",
    "tooltip": { "trigger": "item" },
    "grid": { "left": "10%", "right": "14%", "bottom": "14%", "containLabel": true },
    "xAxis": {
      "type": "value",
      "name": scatter.x_label,
      "nameLocation": "middle",
      "nameGap": 30,
      "nameTextStyle": { "color": "#ffffff", "fontFamily": "Consolas", "fontSize": 14 },
      "splitLine": { "lineStyle": { "color": "#737373" } },
      "axisLabel": { "color": "#cccccc" }
    },
    "yAxis": {
      "type": "value",
      "name": scatter.y_label,
      "nameLocation": "middle",
      "nameGap": 50,
      "nameTextStyle": { "color": "#ffffff", "fontFamily": "Consolas", "fontSize": 14 },
      "splitLine": { "lineStyle": { "color": "#737373" } },
      "axisLabel": { "color": "#cccccc" }
    },
    "visualMap": {
      "type": "continuous",
      "dimension": 3,
      "min": min,
      "max": max,
      "calculable": true,
      "right": 10,
      "top": "middle",
      "text": [scatter.color_label, ""],
      "textStyle": { "color": "#cccccc" },
      "inRange": { "color": CHANGE_COLORS }
    },
    "series": [{
      "type": "scatter",
      "name": scatter.title,
      "data": data,
      "itemStyle": { "opacity": 0.8 }
    }]
  })
}

//! Bar Chart Component
//!
//! Horizontal bars drawn with plain CSS widths.

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text shown at the end of the bar
    pub display: String,
}

impl Bar {
    pub fn count(label: impl Into<String>, value: u32) -> Self {
        Self { label: label.into(), value: value as f64, display: value.to_string() }
    }
}

/// Width of each bar relative to the largest one, in percent
pub fn bar_widths(bars: &[Bar]) -> Vec<f64> {
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    bars.iter()
        .map(|b| if max > 0.0 { (b.value.max(0.0) / max * 100.0).round() } else { 0.0 })
        .collect()
}

#[component]
pub fn BarChart(#[prop(into)] title: String, #[prop(into)] bars: Signal<Vec<Bar>>) -> impl IntoView {
    view! {
        <div class="bar-chart">
            <h3 class="chart-title">{title}</h3>
            {move || {
                let bars = bars.get();
                if bars.is_empty() {
                    return view! { <p class="empty-state">"No data for this period"</p> }.into_any();
                }
                let widths = bar_widths(&bars);
                bars.into_iter()
                    .zip(widths)
                    .map(|(bar, width)| view! {
                        <div class="bar-row">
                            <span class="bar-label">{bar.label}</span>
                            <div class="bar-track">
                                <div class="bar-fill" style=format!("width: {}%", width)></div>
                            </div>
                            <span class="bar-value">{bar.display}</span>
                        </div>
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_scale_to_largest() {
        let bars = vec![Bar::count("new", 5), Bar::count("won", 10), Bar::count("lost", 0)];
        assert_eq!(bar_widths(&bars), vec![50.0, 100.0, 0.0]);
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(bar_widths(&[Bar::count("a", 0)]), vec![0.0]);
    }
}

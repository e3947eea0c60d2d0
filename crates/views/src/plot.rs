use shared::{
    domain::{DisplayColor, ERUPTION_LABEL, WAITING_LABEL},
    protocol::{PlotPoint, PlotSpec, SerializedSample},
};

/// Fixed axis ranges matching the known dataset domain.
pub const X_RANGE: [f64; 2] = [40.0, 100.0];
pub const Y_RANGE: [f64; 2] = [0.5, 6.0];

const TEMPLATE: &str = "simple_white";
const SUBTITLE: &str = "Source: Old Faithful Geyser Dataset.";

/// Builds the scatter specification for the current sample: waiting time on
/// x, eruption time on y. Returns `None` for an empty sample so the previous
/// plot stays as-is.
pub fn build_plot(
    serialized: &SerializedSample,
    fraction: f64,
    color: DisplayColor,
) -> Option<PlotSpec> {
    if serialized.is_empty() {
        return None;
    }

    let points = serialized
        .records()
        .iter()
        .map(|record| PlotPoint {
            x: record.waiting_time,
            y: record.eruption_time,
        })
        .collect();

    Some(PlotSpec {
        title: format!(
            "Plot of {} against {} for a sample of {:.1}%",
            ERUPTION_LABEL.name,
            WAITING_LABEL.name,
            fraction * 100.0
        ),
        subtitle: SUBTITLE.to_string(),
        x_label: WAITING_LABEL.name.to_string(),
        y_label: ERUPTION_LABEL.name.to_string(),
        x_range: X_RANGE,
        y_range: Y_RANGE,
        template: TEMPLATE.to_string(),
        marker_color: color,
        points,
    })
}

use crate::stats::DifficultyKey;

/// Fraction of the value span added above the highest point.
const HEADROOM: f64 = 0.1;
const MIN_SPAN: f64 = 1.0;

/// X bounds and tick labels for categorical keys placed at 0..n-1.
///
/// Labels are spread evenly across the bounds, so they line up with the
/// points as long as every position gets exactly one label.
pub fn x_axis_params(keys: &[DifficultyKey]) -> ([f64; 2], Vec<String>) {
    match keys {
        [] => ([0.0, 1.0], Vec::new()),
        [only] => ([-1.0, 1.0], vec![String::new(), only.to_string(), String::new()]),
        _ => (
            [0.0, (keys.len() - 1) as f64],
            keys.iter().map(ToString::to_string).collect(),
        ),
    }
}

/// Y bounds covering all values, anchored at zero unless values go negative.
pub fn y_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (lowest, highest) = values
        .into_iter()
        .fold((0.0f64, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !highest.is_finite() {
        return [0.0, MIN_SPAN];
    }

    let top = highest + (highest - lowest) * HEADROOM;
    [lowest, top.max(lowest + MIN_SPAN)]
}

/// Low, middle and high labels for the y axis.
pub fn y_labels(bounds: [f64; 2]) -> Vec<String> {
    let [lo, hi] = bounds;
    vec![
        format_label(lo),
        format_label((lo + hi) / 2.0),
        format_label(hi),
    ]
}

/// Format a numeric label, dropping the decimals of whole numbers
pub fn format_label(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round())
    } else {
        format!("{value:.1}")
    }
}

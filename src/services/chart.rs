// SPDX-License-Identifier: MIT

//! Signal chart rendering.
//!
//! Draws one line per set of a named numeric signal against the set's
//! `timestamps` array, written as an SVG file.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutSet};

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Render one line per set of `signal` over time into an SVG at `path`.
///
/// Every set must carry equal-length numeric `timestamps` and `signal`
/// arrays; anything else is an [`AppError::InvalidData`].
pub fn render_signal_chart(workout: &Workout, signal: &str, path: &Path) -> Result<()> {
    let series: Vec<(String, Vec<(f64, f64)>)> = workout
        .sets
        .iter()
        .map(|set| Ok((set.id.clone(), set_series(set, signal)?)))
        .collect::<Result<_>>()?;

    let points: Vec<(f64, f64)> = series
        .iter()
        .flat_map(|(_, points)| points.iter().copied())
        .collect();
    if points.is_empty() {
        return Err(AppError::InvalidData(format!(
            "no data points for signal {}",
            signal
        )));
    }

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1));

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} over time", signal), ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| AppError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("timestamp")
        .y_desc(signal)
        .draw()
        .map_err(|e| AppError::Render(e.to_string()))?;

    for (idx, (set_id, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color))
            .map_err(|e| AppError::Render(e.to_string()))?
            .label(set_id)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(|e| AppError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| AppError::Render(e.to_string()))?;

    tracing::info!(
        workout_id = %workout.id,
        signal,
        sets = series.len(),
        path = %path.display(),
        "Signal chart rendered"
    );
    Ok(())
}

/// Pair a set's timestamps with its signal values.
fn set_series(set: &WorkoutSet, signal: &str) -> Result<Vec<(f64, f64)>> {
    let timestamps = numeric_array(set, "timestamps")?;
    let values = numeric_array(set, signal)?;

    if timestamps.len() != values.len() {
        return Err(AppError::InvalidData(format!(
            "set {}: timestamps has {} entries but {} has {}",
            set.id,
            timestamps.len(),
            signal,
            values.len()
        )));
    }

    Ok(timestamps.into_iter().zip(values).collect())
}

fn numeric_array(set: &WorkoutSet, key: &str) -> Result<Vec<f64>> {
    let value = set
        .fields
        .get(key)
        .ok_or_else(|| AppError::InvalidData(format!("set {}: missing field {}", set.id, key)))?;

    let items = value.as_array().ok_or_else(|| {
        AppError::InvalidData(format!("set {}: field {} is not an array", set.id, key))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| {
                AppError::InvalidData(format!("set {}: field {} contains a non-number", set.id, key))
            })
        })
        .collect()
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    // A degenerate range makes plotters draw nothing useful.
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_with(fields: serde_json::Value) -> WorkoutSet {
        WorkoutSet {
            id: "S1".to_string(),
            fields: match fields {
                serde_json::Value::Object(map) => map,
                _ => panic!("expected object"),
            },
            reps: vec![],
        }
    }

    #[test]
    fn test_set_series_pairs_points() {
        let set = set_with(json!({
            "timestamps": [10, 20, 30],
            "velocityZ": [0.1, 0.9, 0.4],
        }));

        let points = set_series(&set, "velocityZ").unwrap();
        assert_eq!(points, vec![(10.0, 0.1), (20.0, 0.9), (30.0, 0.4)]);
    }

    #[test]
    fn test_set_series_missing_signal() {
        let set = set_with(json!({"timestamps": [10, 20]}));

        let err = set_series(&set, "velocityZ").unwrap_err();
        assert!(matches!(err, AppError::InvalidData(_)));
    }

    #[test]
    fn test_set_series_length_mismatch() {
        let set = set_with(json!({
            "timestamps": [10, 20, 30],
            "velocityZ": [0.1, 0.9],
        }));

        let err = set_series(&set, "velocityZ").unwrap_err();
        assert!(matches!(err, AppError::InvalidData(_)));
    }

    #[test]
    fn test_set_series_non_numeric_values() {
        let set = set_with(json!({
            "timestamps": [10, 20],
            "velocityZ": [0.1, "fast"],
        }));

        let err = set_series(&set, "velocityZ").unwrap_err();
        assert!(matches!(err, AppError::InvalidData(_)));
    }

    #[test]
    fn test_padded_range_widens_constant_signal() {
        let (lo, hi) = padded_range([5.0, 5.0, 5.0].into_iter());
        assert_eq!((lo, hi), (4.0, 6.0));
    }
}

/// Index of the last stop whose label is `<= input`.
///
/// Inputs below the first label (and NaN) map to `0`. `labels` must be sorted ascending.
pub fn find_stop_less_than_or_equal_to(labels: &[f64], input: f64) -> usize {
    labels.partition_point(|&label| label <= input).saturating_sub(1)
}

#[cfg(test)]
#[path = "../../tests/unit/interpolate/stops.rs"]
mod tests;

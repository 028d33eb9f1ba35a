//! Piecewise-linear mapping between value ranges.
//!
//! Card geometry is expressed as "when the top card has moved this far, this
//! property has this value", so everything above the gesture layer reduces to
//! calls of [`interpolate`].

/// Behaviour outside the input range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Hold the nearest output endpoint.
    #[default]
    Clamp,
    /// Continue the slope of the outermost segment.
    Extend,
    /// Return the input value unchanged.
    Identity,
}

/// Maps `value` from `input_range` onto `output_range`.
///
/// `input_range` must be ascending and the same length as `output_range`.
/// Ranges shorter than two points yield the first output (or `0.0`). A NaN
/// input yields the first output.
pub fn interpolate(
    value: f32,
    input_range: &[f32],
    output_range: &[f32],
    extrapolate: Extrapolate,
) -> f32 {
    debug_assert_eq!(
        input_range.len(),
        output_range.len(),
        "interpolate ranges must have equal length"
    );
    let len = input_range.len().min(output_range.len());
    if len < 2 {
        return output_range.first().copied().unwrap_or(0.0);
    }
    if value.is_nan() {
        return output_range[0];
    }

    let first = input_range[0];
    let last = input_range[len - 1];
    if value < first || value > last {
        match extrapolate {
            Extrapolate::Clamp => {
                return if value < first {
                    output_range[0]
                } else {
                    output_range[len - 1]
                };
            }
            Extrapolate::Identity => return value,
            Extrapolate::Extend => {}
        }
    }

    let segment = input_range[..len]
        .windows(2)
        .position(|pair| value <= pair[1])
        .unwrap_or(len - 2);
    let (in_start, in_end) = (input_range[segment], input_range[segment + 1]);
    let (out_start, out_end) = (output_range[segment], output_range[segment + 1]);
    if (in_end - in_start).abs() <= f32::EPSILON {
        return out_start;
    }
    let fraction = (value - in_start) / (in_end - in_start);
    out_start + (out_end - out_start) * fraction
}

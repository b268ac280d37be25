//! Exponential approach-to-target helpers.
//!
//! Formula: `current + (target - current) * clamp(dt * rate, 0, 1)`.
//! Фракция клампится в [0, 1], поэтому один вызов никогда не перелетает target,
//! а повторные вызовы сходятся монотонно.

/// Ниже этого квадрата расстояния значение прилипает к target
const SNAP_DISTANCE_SQUARED: f32 = 1.0e-8;

/// Move `current` toward `target` by a rate-scaled fraction of the remaining distance.
///
/// - `rate <= 0.0` → сразу target (как "мгновенная" интерполяция)
/// - `delta_time <= 0.0` → current без изменений
pub fn approach(current: f32, target: f32, delta_time: f32, rate: f32) -> f32 {
    if rate <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < SNAP_DISTANCE_SQUARED {
        return target;
    }

    let alpha = (delta_time * rate).clamp(0.0, 1.0);
    current + distance * alpha
}

/// Linear remap of `value` from `input` range into `output` range, clamped to `output`.
pub fn map_range_clamped(input: (f32, f32), output: (f32, f32), value: f32) -> f32 {
    let span = input.1 - input.0;
    if span.abs() <= f32::EPSILON {
        return output.0;
    }

    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * t
}

/// Normalize an angle in degrees into (-180, 180].
pub fn normalize_axis_degrees(angle: f32) -> f32 {
    let mut wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

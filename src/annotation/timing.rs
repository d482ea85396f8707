/// Tolerance, in grid ticks, under which a value counts as already on the grid.
const GRID_TICK_EPS: f64 = 1e-6;

/// Rounds `value` to the nearest multiple of `step`.
///
/// Steps that are the reciprocal of an integer (0.01, 0.001, 0.5) are handled by
/// scaling up and dividing back down, so `round_to_nearest(1.8, 0.01)` is the
/// same `f64` as the literal `1.8`.
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    snap(value, step, f64::round)
}

/// Smallest grid value that is `>= value`, ignoring float noise below the grid.
pub fn snap_up(value: f64, step: f64) -> f64 {
    snap(value, step, |ticks| {
        let nearest = ticks.round();
        if (ticks - nearest).abs() < GRID_TICK_EPS {
            nearest
        } else {
            ticks.ceil()
        }
    })
}

/// Largest grid value that is `<= value`, ignoring float noise below the grid.
pub fn snap_down(value: f64, step: f64) -> f64 {
    snap(value, step, |ticks| {
        let nearest = ticks.round();
        if (ticks - nearest).abs() < GRID_TICK_EPS {
            nearest
        } else {
            ticks.floor()
        }
    })
}

fn snap(value: f64, step: f64, to_tick: impl Fn(f64) -> f64) -> f64 {
    if step.is_nan() || step <= 0.0 || !value.is_finite() {
        return value;
    }
    let per_unit = 1.0 / step;
    let per_unit_rounded = per_unit.round();
    if per_unit_rounded >= 1.0 && (per_unit - per_unit_rounded).abs() < GRID_TICK_EPS {
        to_tick(value * per_unit_rounded) / per_unit_rounded
    } else {
        to_tick(value / step) * step
    }
}

/// `value` limited to `[lo, hi]`; never panics, `lo` wins when the bounds cross.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Whether two boundaries land on the same grid point.
pub fn same_on_grid(a: f64, b: f64, step: f64) -> bool {
    round_to_nearest(a, step) == round_to_nearest(b, step)
}

/// `mm:ss` below one hour, `hh:mm:ss` from one hour up. Fractions are truncated.
pub fn format_seconds(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if total >= 3600 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

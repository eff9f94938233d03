//! Grid enumeration for a sweep.
//!
//! Pure and deterministic, kept separate from the execution loop so the loop
//! can change without touching enumeration.

use crate::core::Result;
use crate::core::config::{AxisRange, ParamsConfig};
use crate::core::error::SweepErrorKind;

/// One (throttle, speed, brake) combination under test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub throttle: f64,
    pub speed: f64,
    pub brake: f64,
}

impl GridPoint {
    /// Directory tag for this point, e.g. `t0.1_s20_b0.05`.
    pub fn tag(&self) -> String {
        format!("t{}_s{}_b{}", self.throttle, self.speed, self.brake)
    }
}

/// Round to a fixed number of decimals, halves away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Expand an axis range into its concrete values, both endpoints inclusive.
///
/// The point count is derived from the range up front rather than stepping
/// until the bound is crossed, so boundary inclusion does not depend on
/// accumulated floating-point error.
pub fn axis_values(axis: &'static str, range: &AxisRange) -> Result<Vec<f64>> {
    if range.step <= 0.0 {
        return Err(SweepErrorKind::InvalidAxisStep {
            axis,
            step: range.step,
        }
        .into());
    }

    let count = ((range.stop - range.start) / range.step).round() as i64 + 1;

    Ok((0..count.max(0))
        .map(|i| round_to(range.start + i as f64 * range.step, 3))
        .collect())
}

/// Full cross product in throttle-major, speed-middle, brake-minor order.
///
/// Throttle and brake values carry 3 decimals, speeds 2.
pub fn build_grid(params: &ParamsConfig) -> Result<Vec<GridPoint>> {
    let throttles = axis_values("throttle", &params.throttle)?;
    let brakes = axis_values("brake", &params.brake)?;
    let speeds: Vec<f64> = params
        .target_speed
        .values
        .iter()
        .map(|v| round_to(*v, 2))
        .collect();

    let mut points = Vec::with_capacity(throttles.len() * speeds.len() * brakes.len());
    for &throttle in &throttles {
        for &speed in &speeds {
            for &brake in &brakes {
                points.push(GridPoint {
                    throttle,
                    speed,
                    brake,
                });
            }
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpeedAxis;

    fn range(start: f64, stop: f64, step: f64) -> AxisRange {
        AxisRange { start, stop, step }
    }

    fn params(throttle: AxisRange, brake: AxisRange, speeds: Vec<f64>) -> ParamsConfig {
        ParamsConfig {
            throttle,
            brake,
            target_speed: SpeedAxis { values: speeds },
            settling_time: 5.0,
            output_root: "./test_results".into(),
        }
    }

    #[test]
    fn test_axis_includes_both_endpoints() {
        let values = axis_values("throttle", &range(0.0, 0.2, 0.1)).unwrap();
        assert_eq!(values, vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn test_axis_rounds_accumulated_step_error() {
        // 3 * 0.1 accumulates to 0.30000000000000004 without rounding
        let values = axis_values("throttle", &range(0.0, 0.3, 0.1)).unwrap();
        assert_eq!(values, vec![0.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_axis_single_point_when_start_equals_stop() {
        let values = axis_values("brake", &range(0.5, 0.5, 0.1)).unwrap();
        assert_eq!(values, vec![0.5]);
    }

    #[test]
    fn test_axis_empty_when_stop_precedes_start() {
        let values = axis_values("brake", &range(0.2, 0.0, 0.1)).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_axis_rejects_non_positive_step() {
        assert!(axis_values("throttle", &range(0.0, 1.0, 0.0)).is_err());
        assert!(axis_values("throttle", &range(0.0, 1.0, -0.1)).is_err());
    }

    #[test]
    fn test_grid_is_full_cross_product_in_order() {
        let params = params(
            range(0.0, 0.2, 0.1),
            range(0.0, 0.2, 0.1),
            vec![10.0, 20.0],
        );
        let points = build_grid(&params).unwrap();

        assert_eq!(points.len(), 18);

        // Throttle-major, speed-middle, brake-minor
        assert_eq!(
            points[0],
            GridPoint {
                throttle: 0.0,
                speed: 10.0,
                brake: 0.0
            }
        );
        assert_eq!(
            points[1],
            GridPoint {
                throttle: 0.0,
                speed: 10.0,
                brake: 0.1
            }
        );
        assert_eq!(
            points[3],
            GridPoint {
                throttle: 0.0,
                speed: 20.0,
                brake: 0.0
            }
        );
        assert_eq!(
            points[17],
            GridPoint {
                throttle: 0.2,
                speed: 20.0,
                brake: 0.2
            }
        );
    }

    #[test]
    fn test_speeds_round_to_two_decimals() {
        // The f64 nearest 12.345 sits just above the tie, so it rounds up
        let at_tie = params(range(0.0, 0.0, 0.1), range(0.0, 0.0, 0.1), vec![12.345]);
        assert_eq!(build_grid(&at_tie).unwrap()[0].speed, 12.35);

        let below_tie = params(range(0.0, 0.0, 0.1), range(0.0, 0.0, 0.1), vec![12.344]);
        assert_eq!(build_grid(&below_tie).unwrap()[0].speed, 12.34);
    }

    #[test]
    fn test_tag_format() {
        let point = GridPoint {
            throttle: 0.1,
            speed: 20.0,
            brake: 0.05,
        };
        assert_eq!(point.tag(), "t0.1_s20_b0.05");
    }
}

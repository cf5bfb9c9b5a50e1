use crate::models::{BarLine, Measure, StaffSystem};

/// Pair consecutive bar lines into numbered measures.
///
/// Each span takes the vertical extent of the first staff system containing
/// the left bar's center, or the bar's own extent when none does. Spans
/// narrower than `min_bar_width` are dropped without consuming a number.
pub fn assemble_measures(
    bars: &[BarLine],
    staff_systems: &[StaffSystem],
    min_bar_width: u32,
) -> Vec<Measure> {
    let mut measures = Vec::new();
    let mut bar_number = 1;

    for pair in bars.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let measure_width = next.x - current.x;

        let center_y = current.center_y();
        let (y, height) = match staff_systems.iter().find(|s| s.contains(center_y)) {
            Some(staff) => (staff.y, staff.height),
            None => {
                log::debug!(
                    "No staff system contains y={} (bar at x={}), using bar extent",
                    center_y,
                    current.x
                );
                (current.y, current.height)
            }
        };

        if i64::from(measure_width) >= i64::from(min_bar_width) {
            measures.push(Measure {
                bar_number,
                x: current.x as f64,
                y: y as f64,
                width: measure_width as f64,
                height: height as f64,
            });
            bar_number += 1;
        }
    }

    measures
}

//! Time ↔ position ↔ pixel conversions within the visible zoom window.
//!
//! Pure functions, no state. Degenerate inputs (empty zoom, zero width,
//! missing time) clamp to the origin instead of erroring.

use retrace_core::{Time, ZoomRegion};

/// Normalized position of `time` within `zoom`, in `[0, 1]`.
///
/// `None` (no hover or selection yet) maps to the origin, as do times at
/// or before the zoom start; times at or past the zoom end map to 1. An
/// empty zoom region maps everything to 0.
pub fn position(time: Option<Time>, zoom: ZoomRegion) -> f64 {
    let Some(time) = time else { return 0.0 };

    if zoom.is_empty() || time <= zoom.start {
        return 0.0;
    }
    if time >= zoom.end {
        return 1.0;
    }

    time.since(zoom.start) as f64 / zoom.duration_ms() as f64
}

/// Pixel offset of `time` on a timeline `width_px` wide.
pub fn pixel_offset(time: Option<Time>, zoom: ZoomRegion, width_px: f64) -> f64 {
    position(time, zoom) * width_px
}

/// Absolute pixel distance between two times.
pub fn pixel_distance(a: Time, b: Time, zoom: ZoomRegion, width_px: f64) -> f64 {
    (pixel_offset(Some(a), zoom, width_px) - pixel_offset(Some(b), zoom, width_px)).abs()
}

/// Recording time under a click at `click_x`, given the timeline element's
/// `left` edge and `width` in pixels.
///
/// Rounded up to the next integer time unit so seeks stay deterministic
/// and monotonic with pixel position. Clicks outside the element
/// extrapolate; times before the recording origin floor at zero.
pub fn time_from_pixel(click_x: f64, left: f64, width: f64, zoom: ZoomRegion) -> Time {
    if width <= 0.0 {
        return zoom.start;
    }

    let click_position = (click_x - left) / width;
    let time = zoom.start.as_ms() as f64 + zoom.duration_ms() as f64 * click_position;
    Time::from_ms(time.ceil().max(0.0) as u64)
}

/// Pixel extent of the `[begin, end]` time span, clipped to the visible
/// `[0, width_px]` range. `None` when the span lies entirely outside the
/// window.
pub fn span_offsets(begin: Time, end: Time, zoom: ZoomRegion, width_px: f64) -> Option<(f64, f64)> {
    let start_offset = pixel_offset(Some(begin), zoom, width_px);
    let end_offset = pixel_offset(Some(end), zoom, width_px);

    if start_offset >= width_px || end_offset <= 0.0 {
        return None;
    }

    Some((start_offset.max(0.0), end_offset.min(width_px)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom(start: u64, end: u64) -> ZoomRegion {
        ZoomRegion::new(Time::from_ms(start), Time::from_ms(end))
    }

    #[test]
    fn position_clamps_to_unit_range() {
        let z = zoom(1000, 2000);

        assert_eq!(position(None, z), 0.0);
        assert_eq!(position(Some(Time::from_ms(500)), z), 0.0);
        assert_eq!(position(Some(Time::from_ms(1000)), z), 0.0);
        assert_eq!(position(Some(Time::from_ms(1500)), z), 0.5);
        assert_eq!(position(Some(Time::from_ms(2000)), z), 1.0);
        assert_eq!(position(Some(Time::from_ms(2500)), z), 1.0);
    }

    #[test]
    fn position_is_monotonic() {
        let z = zoom(300, 2700);
        let mut last = 0.0;
        for ms in (0..3000).step_by(50) {
            let pos = position(Some(Time::from_ms(ms)), z);
            assert!((0.0..=1.0).contains(&pos));
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn degenerate_zoom_maps_to_origin() {
        let z = zoom(700, 700);
        assert_eq!(position(Some(Time::from_ms(699)), z), 0.0);
        assert_eq!(position(Some(Time::from_ms(700)), z), 0.0);
        assert_eq!(position(Some(Time::from_ms(701)), z), 0.0);
    }

    #[test]
    fn pixel_offset_scales_by_width() {
        let z = zoom(1000, 2000);
        assert_eq!(pixel_offset(Some(Time::from_ms(1500)), z, 500.0), 250.0);
        assert_eq!(pixel_offset(None, z, 500.0), 0.0);
    }

    #[test]
    fn time_from_pixel_inverts_the_mapping() {
        let z = zoom(1000, 2000);
        assert_eq!(
            time_from_pixel(350.0, 100.0, 500.0, z),
            Time::from_ms(1500)
        );
    }

    #[test]
    fn time_from_pixel_rounds_up() {
        // 1/3 of a 10ms window is 3.33ms; the seek lands on 4.
        assert_eq!(time_from_pixel(1.0, 0.0, 3.0, zoom(0, 10)), Time::from_ms(4));
    }

    #[test]
    fn time_from_pixel_handles_degenerate_width() {
        assert_eq!(
            time_from_pixel(350.0, 100.0, 0.0, zoom(1000, 2000)),
            Time::from_ms(1000)
        );
    }

    #[test]
    fn time_from_pixel_floors_at_zero() {
        // A click far left of the element would extrapolate negative.
        assert_eq!(time_from_pixel(0.0, 500.0, 500.0, zoom(0, 100)), Time::ZERO);
    }

    #[test]
    fn pixel_distance_is_symmetric() {
        let z = zoom(0, 1000);
        assert_eq!(
            pixel_distance(Time::from_ms(200), Time::from_ms(700), z, 100.0),
            50.0
        );
        assert_eq!(
            pixel_distance(Time::from_ms(700), Time::from_ms(200), z, 100.0),
            50.0
        );
    }

    #[test]
    fn span_offsets_clips_to_window() {
        let z = zoom(1000, 2000);

        assert_eq!(
            span_offsets(Time::from_ms(1200), Time::from_ms(1800), z, 500.0),
            Some((100.0, 400.0))
        );
        // Straddling the left edge clips to the origin.
        assert_eq!(
            span_offsets(Time::from_ms(500), Time::from_ms(1500), z, 500.0),
            Some((0.0, 250.0))
        );
        // Entirely outside the window.
        assert_eq!(
            span_offsets(Time::from_ms(2500), Time::from_ms(3000), z, 500.0),
            None
        );
        assert_eq!(
            span_offsets(Time::from_ms(0), Time::from_ms(500), z, 500.0),
            None
        );
    }
}

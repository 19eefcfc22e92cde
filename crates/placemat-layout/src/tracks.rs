//! Track splitting along one axis.
//!
//! A region is divided into fixed-length and span tracks separated by a
//! uniform gap. Span tracks share what the fixed tracks and gaps leave over.
//! A track spanning `m` units is as long as `m` unit columns plus the
//! `m - 1` gaps between them, so spans line up with a notional grid of unit
//! columns and every track plus every gap fills the region exactly.

use placemat_core::{Axis, LayoutError, Rect, TrackSize};

/// Split `region` along `axis` into one rectangle per track.
pub fn split(
    region: Rect,
    axis: Axis,
    tracks: &[TrackSize],
    gap: f64,
) -> Result<Vec<Rect>, LayoutError> {
    let lengths = resolve_lengths(main_length(&region, axis), tracks, gap)?;

    let mut cursor = main_start(&region, axis);
    Ok(lengths
        .iter()
        .map(|&length| {
            let rect = match axis {
                Axis::Horizontal => Rect::new(cursor, region.y, length, region.height),
                Axis::Vertical => Rect::new(region.x, cursor, region.width, length),
            };
            cursor += length + gap;
            rect
        })
        .collect())
}

/// Resolve the length of every track given the available length.
pub fn resolve_lengths(
    available: f64,
    tracks: &[TrackSize],
    gap: f64,
) -> Result<Vec<f64>, LayoutError> {
    if tracks.is_empty() {
        return Ok(Vec::new());
    }
    if !(gap.is_finite() && gap >= 0.0) {
        return Err(LayoutError::invalid(format!("track gap must be non-negative, got {gap}")));
    }

    let mut fixed_total = 0.0_f64;
    let mut span_units = 0u64;
    let mut span_tracks = 0u64;

    for track in tracks {
        match *track {
            TrackSize::Fixed(length) => {
                if !(length.is_finite() && length > 0.0) {
                    return Err(LayoutError::invalid(format!(
                        "fixed track length must be positive, got {length}"
                    )));
                }
                fixed_total += length;
            }
            TrackSize::Span(0) => {
                return Err(LayoutError::invalid("track span must be at least 1"));
            }
            TrackSize::Span(units) => {
                span_units += u64::from(units);
                span_tracks += 1;
            }
        }
    }

    let total_gap = gap * (tracks.len() - 1) as f64;
    let flex = available - fixed_total - total_gap;
    if flex < 0.0 {
        return Err(LayoutError::invalid(format!(
            "fixed tracks ({fixed_total}) and gaps ({total_gap}) exceed available length {available}"
        )));
    }

    let unit = if span_units > 0 {
        let unit = (flex - gap * (span_units - span_tracks) as f64) / span_units as f64;
        if !(unit > 0.0) {
            return Err(LayoutError::invalid(format!(
                "no room for {span_units} span units in length {flex}"
            )));
        }
        unit
    } else {
        0.0
    };

    Ok(tracks
        .iter()
        .map(|track| match *track {
            TrackSize::Fixed(length) => length,
            TrackSize::Span(units) => unit * f64::from(units) + gap * f64::from(units - 1),
        })
        .collect())
}

fn main_length(region: &Rect, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => region.width,
        Axis::Vertical => region.height,
    }
}

fn main_start(region: &Rect, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => region.x,
        Axis::Vertical => region.y,
    }
}

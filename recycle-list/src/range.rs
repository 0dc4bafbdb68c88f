use crate::{SizeMode, SizeModel, Window};

/// Computes the inclusive window of rows to render for a scroll position.
///
/// - Fixed mode: `start = floor(s / h) - overscan`, `end = ceil((s + v) / h) + overscan`, both
///   clamped to the list (`end` never before `start`).
/// - Dynamic mode: `start` is the first row whose bottom edge is past `s`, minus `overscan`;
///   `end` is the first row whose bottom edge is past `s + v + overscan * item_height`.
///
/// An empty list or a zero-sized viewport yields [`Window::Empty`]. Offsets past the end of the
/// list collapse the window onto the last rows instead of failing.
pub fn compute_range(
    scroll_offset: u64,
    viewport_size: u32,
    overscan: usize,
    sizes: &SizeModel,
) -> Window {
    let count = sizes.len();
    if count == 0 || viewport_size == 0 {
        return Window::Empty;
    }
    let last = count - 1;

    match sizes.mode() {
        SizeMode::Fixed => {
            // A zero row height would divide by zero; treat it as one unit.
            let h = (sizes.item_height() as u64).max(1);
            let first = to_index(scroll_offset / h);
            let past = to_index(scroll_offset.saturating_add(viewport_size as u64).div_ceil(h));

            let start = first.saturating_sub(overscan).min(last);
            let end = past.saturating_add(overscan).min(last).max(start);
            Window::span(start, end)
        }
        SizeMode::Dynamic => {
            let raw_start = sizes.index_at_offset(scroll_offset).unwrap_or(last);
            let start = raw_start.saturating_sub(overscan);

            let reach = (overscan as u64).saturating_mul(sizes.item_height() as u64);
            let target = scroll_offset
                .saturating_add(viewport_size as u64)
                .saturating_add(reach);
            let raw_end = sizes.index_at_offset(target).unwrap_or(last);
            Window::span(start, raw_end.max(raw_start).max(start))
        }
    }
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

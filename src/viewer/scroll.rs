//! Custom scrollbars and scroll-driven lazy growth.
//!
//! Each scrollbar maps thumb travel linearly onto the viewport shift. Once
//! the thumb passes a fraction of its travel the controller asks for more
//! rows/columns; the caller grows the grids and then calls
//! [`ScrollController::regrown`] so the thumb shrinks and the drag carries
//! on from where the pointer is.

use crate::config::GridConfig;
use crate::layout::AxisModel;
use crate::types::Axis;

/// Result of one scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollStep {
    /// The viewport shift changed
    pub scrolled: bool,
    /// The thumb just crossed the growth threshold
    pub grow: bool,
}

/// One track + thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrollbar {
    axis: Axis,
    /// Track length (the viewport extent along the axis)
    track: f64,
    thumb: f64,
    /// Thumb leading edge relative to the track
    position: f64,
    /// Pointer-to-thumb offset captured at pointer-down
    grab: Option<f64>,
    /// Last pointer position relative to the track
    pointer: f64,
    beyond_threshold: bool,
}

impl Scrollbar {
    fn new(axis: Axis) -> Self {
        Self {
            axis,
            track: 0.0,
            thumb: 0.0,
            position: 0.0,
            grab: None,
            pointer: 0.0,
            beyond_threshold: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn thumb_size(&self) -> f64 {
        self.thumb
    }

    pub fn thumb_position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Distance the thumb can move.
    pub fn max_travel(&self) -> f64 {
        (self.track - self.thumb).max(0.0)
    }

    /// Resize the thumb for `container` pixels of content seen through
    /// `viewport` pixels, then place it to match `shift`.
    fn fit(&mut self, viewport: f64, container: f64, shift: f64, min_thumb: f64) {
        self.track = viewport;
        self.thumb = if container > 0.0 {
            (viewport * viewport / container).max(min_thumb).min(viewport)
        } else {
            viewport
        };
        let scrollable = container - viewport;
        self.position = if scrollable > 0.0 {
            shift / scrollable * self.max_travel()
        } else {
            0.0
        };
    }

    /// Update the threshold flag for the current position. Returns `true`
    /// only on the step that crosses it.
    fn cross(&mut self, threshold: f64) -> bool {
        let beyond = self.position > threshold * self.max_travel();
        let crossed = beyond && !self.beyond_threshold;
        self.beyond_threshold = beyond;
        crossed
    }
}

/// Both scrollbars plus the lazy-growth policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    pub vertical: Scrollbar,
    pub horizontal: Scrollbar,
    /// Last known content height (`containerHeight`)
    pub container_height: f64,
    /// Last known content width (`containerWidth`)
    pub container_width: f64,
    threshold: f64,
    min_thumb: f64,
}

impl ScrollController {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            vertical: Scrollbar::new(Axis::Row),
            horizontal: Scrollbar::new(Axis::Column),
            container_height: 0.0,
            container_width: 0.0,
            threshold: config.growth_threshold,
            min_thumb: config.min_thumb_size,
        }
    }

    pub fn bar(&self, axis: Axis) -> &Scrollbar {
        match axis {
            Axis::Row => &self.vertical,
            Axis::Column => &self.horizontal,
        }
    }

    fn bar_mut(&mut self, axis: Axis) -> &mut Scrollbar {
        match axis {
            Axis::Row => &mut self.vertical,
            Axis::Column => &mut self.horizontal,
        }
    }

    /// Refresh container sizes and both thumbs from the model.
    pub fn sync(&mut self, model: &AxisModel) {
        self.container_height = model.rows.total();
        self.container_width = model.columns.total();
        let min_thumb = self.min_thumb;
        let viewport = &model.viewport;
        self.vertical.fit(
            viewport.height,
            self.container_height,
            viewport.shift_top,
            min_thumb,
        );
        self.horizontal.fit(
            viewport.width,
            self.container_width,
            viewport.shift_left,
            min_thumb,
        );
    }

    /// Pointer-down on the `axis` track at `pointer` (relative to the track
    /// origin). Starts a drag only when the thumb itself is hit.
    pub fn pointer_down(&mut self, axis: Axis, pointer: f64) -> bool {
        let bar = self.bar_mut(axis);
        let on_thumb = pointer >= bar.position && pointer <= bar.position + bar.thumb;
        if on_thumb {
            bar.grab = Some(pointer - bar.position);
            bar.pointer = pointer;
        }
        on_thumb
    }

    /// Drag the `axis` thumb so the pointer sits at `pointer` on the track.
    pub fn pointer_move(&mut self, model: &mut AxisModel, axis: Axis, pointer: f64) -> ScrollStep {
        let threshold = self.threshold;
        let container = match axis {
            Axis::Row => self.container_height,
            Axis::Column => self.container_width,
        };
        let bar = self.bar_mut(axis);
        let Some(grab) = bar.grab else {
            return ScrollStep::default();
        };
        bar.pointer = pointer;
        let max_travel = bar.max_travel();
        let travelled = (pointer - grab).clamp(0.0, max_travel);
        bar.position = travelled;
        let grow = bar.cross(threshold);

        let percentage = if max_travel > 0.0 {
            travelled / max_travel * 100.0
        } else {
            0.0
        };
        let scrollable = (container - model.viewport.extent(axis)).max(0.0);
        let before = model.viewport.shift(axis);
        model.set_shift(axis, percentage * scrollable / 100.0);
        let scrolled = (model.viewport.shift(axis) - before).abs() > f64::EPSILON;
        ScrollStep { scrolled, grow }
    }

    /// Shift the viewport by wheel deltas and move both thumbs to match.
    pub fn scroll_by(&mut self, model: &mut AxisModel, dx: f64, dy: f64) -> ScrollStep {
        let (top, left) = (model.viewport.shift_top, model.viewport.shift_left);
        model.set_shift(Axis::Row, top + dy);
        model.set_shift(Axis::Column, left + dx);
        let scrolled = (model.viewport.shift_top - top).abs() > f64::EPSILON
            || (model.viewport.shift_left - left).abs() > f64::EPSILON;
        self.sync(model);
        let threshold = self.threshold;
        let grow = self.vertical.cross(threshold);
        ScrollStep { scrolled, grow }
    }

    /// Re-fit after the content along `axis` grew. The shift is kept, so the
    /// thumb moves back and the grab offset is re-anchored to the pointer.
    pub fn regrown(&mut self, model: &AxisModel, axis: Axis) {
        self.sync(model);
        let threshold = self.threshold;
        let bar = self.bar_mut(axis);
        if bar.grab.is_some() {
            bar.grab = Some(bar.pointer - bar.position);
        }
        bar.beyond_threshold = bar.position > threshold * bar.max_travel();
    }

    /// End any thumb drag.
    pub fn pointer_up(&mut self) {
        self.vertical.grab = None;
        self.horizontal.grab = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.vertical.is_dragging() || self.horizontal.is_dragging()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn setup(rows: usize) -> (ScrollController, AxisModel) {
        let config = GridConfig::default();
        let mut model = AxisModel::new(&config, 300.0, 200.0);
        model.append(Axis::Row, rows);
        model.append(Axis::Column, 10);
        model.update_visible();
        let mut scroll = ScrollController::new(&config);
        scroll.sync(&model);
        (scroll, model)
    }

    #[test]
    fn thumb_is_proportional_with_floor() {
        let (scroll, _) = setup(20);
        // 200 * 200 / 400
        assert_eq!(scroll.vertical.thumb_size(), 100.0);
        let (scroll, _) = setup(1000);
        assert_eq!(scroll.vertical.thumb_size(), 40.0);
        assert_eq!(scroll.container_height, 20_000.0);
    }

    #[test]
    fn drag_maps_travel_to_shift() {
        let (mut scroll, mut model) = setup(1000);
        assert!(scroll.pointer_down(Axis::Row, 10.0));
        let step = scroll.pointer_move(&mut model, Axis::Row, 90.0);
        assert!(step.scrolled && !step.grow);
        // 80 of 160 travel: half of 19_800
        assert_eq!(model.viewport.shift_top, 9_900.0);
        assert_eq!(model.viewport.top_index, 495);
    }

    #[test]
    fn drag_above_track_resets_to_origin() {
        let (mut scroll, mut model) = setup(1000);
        scroll.pointer_down(Axis::Row, 10.0);
        scroll.pointer_move(&mut model, Axis::Row, 90.0);
        scroll.pointer_move(&mut model, Axis::Row, -50.0);
        assert_eq!(model.viewport.shift_top, 0.0);
        assert_eq!(scroll.vertical.thumb_position(), 0.0);
    }

    #[test]
    fn pointer_down_off_thumb_is_ignored() {
        let (mut scroll, mut model) = setup(1000);
        assert!(!scroll.pointer_down(Axis::Row, 150.0));
        assert_eq!(
            scroll.pointer_move(&mut model, Axis::Row, 170.0),
            ScrollStep::default()
        );
    }

    #[test]
    fn growth_fires_once_per_crossing() {
        let (mut scroll, mut model) = setup(1000);
        scroll.pointer_down(Axis::Row, 0.0);
        // Exactly 80% of 160
        assert!(!scroll.pointer_move(&mut model, Axis::Row, 128.0).grow);
        assert!(scroll.pointer_move(&mut model, Axis::Row, 129.0).grow);
        assert!(!scroll.pointer_move(&mut model, Axis::Row, 140.0).grow);
        assert!(!scroll.pointer_move(&mut model, Axis::Row, 100.0).grow);
        assert!(scroll.pointer_move(&mut model, Axis::Row, 130.0).grow);
    }

    #[test]
    fn regrown_reanchors_the_drag() {
        let (mut scroll, mut model) = setup(1000);
        scroll.pointer_down(Axis::Row, 0.0);
        assert!(scroll.pointer_move(&mut model, Axis::Row, 150.0).grow);
        let shift = model.viewport.shift_top;

        model.append(Axis::Row, 500);
        model.update_visible();
        scroll.regrown(&model, Axis::Row);
        assert_eq!(scroll.container_height, 30_000.0);
        assert!(scroll.vertical.thumb_position() < 150.0);
        assert_eq!(model.viewport.shift_top, shift);

        // Same pointer position: no jump.
        let step = scroll.pointer_move(&mut model, Axis::Row, 150.0);
        assert!(!step.grow);
        assert!((model.viewport.shift_top - shift).abs() < 1e-6);
    }

    #[test]
    fn wheel_scroll_moves_thumbs() {
        let (mut scroll, mut model) = setup(1000);
        let step = scroll.scroll_by(&mut model, 0.0, 990.0);
        assert!(step.scrolled);
        assert!((scroll.vertical.thumb_position() - 8.0).abs() < 1e-9);
        let step = scroll.scroll_by(&mut model, 0.0, -5_000.0);
        assert!(step.scrolled);
        assert_eq!(model.viewport.shift_top, 0.0);
    }
}

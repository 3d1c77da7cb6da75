use crate::scene::Point;

/// An axis-aligned rectangle in surface pixels, `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Rectangle spanned by two corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        BrushRect {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, (x, y): Point) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    fn clamp_point(&self, (x, y): Point) -> Point {
        (x.clamp(self.x0, self.x1), y.clamp(self.y0, self.y1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    /// Drawing a new rectangle from `origin`.
    Select { origin: Point },
    /// Dragging an existing rectangle; `grab` is the press point.
    Move { grab: Point, start: BrushRect },
}

/// Rectangular brush confined to a plotting area.
///
/// `press` never reports a change, `drag_to` and `release` do; callers use
/// the returned flag to decide when to recompute the selected records.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    extent: BrushRect,
    selection: Option<BrushRect>,
    gesture: Option<Gesture>,
}

impl Brush {
    pub fn new(extent: BrushRect) -> Self {
        Brush {
            extent,
            selection: None,
            gesture: None,
        }
    }

    pub fn extent(&self) -> BrushRect {
        self.extent
    }

    pub fn selection(&self) -> Option<BrushRect> {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a gesture. Presses outside the extent are ignored.
    pub fn press(&mut self, p: Point) {
        if !self.extent.contains(p) {
            return;
        }
        match self.selection {
            Some(sel) if sel.contains(p) && !sel.is_empty() => {
                self.gesture = Some(Gesture::Move { grab: p, start: sel });
            }
            _ => {
                self.gesture = Some(Gesture::Select { origin: p });
                self.selection = Some(BrushRect::from_corners(p, p));
            }
        }
    }

    /// Continue the gesture. Returns whether the selection changed.
    pub fn drag_to(&mut self, p: Point) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        let next = match gesture {
            Gesture::Select { origin } => {
                BrushRect::from_corners(origin, self.extent.clamp_point(p))
            }
            Gesture::Move { grab, start } => {
                let ext = self.extent;
                let dx = (p.0 - grab.0).clamp(ext.x0 - start.x0, ext.x1 - start.x1);
                let dy = (p.1 - grab.1).clamp(ext.y0 - start.y0, ext.y1 - start.y1);
                BrushRect {
                    x0: start.x0 + dx,
                    y0: start.y0 + dy,
                    x1: start.x1 + dx,
                    y1: start.y1 + dy,
                }
            }
        };
        let changed = self.selection != Some(next);
        self.selection = Some(next);
        changed
    }

    /// End the gesture. An empty rectangle is dropped. Returns true whenever
    /// a gesture was in progress.
    pub fn release(&mut self) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        if self.selection.is_some_and(|s| s.is_empty()) {
            self.selection = None;
        }
        true
    }

    /// Drop the selection. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.gesture = None;
        self.selection.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brush() -> Brush {
        Brush::new(BrushRect {
            x0: 60.0,
            y0: 20.0,
            x1: 580.0,
            y1: 350.0,
        })
    }

    #[test]
    fn contains_is_inclusive() {
        let r = BrushRect::from_corners((10.0, 10.0), (0.0, 0.0));
        assert!(r.contains((0.0, 0.0)));
        assert!(r.contains((10.0, 5.0)));
        assert!(!r.contains((10.000001, 5.0)));
    }

    #[test]
    fn drag_draws_rectangle_clamped_to_extent() {
        let mut b = brush();
        b.press((100.0, 100.0));
        assert_eq!(b.selection().map(|s| s.is_empty()), Some(true));
        assert!(b.drag_to((700.0, 0.0)));
        assert_eq!(
            b.selection(),
            Some(BrushRect {
                x0: 100.0,
                y0: 20.0,
                x1: 580.0,
                y1: 100.0
            })
        );
        assert!(b.release());
        assert!(b.selection().is_some());
    }

    #[test]
    fn click_without_drag_clears() {
        let mut b = brush();
        b.press((100.0, 100.0));
        b.drag_to((150.0, 150.0));
        b.release();

        // a click outside the current rectangle starts a zero-area one
        b.press((300.0, 300.0));
        assert!(b.release());
        assert_eq!(b.selection(), None);
    }

    #[test]
    fn press_inside_moves_existing_rectangle() {
        let mut b = brush();
        b.press((100.0, 100.0));
        b.drag_to((200.0, 200.0));
        b.release();

        b.press((150.0, 150.0));
        b.drag_to((160.0, 1000.0));
        let moved = b.selection().unwrap();
        assert_eq!((moved.x0, moved.x1), (110.0, 210.0));
        // pushed down only until it touches the extent
        assert_eq!((moved.y0, moved.y1), (250.0, 350.0));
        assert_eq!(moved.width(), 100.0);
    }

    #[test]
    fn press_outside_extent_is_ignored() {
        let mut b = brush();
        b.press((10.0, 10.0));
        assert!(!b.is_dragging());
        assert!(!b.drag_to((100.0, 100.0)));
        assert!(!b.release());
    }

    #[test]
    fn cancel_reports_only_when_something_was_selected() {
        let mut b = brush();
        assert!(!b.cancel());
        b.press((100.0, 100.0));
        b.drag_to((120.0, 120.0));
        assert!(b.cancel());
        assert_eq!(b.selection(), None);
    }
}

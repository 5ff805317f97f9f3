//! Drop-target resolution
//!
//! Pure geometry mapping a pointer position over a tab group's content
//! rectangle to a placement intent. Nine fixed hit points are laid out
//! around the rect center: five reference-relative (left/right/top/bottom
//! at `±relative_offset`, tab at the center) and four absolute at
//! `±absolute_offset`. Relative points are tested first; they are closer to
//! the center and win when both are in range.
//!
//! The resolver owns no state about the drag gesture itself. A cancelled
//! drag simply never calls into the workbench.

use crate::config::DropConfig;
use crate::model::{NodeId, Placement, TabGroup};

/// Rectangle for drop-target hit testing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// A resolved placement intent for a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropIntent {
    /// Place relative to the tab group under the pointer
    Relative(Placement),
    /// Place at the outer border of the whole workbench
    Absolute(Placement),
}

impl DropIntent {
    pub fn placement(&self) -> Placement {
        match self {
            DropIntent::Relative(placement) | DropIntent::Absolute(placement) => *placement,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, DropIntent::Absolute(_))
    }
}

/// Maps pointer positions to placement intents using fixed-radius hit
/// regions.
#[derive(Debug, Clone)]
pub struct DropTargetResolver {
    config: DropConfig,
}

impl DropTargetResolver {
    pub fn new(config: DropConfig) -> Self {
        Self { config }
    }

    /// Resolve a pointer position over `target`'s content rectangle.
    ///
    /// `pointer` and `content_rect` share a coordinate space (whichever the
    /// host uses). Returns `None` - a successful non-drop, not an error -
    /// when no hit point is within tolerance, when the target is smaller
    /// than the minimum extent, or when `dragged` is the only panel of the
    /// target group.
    pub fn resolve(
        &self,
        pointer: (f32, f32),
        content_rect: Rect,
        dragged: NodeId,
        target: &TabGroup,
    ) -> Option<DropIntent> {
        let c = &self.config;
        if content_rect.width < c.min_target_extent || content_rect.height < c.min_target_extent {
            tracing::debug!("Drop target {} too small to subdivide", target.id());
            return None;
        }
        if target.len() == 1 && target.contains(dragged) {
            // Dropping a panel onto its own sole group goes nowhere
            return None;
        }

        let (cx, cy) = content_rect.center();

        let relative = [
            ((cx - c.relative_offset, cy), Placement::Left),
            ((cx + c.relative_offset, cy), Placement::Right),
            ((cx, cy - c.relative_offset), Placement::Top),
            ((cx, cy + c.relative_offset), Placement::Bottom),
            ((cx, cy), Placement::Tab),
        ];
        for (point, placement) in relative {
            if self.hits(pointer, point) {
                tracing::debug!("Drop relative over {:?}", placement);
                return Some(DropIntent::Relative(placement));
            }
        }

        let absolute = [
            ((cx - c.absolute_offset, cy), Placement::Left),
            ((cx + c.absolute_offset, cy), Placement::Right),
            ((cx, cy - c.absolute_offset), Placement::Top),
            ((cx, cy + c.absolute_offset), Placement::Bottom),
        ];
        for (point, placement) in absolute {
            if self.hits(pointer, point) {
                tracing::debug!("Drop absolute over {:?}", placement);
                return Some(DropIntent::Absolute(placement));
            }
        }

        None
    }

    fn hits(&self, pointer: (f32, f32), point: (f32, f32)) -> bool {
        (pointer.0 - point.0).abs() <= self.config.hit_tolerance
            && (pointer.1 - point.1).abs() <= self.config.hit_tolerance
    }
}

impl Default for DropTargetResolver {
    fn default() -> Self {
        Self::new(DropConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Panel;

    fn group_with(panel_ids: &[u64]) -> TabGroup {
        let mut ids = panel_ids.iter();
        let first = *ids.next().expect("at least one panel");
        let mut group = TabGroup::with_panel(
            NodeId(1000),
            Panel::new(NodeId(first), format!("panel-{first}"), Box::new(())),
        );
        for id in ids {
            group.push_panel(Panel::new(NodeId(*id), format!("panel-{id}"), Box::new(())));
        }
        group
    }

    fn resolver() -> DropTargetResolver {
        DropTargetResolver::default()
    }

    #[test]
    fn test_exact_relative_right_hit() {
        // 200x200 rect centered at (100, 100): right-relative point is (134, 100)
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);

        let intent = resolver().resolve((134.0, 100.0), rect, NodeId(99), &target);
        assert_eq!(intent, Some(DropIntent::Relative(Placement::Right)));
    }

    #[test]
    fn test_all_nine_hit_points() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);
        let resolver = resolver();
        let dragged = NodeId(99);

        let cases = [
            ((66.0, 100.0), DropIntent::Relative(Placement::Left)),
            ((134.0, 100.0), DropIntent::Relative(Placement::Right)),
            ((100.0, 66.0), DropIntent::Relative(Placement::Top)),
            ((100.0, 134.0), DropIntent::Relative(Placement::Bottom)),
            ((100.0, 100.0), DropIntent::Relative(Placement::Tab)),
            ((32.0, 100.0), DropIntent::Absolute(Placement::Left)),
            ((168.0, 100.0), DropIntent::Absolute(Placement::Right)),
            ((100.0, 32.0), DropIntent::Absolute(Placement::Top)),
            ((100.0, 168.0), DropIntent::Absolute(Placement::Bottom)),
        ];
        for (pointer, expected) in cases {
            assert_eq!(
                resolver.resolve(pointer, rect, dragged, &target),
                Some(expected),
                "pointer {pointer:?}"
            );
        }
    }

    #[test]
    fn test_tolerance_is_a_square_region() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);
        let resolver = resolver();

        // Corner of the 12-unit square around the tab point still hits
        assert_eq!(
            resolver.resolve((112.0, 112.0), rect, NodeId(99), &target),
            Some(DropIntent::Relative(Placement::Tab))
        );
        // One unit past it misses everything
        assert_eq!(resolver.resolve((113.0, 113.0), rect, NodeId(99), &target), None);
    }

    #[test]
    fn test_pointer_far_from_every_hit_point_is_none() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);

        assert_eq!(resolver().resolve((150.0, 100.0), rect, NodeId(99), &target), None);
        assert_eq!(resolver().resolve((5.0, 5.0), rect, NodeId(99), &target), None);
    }

    #[test]
    fn test_relative_wins_when_both_regions_in_range() {
        // Squeeze the absolute points toward the relative ones so the
        // regions overlap, then drop between them.
        let config = DropConfig {
            absolute_offset: 40.0,
            ..DropConfig::default()
        };
        let resolver = DropTargetResolver::new(config);
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);

        // (144, 100) is within 12 of both the relative (134) and absolute
        // (140) right points
        let intent = resolver.resolve((144.0, 100.0), rect, NodeId(99), &target);
        assert_eq!(intent, Some(DropIntent::Relative(Placement::Right)));
    }

    #[test]
    fn test_small_target_rejects_drops() {
        let rect = Rect::new(0.0, 0.0, 179.0, 200.0);
        let target = group_with(&[1, 2]);

        let intent = resolver().resolve(rect.center(), rect, NodeId(99), &target);
        assert_eq!(intent, None);
    }

    #[test]
    fn test_self_drop_on_sole_panel_is_none() {
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let target = group_with(&[7]);

        // Dragging panel 7 over its own single-panel group: no-op
        assert_eq!(resolver().resolve((100.0, 100.0), rect, NodeId(7), &target), None);

        // A second panel in the group makes the same drop legal again
        let target = group_with(&[7, 8]);
        assert_eq!(
            resolver().resolve((100.0, 100.0), rect, NodeId(7), &target),
            Some(DropIntent::Relative(Placement::Tab))
        );
    }

    #[test]
    fn test_offset_rect_hit_points_follow_center() {
        let rect = Rect::new(400.0, 300.0, 200.0, 200.0);
        let target = group_with(&[1, 2]);

        let intent = resolver().resolve((534.0, 400.0), rect, NodeId(99), &target);
        assert_eq!(intent, Some(DropIntent::Relative(Placement::Right)));
    }
}

//! Axis-aligned rectangle overlap classification
//!
//! [`classify`] reports which edge of rectangle A touches rectangle B, and
//! [`snap`] pushes A back out along that edge so the two end up flush.
//! Y grows downward, so a rectangle's `top` is its smallest y.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// `other` lies entirely inside `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect) -> bool {
        self.left() <= other.left()
            && self.right() >= other.right()
            && self.top() <= other.top()
            && self.bottom() >= other.bottom()
    }
}

/// Which edge of A is in contact with B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSide {
    None,
    Top,
    Bottom,
    Left,
    Right,
    FullOverlap,
}

impl CollisionSide {
    /// One of the four edge contacts.
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            CollisionSide::Top | CollisionSide::Bottom | CollisionSide::Left | CollisionSide::Right
        )
    }
}

/// Classify how `a` overlaps `b`.
///
/// Touching edges count as contact. When A's edge crosses one of B's edges
/// the centre displacement decides between that edge and a horizontal
/// contact; containment and deep overlaps report [`CollisionSide::FullOverlap`].
pub fn classify(a: &Rect, b: &Rect) -> CollisionSide {
    if a.right() < b.left()
        || a.left() > b.right()
        || a.bottom() < b.top()
        || a.top() > b.bottom()
    {
        return CollisionSide::None;
    }

    if a.contains(b) || b.contains(a) {
        return CollisionSide::FullOverlap;
    }

    let overlap_x = a.left() < b.right() && a.right() > b.left();
    let overlap_y = a.top() < b.bottom() && a.bottom() > b.top();
    if !overlap_x && !overlap_y {
        // corners touching
        return CollisionSide::None;
    }

    let band = if overlap_x && a.bottom() >= b.top() && a.top() < b.top() {
        CollisionSide::Bottom
    } else if overlap_x && a.top() <= b.bottom() && a.bottom() > b.bottom() {
        CollisionSide::Top
    } else if overlap_y && a.right() >= b.left() && a.left() < b.left() {
        CollisionSide::Right
    } else if overlap_y && a.left() <= b.right() && a.right() > b.right() {
        CollisionSide::Left
    } else {
        return CollisionSide::FullOverlap;
    };

    let delta = a.center() - b.center();
    if delta.x.abs() / b.width > delta.y.abs() / b.height {
        if delta.x > 0.0 {
            CollisionSide::Left
        } else {
            CollisionSide::Right
        }
    } else {
        band
    }
}

/// Move `a` so that its `side` edge sits flush against `b`.
///
/// Non-edge outcomes leave `a` where it is.
pub fn snap(a: &Rect, b: &Rect, side: CollisionSide) -> Rect {
    let mut out = *a;
    match side {
        CollisionSide::Top => out.y = b.y + b.height,
        CollisionSide::Bottom => out.y = b.y - a.height,
        CollisionSide::Left => out.x = b.x + b.width,
        CollisionSide::Right => out.x = b.x - a.width,
        CollisionSide::None | CollisionSide::FullOverlap => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn separated_rectangles_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(classify(&a, &rect(15.0, 0.0, 10.0, 10.0)), CollisionSide::None);
        assert_eq!(classify(&a, &rect(11.0, 0.0, 10.0, 10.0)), CollisionSide::None);
        assert_eq!(classify(&a, &rect(0.0, -11.0, 10.0, 10.0)), CollisionSide::None);
    }

    #[test]
    fn touching_edges_are_contact() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(classify(&a, &rect(10.0, 0.0, 10.0, 10.0)), CollisionSide::Right);
        assert_eq!(classify(&a, &rect(-10.0, 0.0, 10.0, 10.0)), CollisionSide::Left);
        assert_eq!(classify(&a, &rect(0.0, 10.0, 10.0, 10.0)), CollisionSide::Bottom);
        assert_eq!(classify(&a, &rect(0.0, -10.0, 10.0, 10.0)), CollisionSide::Top);
    }

    #[test]
    fn corner_contact_is_not_a_collision() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(classify(&a, &rect(10.0, 10.0, 10.0, 10.0)), CollisionSide::None);
    }

    #[test]
    fn containment_is_full_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(classify(&a, &a), CollisionSide::FullOverlap);
        assert_eq!(classify(&a, &rect(2.0, 2.0, 4.0, 4.0)), CollisionSide::FullOverlap);
        assert_eq!(classify(&rect(2.0, 2.0, 4.0, 4.0), &a), CollisionSide::FullOverlap);
    }

    #[test]
    fn top_contact_snaps_below_b() {
        let a = rect(5.0, 9.0, 10.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        let side = classify(&a, &b);
        assert_eq!(side, CollisionSide::Top);
        assert_eq!(snap(&a, &b, side).y, 10.0);
    }

    #[test]
    fn horizontal_displacement_overrides_vertical_band() {
        // A's bottom crosses B's top, but A sits far to the right of B.
        let a = rect(8.0, -1.0, 10.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 30.0);
        assert_eq!(classify(&a, &b), CollisionSide::Left);
    }

    #[test]
    fn walls_push_back_the_way_they_were_hit() {
        let right_wall = rect(100.0, 0.0, 20.0, 200.0);
        let head = rect(95.0, 40.0, 20.0, 20.0);
        let side = classify(&head, &right_wall);
        assert_eq!(side, CollisionSide::Right);
        assert_eq!(snap(&head, &right_wall, side).x, 80.0);

        let floor = rect(0.0, 580.0, 600.0, 20.0);
        let head = rect(300.0, 565.0, 20.0, 20.0);
        let side = classify(&head, &floor);
        assert_eq!(side, CollisionSide::Bottom);
        assert_eq!(snap(&head, &floor, side).y, 560.0);

        let left_wall = rect(0.0, 0.0, 20.0, 600.0);
        let head = rect(15.0, 300.0, 20.0, 20.0);
        let side = classify(&head, &left_wall);
        assert_eq!(side, CollisionSide::Left);
        assert_eq!(snap(&head, &left_wall, side).x, 20.0);
    }

    #[test]
    fn snap_ignores_non_edge_outcomes() {
        let a = rect(1.0, 2.0, 3.0, 4.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(snap(&a, &b, CollisionSide::FullOverlap), a);
        assert_eq!(snap(&a, &b, CollisionSide::None), a);
        assert!(!CollisionSide::FullOverlap.is_edge());
    }
}

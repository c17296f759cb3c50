//! Points, boxes and the intersection helpers used to anchor edges at node borders.

/// A point in either screen or simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Both coordinates rounded down to whole pixels.
	pub fn floor(self) -> Self {
		Self::new(self.x.floor(), self.y.floor())
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Axis-aligned screen rectangle recorded for a node during a draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl BoundingBox {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Square of side `side` centred on `center`.
	pub fn square(center: Point, side: f64) -> Self {
		Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
	}

	pub fn top_left(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn top_right(&self) -> Point {
		Point::new(self.x + self.width, self.y)
	}

	pub fn bottom_left(&self) -> Point {
		Point::new(self.x, self.y + self.height)
	}

	pub fn bottom_right(&self) -> Point {
		Point::new(self.x + self.width, self.y + self.height)
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Intersection of segment `p1-p2` with segment `p3-p4`.
///
/// Returns `None` for parallel segments or when the crossing lies outside
/// either segment.
pub fn intersect_line_line(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
	let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
	if denom == 0.0 {
		return None;
	}

	let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
	let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;
	if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
		return None;
	}

	Some(Point::new(
		p1.x + ua * (p2.x - p1.x),
		p1.y + ua * (p2.y - p1.y),
	))
}

/// First crossing of segment `p1-p2` with the border of `bbox`.
///
/// Edges are tested top, right, bottom, left and the first hit wins, so a
/// segment leaving through a corner reports the earlier edge in that order
/// rather than the nearest crossing.
pub fn intersect_line_box(p1: Point, p2: Point, bbox: &BoundingBox) -> Option<Point> {
	let (tl, tr) = (bbox.top_left(), bbox.top_right());
	let (bl, br) = (bbox.bottom_left(), bbox.bottom_right());

	intersect_line_line(p1, p2, tl, tr)
		.or_else(|| intersect_line_line(p1, p2, tr, br))
		.or_else(|| intersect_line_line(p1, p2, br, bl))
		.or_else(|| intersect_line_line(p1, p2, bl, tl))
}

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABox {
	min: Vec2,
	max: Vec2,
}

impl AABox {
	pub fn new(min: Vec2, max: Vec2) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec2::MAX, Vec2::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x && self.min.y > self.max.y
	}

	pub fn min(&self) -> Vec2 {
		self.min
	}

	pub fn max(&self) -> Vec2 {
		self.max
	}

	pub fn size(&self) -> Vec2 {
		self.max - self.min
	}

	pub fn center(&self) -> Vec2 {
		(self.min + self.max) / 2.0
	}

	pub fn expanded_to_contain(self, point: Vec2) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl Iterator<Item = Vec2>) -> Self {
		points.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}
}

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
#[display("{width}x{height}")]
pub struct Viewport {
	pub width: u32,
	pub height: u32,
}

impl Viewport {
	pub fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Maps a surface pixel to device coordinates. The y axis is flipped: pixel rows grow downward
	/// while device coordinates grow upward. Returns `None` for an empty viewport.
	pub fn to_device(&self, pixel: Vec2) -> Option<Vec2> {
		if self.is_empty() {
			return None;
		}
		let extent = Vec2::new(self.width as f32, self.height as f32);
		Some(pixel / extent * Vec2::new(2.0, -2.0) + Vec2::new(-1.0, 1.0))
	}
}

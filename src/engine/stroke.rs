use glam::{Vec2, Vec3};

use crate::geom::AABox;

/// Default stroke width, in device coordinates.
pub const DEFAULT_STROKE_WIDTH: f32 = 0.1;

/// A single vertex as it is laid out in the vertex buffer: position followed by color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
	pub position: [f32; 2],
	pub color: [f32; 3],
}

static_assertions::const_assert_eq!(std::mem::size_of::<Vertex>(), 5 * std::mem::size_of::<f32>());

impl Vertex {
	fn new(position: Vec2, color: Vec3) -> Self {
		Self {
			position: position.to_array(),
			color: color.to_array(),
		}
	}

	pub fn components(&self) -> [f32; 5] {
		let [x, y] = self.position;
		let [r, g, b] = self.color;
		[x, y, r, g, b]
	}
}

/// A flat-colored rectangle tessellated into two triangles sharing one diagonal. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
	vertices: [Vertex; 6],
}

impl Quad {
	pub const VERTEX_COUNT: u32 = 6;

	pub fn vertices(&self) -> &[Vertex; 6] {
		&self.vertices
	}

	/// Each vertex as an `(x, y, r, g, b)` tuple.
	pub fn components(&self) -> [[f32; 5]; 6] {
		self.vertices.map(|v| v.components())
	}

	/// Raw vertex data, ready to be uploaded to a vertex buffer.
	pub fn as_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.vertices)
	}

	pub fn bounds(&self) -> AABox {
		AABox::containing(self.vertices.iter().map(|v| Vec2::from(v.position)))
	}
}

/// The brush settings applied to new segments. Only the UI changes these; the stroke builder just
/// reads them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintState {
	width: f32,
	color: Vec3,
}

impl Default for PaintState {
	fn default() -> Self {
		Self {
			width: DEFAULT_STROKE_WIDTH,
			color: Vec3::X,
		}
	}
}

impl PaintState {
	pub fn new(width: f32, color: Vec3) -> Self {
		let mut paint = Self::default();
		paint.set_width(width);
		paint.set_color(color);
		paint
	}

	pub fn width(&self) -> f32 {
		self.width
	}

	pub fn color(&self) -> Vec3 {
		self.color
	}

	/// Sets the stroke width. Widths that are not finite and positive are ignored.
	pub fn set_width(&mut self, width: f32) {
		if width.is_finite() && width > 0.0 {
			self.width = width;
		} else {
			tracing::warn!(width, "ignoring invalid stroke width");
		}
	}

	/// Sets the stroke color, clamping each channel into `[0, 1]`.
	pub fn set_color(&mut self, color: Vec3) {
		if color.is_nan() {
			tracing::warn!(?color, "ignoring invalid stroke color");
			return;
		}
		self.color = color.clamp(Vec3::ZERO, Vec3::ONE);
	}
}

/// Intermediate measurements of a drag segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFrame {
	/// Horizontal span of the segment. Purely vertical segments have zero length.
	pub length: f32,
	pub half_thickness: f32,
	pub angle: f32,
}

impl SegmentFrame {
	pub fn new(start: Vec2, end: Vec2, width: f32) -> Self {
		let delta = end - start;
		Self {
			length: delta.x.abs(),
			half_thickness: width / 4.0,
			angle: delta.y.atan2(delta.x),
		}
	}

	pub fn half_diagonal(&self) -> f32 {
		Vec2::new(self.length, self.half_thickness).length() / 2.0
	}
}

/// Builds the quad for one drag segment from `start` to `end`.
///
/// The rectangle is centered on `start` rather than on the midpoint of the segment, so strokes
/// trail slightly behind the pointer. Inputs are not validated; a zero-length segment yields a
/// degenerate quad.
pub fn build_quad(start: Vec2, end: Vec2, width: f32, color: Vec3) -> Quad {
	let frame = SegmentFrame::new(start, end, width);
	let (sin, cos) = frame.angle.sin_cos();

	// Offset along the segment and across it.
	let along = frame.half_diagonal() * Vec2::new(cos, sin);
	let across = frame.half_thickness * Vec2::new(-sin, cos);

	let front_left = Vertex::new(start + along + across, color);
	let front_right = Vertex::new(start + along - across, color);
	let back_left = Vertex::new(start - along + across, color);
	let back_right = Vertex::new(start - along - across, color);

	Quad {
		vertices: [
			front_left,
			front_right,
			back_left,
			back_left,
			front_right,
			back_right,
		],
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn quad_has_six_five_component_vertices() {
		let quad = build_quad(Vec2::new(-0.3, 0.2), Vec2::new(0.4, -0.1), 0.2, Vec3::ONE);
		let components = quad.components();
		assert_eq!(components.len(), Quad::VERTEX_COUNT as usize);
		assert!(components.iter().all(|v| v.len() == 5));
		assert_eq!(quad.as_bytes().len(), 6 * 5 * 4);
	}

	#[test]
	fn every_vertex_carries_the_paint_color() {
		let color = Vec3::new(0.25, 0.5, 0.75);
		let quad = build_quad(Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5), 0.1, color);
		for vertex in quad.vertices() {
			assert_eq!(vertex.color, color.to_array());
		}
	}

	#[test]
	fn triangles_share_one_diagonal() {
		let quad = build_quad(Vec2::new(0.1, 0.1), Vec2::new(0.6, 0.3), 0.2, Vec3::X);
		let v = quad.vertices();
		assert_eq!(v[1], v[4]);
		assert_eq!(v[2], v[3]);
		assert_ne!(v[0], v[5]);
	}

	#[test]
	fn horizontal_segment_is_centered_on_start() {
		let start = Vec2::new(-0.5, 0.0);
		let quad = build_quad(start, Vec2::new(0.5, 0.0), 0.4, Vec3::X);
		let bounds = quad.bounds();

		let half_diagonal = (1.0f32 + 0.01).sqrt() / 2.0;
		assert_abs_diff_eq!(bounds.min().x, start.x - half_diagonal, epsilon = 1e-6);
		assert_abs_diff_eq!(bounds.max().x, start.x + half_diagonal, epsilon = 1e-6);
		assert_abs_diff_eq!(bounds.min().y, -0.1, epsilon = 1e-6);
		assert_abs_diff_eq!(bounds.max().y, 0.1, epsilon = 1e-6);
	}

	#[test]
	fn vertical_segment_has_zero_length() {
		let start = Vec2::new(0.2, -0.4);
		let width = 0.2;
		let frame = SegmentFrame::new(start, Vec2::new(0.2, 0.6), width);
		assert_eq!(frame.length, 0.0);

		// Only the thickness contributes along the drag direction, however long the drag is.
		let quad = build_quad(start, Vec2::new(0.2, 0.6), width, Vec3::Y);
		assert_abs_diff_eq!(quad.bounds().size().y, width / 4.0, epsilon = 1e-6);
	}

	#[test]
	fn coincident_points_give_a_degenerate_but_finite_quad() {
		let point = Vec2::new(0.3, 0.3);
		let quad = build_quad(point, point, 0.1, Vec3::Z);
		let frame = SegmentFrame::new(point, point, 0.1);
		assert_eq!(frame.length, 0.0);
		assert_eq!(frame.angle, 0.0);
		assert!(quad
			.components()
			.iter()
			.flatten()
			.all(|c| c.is_finite()));
	}

	#[test]
	fn paint_state_rejects_invalid_values() {
		let mut paint = PaintState::default();
		paint.set_width(-1.0);
		paint.set_width(f32::NAN);
		assert_eq!(paint.width(), DEFAULT_STROKE_WIDTH);

		paint.set_color(Vec3::new(2.0, -1.0, 0.5));
		assert_eq!(paint.color(), Vec3::new(1.0, 0.0, 0.5));

		paint.set_color(Vec3::new(f32::NAN, 0.0, 0.0));
		assert_eq!(paint.color(), Vec3::new(1.0, 0.0, 0.5));
	}
}

use super::Quad;

/// Append-only list of quads. Insertion order is draw order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
	quads: Vec<Quad>,
}

impl Scene {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn append(&mut self, quad: Quad) {
		self.quads.push(quad);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Quad> {
		self.quads.iter()
	}

	pub fn len(&self) -> usize {
		self.quads.len()
	}

	pub fn is_empty(&self) -> bool {
		self.quads.is_empty()
	}

	pub fn vertex_count(&self) -> u32 {
		self.quads.len() as u32 * Quad::VERTEX_COUNT
	}
}

impl<'a> IntoIterator for &'a Scene {
	type Item = &'a Quad;
	type IntoIter = std::slice::Iter<'a, Quad>;
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

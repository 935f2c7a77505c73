use glam::Vec2;

use super::{build_quad, PaintState, Scene};
use crate::geom::Viewport;

/// Everything the UI can tell a `Session`. Pointer positions are in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum InputEvent {
	#[display("pointer down at {_0}")]
	PointerDown(Vec2),
	#[display("pointer move to {_0}")]
	PointerMove(Vec2),
	#[display("pointer up")]
	PointerUp,
	/// The pointer was cancelled or otherwise lost. Treated like `PointerUp`.
	#[display("pointer cancel")]
	PointerCancel,
	#[display("resize to {width}x{height}")]
	Resize { width: u32, height: u32 },
	#[display("paint change")]
	Paint(PaintState),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, derive_more::Display)]
pub enum DragState {
	#[default]
	#[display("idle")]
	Idle,
	/// `last` is the most recent pointer position, in device coordinates.
	#[display("dragging from {last}")]
	Dragging { last: Vec2 },
}

impl DragState {
	pub fn is_dragging(&self) -> bool {
		matches!(self, DragState::Dragging { .. })
	}
}

/// What a single `Session::step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
	Ignored,
	StrokeStarted,
	QuadAppended,
	StrokeEnded,
	ViewportChanged,
	PaintChanged,
}

/// The drawing state of one page: the accumulated scene plus everything needed to extend it.
#[derive(Debug, Clone, Default)]
pub struct Session {
	scene: Scene,
	drag: DragState,
	paint: PaintState,
	viewport: Viewport,
}

impl Session {
	pub fn new(paint: PaintState) -> Self {
		Self {
			paint,
			..Default::default()
		}
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn drag(&self) -> DragState {
		self.drag
	}

	pub fn paint(&self) -> PaintState {
		self.paint
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn step(&mut self, event: InputEvent) -> StepOutcome {
		use InputEvent::*;
		match event {
			PointerDown(pixel) => {
				let Some(position) = self.to_device(pixel) else {
					return StepOutcome::Ignored;
				};
				if self.drag.is_dragging() {
					tracing::debug!("pointer down while dragging, restarting stroke");
				}
				self.drag = DragState::Dragging { last: position };
				StepOutcome::StrokeStarted
			}
			PointerMove(pixel) => {
				let DragState::Dragging { last } = self.drag else {
					return StepOutcome::Ignored;
				};
				let Some(position) = self.to_device(pixel) else {
					return StepOutcome::Ignored;
				};
				self
					.scene
					.append(build_quad(last, position, self.paint.width(), self.paint.color()));
				self.drag = DragState::Dragging { last: position };
				StepOutcome::QuadAppended
			}
			PointerUp | PointerCancel => {
				if std::mem::take(&mut self.drag).is_dragging() {
					StepOutcome::StrokeEnded
				} else {
					StepOutcome::Ignored
				}
			}
			Resize { width, height } => {
				self.viewport = Viewport::new(width, height);
				StepOutcome::ViewportChanged
			}
			Paint(paint) => {
				self.paint = paint;
				StepOutcome::PaintChanged
			}
		}
	}

	fn to_device(&self, pixel: Vec2) -> Option<Vec2> {
		let position = self.viewport.to_device(pixel);
		if position.is_none() {
			tracing::debug!(viewport = %self.viewport, "ignoring pointer event on an empty viewport");
		}
		position
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use glam::Vec3;
	use InputEvent::*;

	fn session(width: u32, height: u32, paint: PaintState) -> Session {
		let mut session = Session::new(paint);
		assert_eq!(session.step(Resize { width, height }), StepOutcome::ViewportChanged);
		session
	}

	#[test]
	fn starts_idle() {
		let session = Session::default();
		assert_eq!(session.drag(), DragState::Idle);
		assert!(session.scene().is_empty());
	}

	#[test]
	fn single_move_draws_one_red_quad() {
		let mut session = session(100, 100, PaintState::new(0.1, Vec3::new(1.0, 0.0, 0.0)));
		assert_eq!(session.step(PointerDown(Vec2::new(0.0, 0.0))), StepOutcome::StrokeStarted);
		assert_eq!(session.step(PointerMove(Vec2::new(10.0, 0.0))), StepOutcome::QuadAppended);

		assert_eq!(session.scene().len(), 1);
		let quad = session.scene().iter().next().unwrap();
		for vertex in quad.vertices() {
			assert_eq!(vertex.color, [1.0, 0.0, 0.0]);
		}
		let bounds = quad.bounds();
		assert_abs_diff_eq!(bounds.size().x, 0.2, epsilon = 0.005);
		assert_abs_diff_eq!(bounds.center().y, 1.0, epsilon = 1e-6);
	}

	#[test]
	fn down_then_up_draws_nothing() {
		let mut session = session(100, 100, PaintState::default());
		session.step(PointerDown(Vec2::new(30.0, 30.0)));
		assert_eq!(session.step(PointerUp), StepOutcome::StrokeEnded);
		assert!(session.scene().is_empty());
		assert_eq!(session.drag(), DragState::Idle);
	}

	#[test]
	fn consecutive_moves_chain_segments() {
		let mut session = session(100, 100, PaintState::default());
		session.step(PointerDown(Vec2::new(0.0, 0.0)));
		session.step(PointerMove(Vec2::new(10.0, 0.0)));
		session.step(PointerMove(Vec2::new(20.0, 0.0)));

		let quads: Vec<_> = session.scene().iter().collect();
		assert_eq!(quads.len(), 2);
		assert_ne!(quads[0], quads[1]);

		// The second segment starts where the first one ended.
		let second = quads[1].bounds().center();
		assert_abs_diff_eq!(second.x, -0.8, epsilon = 1e-6);
		assert_abs_diff_eq!(second.y, 1.0, epsilon = 1e-6);
		let DragState::Dragging { last } = session.drag() else {
			panic!("expected to still be dragging");
		};
		assert_abs_diff_eq!(last.x, -0.6, epsilon = 1e-6);
		assert_abs_diff_eq!(last.y, 1.0, epsilon = 1e-6);
	}

	#[test]
	fn moves_while_idle_are_ignored() {
		let mut session = session(100, 100, PaintState::default());
		assert_eq!(session.step(PointerMove(Vec2::new(5.0, 5.0))), StepOutcome::Ignored);
		session.step(PointerDown(Vec2::new(0.0, 0.0)));
		session.step(PointerUp);
		assert_eq!(session.step(PointerMove(Vec2::new(50.0, 5.0))), StepOutcome::Ignored);
		assert!(session.scene().is_empty());
	}

	#[test]
	fn cancel_ends_the_stroke() {
		let mut session = session(100, 100, PaintState::default());
		session.step(PointerDown(Vec2::new(0.0, 0.0)));
		assert_eq!(session.step(PointerCancel), StepOutcome::StrokeEnded);
		assert_eq!(session.step(PointerCancel), StepOutcome::Ignored);
	}

	#[test]
	fn second_down_restarts_the_stroke() {
		let mut session = session(100, 100, PaintState::default());
		session.step(PointerDown(Vec2::new(0.0, 0.0)));
		session.step(PointerDown(Vec2::new(50.0, 50.0)));
		session.step(PointerMove(Vec2::new(60.0, 50.0)));

		let center = session.scene().iter().next().unwrap().bounds().center();
		assert_abs_diff_eq!(center.x, 0.0, epsilon = 1e-6);
		assert_abs_diff_eq!(center.y, 0.0, epsilon = 1e-6);
	}

	#[test]
	fn paint_changes_apply_to_later_segments_only() {
		let mut session = session(100, 100, PaintState::default());
		session.step(PointerDown(Vec2::new(0.0, 0.0)));
		session.step(PointerMove(Vec2::new(10.0, 0.0)));
		session.step(PointerUp);

		let blue = PaintState::new(0.3, Vec3::Z);
		assert_eq!(session.step(Paint(blue)), StepOutcome::PaintChanged);
		session.step(PointerDown(Vec2::new(0.0, 50.0)));
		session.step(PointerMove(Vec2::new(10.0, 50.0)));

		let colors: Vec<_> = session
			.scene()
			.iter()
			.map(|q| q.vertices()[0].color)
			.collect();
		assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
	}

	#[test]
	fn empty_viewport_ignores_pointer_events() {
		let mut session = Session::default();
		assert_eq!(session.step(PointerDown(Vec2::new(1.0, 1.0))), StepOutcome::Ignored);
		assert_eq!(session.drag(), DragState::Idle);
	}
}

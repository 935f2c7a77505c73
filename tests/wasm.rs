use daub::engine::{InputEvent, PaintState, Session, StepOutcome};
use daub::settings::Settings;
use glam::{Vec2, Vec3};
use wasm_bindgen_test::*;

// https://rustwasm.github.io/wasm-bindgen/wasm-bindgen-test/browsers.html
wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn drag_builds_one_quad_per_move() {
	let mut session = Session::new(PaintState::new(0.1, Vec3::X));
	session.step(InputEvent::Resize {
		width: 200,
		height: 100,
	});
	assert_eq!(
		session.step(InputEvent::PointerDown(Vec2::new(10.0, 10.0))),
		StepOutcome::StrokeStarted
	);
	for x in [20.0, 30.0, 40.0] {
		assert_eq!(
			session.step(InputEvent::PointerMove(Vec2::new(x, 10.0))),
			StepOutcome::QuadAppended
		);
	}
	assert_eq!(session.step(InputEvent::PointerUp), StepOutcome::StrokeEnded);
	assert_eq!(session.scene().len(), 3);
	assert_eq!(session.scene().vertex_count(), 18);
}

#[wasm_bindgen_test]
fn settings_from_query_values() {
	let settings = Settings::from_lookup(|key| (key == "fps").then(|| "60".to_owned()));
	assert_eq!(settings.target_fps, 60.0);
	assert_eq!(settings.paint, PaintState::default());
}

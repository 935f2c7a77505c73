//! Input-to-geometry half of the application. Nothing in here touches the GPU or the DOM, so it is
//! all testable natively.

mod stroke;
pub use stroke::*;

mod scene;
pub use scene::*;

mod input;
pub use input::*;

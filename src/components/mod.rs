pub mod fallback;

mod canvas;
pub use canvas::*;

mod brush_setting;
pub use brush_setting::*;

pub mod color;
pub mod error;
pub mod model;
pub mod text;

pub use color::Color;
pub use error::*;
pub use model::*;
pub use text::is_tall_script_char;

pub mod button;
pub mod label;
pub mod note_field;
pub mod panel;
pub mod spinner;
pub mod status;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use label::*;
pub use note_field::*;
pub use panel::*;
pub use spinner::*;
pub use status::*;

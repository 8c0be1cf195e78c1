pub mod list_picker;
pub mod typing_area;

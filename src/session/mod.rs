pub mod caret;
pub mod input;
pub mod store;
pub mod surface;

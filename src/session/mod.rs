pub mod builder;
pub mod editor;
pub mod traits;

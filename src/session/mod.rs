pub mod editor;
pub mod events;

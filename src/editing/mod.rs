pub(crate) mod clipboard;
pub(crate) mod selection;

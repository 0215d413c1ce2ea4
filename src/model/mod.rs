pub(crate) mod animation;
pub(crate) mod stroke;
pub(crate) mod template;

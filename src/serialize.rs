pub(crate) mod background;
pub(crate) mod document;
pub(crate) mod paint;
pub(crate) mod xml;

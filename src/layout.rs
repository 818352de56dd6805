pub(crate) mod flex;
pub(crate) mod text;

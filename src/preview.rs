pub(crate) mod build;
pub(crate) mod session;
pub(crate) mod sheet;

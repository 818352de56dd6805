pub(crate) mod properties;
pub(crate) mod resolved;
pub(crate) mod sheet;
pub(crate) mod value;

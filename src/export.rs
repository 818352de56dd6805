pub(crate) mod config;
pub(crate) mod filename;
pub(crate) mod pipeline;

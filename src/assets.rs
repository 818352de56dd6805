pub(crate) mod data_url;
pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod inline;

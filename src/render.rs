pub(crate) mod blur;
pub(crate) mod card;
pub(crate) mod composite;
pub(crate) mod encode;
pub(crate) mod raster;

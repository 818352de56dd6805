//! Lockshot renders lock-screen notification mockups to PNG.
//!
//! A [`MemeTemplate`] plus field values becomes a composition tree ([`build_preview`]), which
//! is laid out, serialized into a self-contained SVG document ([`CompositionSerializer`]) and
//! rasterized ([`rasterize`]). The [`Exporter`] produces either a screen-resolution PNG or a
//! square card with a blurred backdrop ([`compose_card`]).
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod assets;
pub(crate) mod export;
pub(crate) mod layout;
pub(crate) mod preview;
pub(crate) mod render;
pub(crate) mod serialize;
pub(crate) mod style;
pub(crate) mod template;
pub(crate) mod text;
pub(crate) mod tree;

pub use crate::foundation::core::{PixelSize, Point, Rect, RoundedRect, Size, round_px};
pub use crate::foundation::error::{LockshotError, LockshotResult};

pub use crate::assets::data_url::{DEFAULT_CONTENT_TYPE, encode_data_url, is_data_url};
pub use crate::assets::decode::decode_pixmap;
pub use crate::assets::fetch::{AssetFetcher, FetchedAsset, HttpFetcher, guess_content_type};
pub use crate::assets::inline::{EmbeddedResource, ResourceInliner};
pub use crate::export::config::{CardOptions, ExportConfig};
pub use crate::export::filename::{ExportVariant, FALLBACK_STEM, export_file_name};
pub use crate::export::pipeline::Exporter;
pub use crate::layout::flex::layout_tree;
pub use crate::layout::text::{TextLine, TextMetrics, measure_block, wrap_lines};
pub use crate::preview::build::build_preview;
pub use crate::preview::session::{PREVIEW_VIEWPORT, PreviewSession};
pub use crate::preview::sheet::{PREVIEW_CSS, preview_resolver, preview_stylesheet};
pub use crate::render::blur::{blur_pixmap, blur_rgba8_premul};
pub use crate::render::card::{CardGeometry, card_geometry, compose_card};
pub use crate::render::composite::{over, over_solid_in_place, saturate_brightness_in_place};
pub use crate::render::encode::{RasterArtifact, encode_png};
pub use crate::render::raster::rasterize;
pub use crate::serialize::document::{CompositionSerializer, SerializedDocument};
pub use crate::serialize::xml::{XHTML_NS, escape_xml, write_xhtml};
pub use crate::style::properties::{PROPERTIES, PropertyDef, ValueKind};
pub use crate::style::resolved::{
    ResolvedStyle, StyleResolver, StyleScope, inline_styles_recursively, resolve_subtree,
    snapshot,
};
pub use crate::style::sheet::{Rule, Selector, SheetResolver, Stylesheet};
pub use crate::style::value::{Rgba, parse_color};
pub use crate::template::model::{
    FieldOption, FieldType, MemeTemplate, NotificationSlot, PreviewConfig, TemplateAssets,
    TemplateField, TemplateLayout, parse_templates,
};
pub use crate::text::tokens::{FieldValues, Gender, TextResolver, TokenTable};
pub use crate::tree::load::{ImageLoad, LoadOutcome};
pub use crate::tree::node::{ImageState, VisualNode};

//! Canonical computed-style property list.
//!
//! Resolvers emit properties in exactly this order, which keeps serialized documents
//! byte-stable for a given input.

/// One entry of the canonical property list.
#[derive(Clone, Copy, Debug)]
pub struct PropertyDef {
    /// CSS property name.
    pub name: &'static str,
    /// Computed initial value.
    pub initial: &'static str,
    /// Whether the property inherits from the parent when unspecified.
    pub inherited: bool,
    /// Value kind used during value computation.
    pub kind: ValueKind,
}

/// How a specified value is turned into a computed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Keywords and opaque values, kept verbatim.
    Keyword,
    /// Lengths; `em`/`rem` become `px`.
    Length,
    /// Colors; normalized to `rgb()`/`rgba()`.
    Color,
    /// `font-size`; relative units use the parent font size.
    FontSize,
    /// `font-weight`; keywords become numbers.
    FontWeight,
}

const fn def(
    name: &'static str,
    initial: &'static str,
    inherited: bool,
    kind: ValueKind,
) -> PropertyDef {
    PropertyDef {
        name,
        initial,
        inherited,
        kind,
    }
}

use ValueKind::{Color, FontSize, FontWeight, Keyword, Length};

/// Every property a resolver reports, in output order.
pub const PROPERTIES: &[PropertyDef] = &[
    def("display", "inline", false, Keyword),
    def("position", "static", false, Keyword),
    def("top", "auto", false, Length),
    def("right", "auto", false, Length),
    def("bottom", "auto", false, Length),
    def("left", "auto", false, Length),
    def("z-index", "auto", false, Keyword),
    def("box-sizing", "content-box", false, Keyword),
    def("width", "auto", false, Length),
    def("height", "auto", false, Length),
    def("aspect-ratio", "auto", false, Keyword),
    def("margin-top", "0px", false, Length),
    def("margin-right", "0px", false, Length),
    def("margin-bottom", "0px", false, Length),
    def("margin-left", "0px", false, Length),
    def("padding-top", "0px", false, Length),
    def("padding-right", "0px", false, Length),
    def("padding-bottom", "0px", false, Length),
    def("padding-left", "0px", false, Length),
    def("border-top-width", "0px", false, Length),
    def("border-right-width", "0px", false, Length),
    def("border-bottom-width", "0px", false, Length),
    def("border-left-width", "0px", false, Length),
    def("border-top-style", "none", false, Keyword),
    def("border-right-style", "none", false, Keyword),
    def("border-bottom-style", "none", false, Keyword),
    def("border-left-style", "none", false, Keyword),
    def("border-top-color", "currentcolor", false, Color),
    def("border-right-color", "currentcolor", false, Color),
    def("border-bottom-color", "currentcolor", false, Color),
    def("border-left-color", "currentcolor", false, Color),
    def("border-top-left-radius", "0px", false, Length),
    def("border-top-right-radius", "0px", false, Length),
    def("border-bottom-right-radius", "0px", false, Length),
    def("border-bottom-left-radius", "0px", false, Length),
    def("flex-direction", "row", false, Keyword),
    def("flex-wrap", "nowrap", false, Keyword),
    def("flex-grow", "0", false, Keyword),
    def("flex-shrink", "1", false, Keyword),
    def("flex-basis", "auto", false, Length),
    def("justify-content", "normal", false, Keyword),
    def("align-items", "normal", false, Keyword),
    def("row-gap", "normal", false, Length),
    def("column-gap", "normal", false, Length),
    def("background-color", "rgba(0, 0, 0, 0)", false, Color),
    def("background-image", "none", false, Keyword),
    def("background-position", "0% 0%", false, Keyword),
    def("background-size", "auto", false, Keyword),
    def("background-repeat", "repeat", false, Keyword),
    def("color", "rgb(0, 0, 0)", true, Color),
    def("font-family", "sans-serif", true, Keyword),
    def("font-size", "16px", true, FontSize),
    def("font-weight", "400", true, FontWeight),
    def("line-height", "normal", true, Length),
    def("text-align", "start", true, Keyword),
    def("white-space", "normal", true, Keyword),
    def("letter-spacing", "normal", true, Length),
    def("visibility", "visible", true, Keyword),
    def("pointer-events", "auto", true, Keyword),
    def("opacity", "1", false, Keyword),
    def("overflow", "visible", false, Keyword),
    def("object-fit", "fill", false, Keyword),
    def("box-shadow", "none", false, Keyword),
    def("backdrop-filter", "none", false, Keyword),
];

/// Look up a property definition by name.
pub fn property(name: &str) -> Option<&'static PropertyDef> {
    PROPERTIES.iter().find(|p| p.name == name)
}

/// Root font size used for `rem` units.
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6" viewBox="0 0 10 6"><rect width="10" height="6" fill="#ff0000"/></svg>"##;

#[test]
fn output_is_logical_size_times_scale() {
    let artifact = rasterize(RED_SQUARE, 10, 6, 2).unwrap();
    assert_eq!((artifact.width, artifact.height), (20, 12));

    let img = image::load_from_memory(&artifact.png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (20, 12));
    assert_eq!(img.get_pixel(10, 6).0, [255, 0, 0, 255]);
}

#[test]
fn scale_three_for_card_intermediate() {
    let artifact = rasterize(RED_SQUARE, 10, 6, 3).unwrap();
    assert_eq!((artifact.width, artifact.height), (30, 18));
}

#[test]
fn switch_falls_back_to_svg_rendition() {
    let doc = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="0 0 4 4"><switch><foreignObject width="100%" height="100%" requiredExtensions="http://www.w3.org/1999/xhtml"><div xmlns="http://www.w3.org/1999/xhtml">html</div></foreignObject><g><rect width="4" height="4" fill="#00ff00"/></g></switch></svg>"##;
    let artifact = rasterize(doc, 4, 4, 1).unwrap();
    let img = image::load_from_memory(&artifact.png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(2, 2).0, [0, 255, 0, 255]);
}

#[test]
fn malformed_documents_are_decode_errors() {
    let err = rasterize("<svg", 10, 10, 2).unwrap_err();
    assert!(matches!(err, LockshotError::ImageDecode(_)));
    assert!(err.is_hard_failure());
}

#[test]
fn zero_scale_is_rejected() {
    let err = rasterize(RED_SQUARE, 10, 6, 0).unwrap_err();
    assert!(matches!(err, LockshotError::Validation(_)));
}

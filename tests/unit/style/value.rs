use super::*;

#[test]
fn parses_hex_and_functional_colors() {
    assert_eq!(parse_color("#fff"), Some(Rgba::opaque(255, 255, 255)));
    assert_eq!(parse_color("#0a0B0c"), Some(Rgba::opaque(10, 11, 12)));
    let c = parse_color("rgba(0, 0, 0, .35)").unwrap();
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
    assert!((c.a - 0.35).abs() < 1e-6);
    assert_eq!(parse_color("rgb(255 128 0)"), Some(Rgba::opaque(255, 128, 0)));
    assert_eq!(parse_color("transparent"), Some(Rgba::TRANSPARENT));
    assert_eq!(parse_color("not-a-color"), None);
}

#[test]
fn color_css_serialization_matches_computed_form() {
    assert_eq!(Rgba::opaque(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    let c = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 0.5,
    };
    assert_eq!(c.to_css(), "rgba(255, 255, 255, 0.5)");
    assert_eq!(c.to_hex(), "#ffffff");
}

#[test]
fn lengths_compute_relative_units_to_px() {
    assert_eq!(parse_length("0"), Some(Length::Px(0.0)));
    assert_eq!(parse_length("1.5rem"), Some(Length::Rem(1.5)));
    assert_eq!(parse_length("2em"), Some(Length::Em(2.0)));
    assert_eq!(parse_length("50%"), Some(Length::Percent(50.0)));
    assert_eq!(parse_length("auto"), None);
    assert_eq!(compute_lengths("1rem 0.5em 10%", 20.0, 16.0), "16px 10px 10%");
}

#[test]
fn number_formatting_trims_trailing_zeros() {
    assert_eq!(format_number(2.0), "2");
    assert_eq!(format_number(0.35), "0.35");
    assert_eq!(format_number(1.0 / 3.0), "0.333");
    assert_eq!(format_px(12.5), "12.5px");
}

#[test]
fn top_level_split_respects_parentheses() {
    assert_eq!(
        split_top_level("1px solid rgba(255, 255, 255, 0.2)", ' '),
        vec!["1px", "solid", "rgba(255, 255, 255, 0.2)"]
    );
    assert_eq!(
        split_top_level("url(a.png), url('b c.png')", ','),
        vec!["url(a.png)", "url('b c.png')"]
    );
}

#[test]
fn finds_every_url_form() {
    let urls = css_urls(r#"url(a.png), url("b.png"), url( 'c.png' ), url()"#);
    let names: Vec<_> = urls.iter().map(|u| u.url.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
}

#[test]
fn replacing_urls_keeps_declined_tokens() {
    let out = replace_css_urls("url(a.png), url(\"b.png\")", |u| {
        (u == "a.png").then(|| "data:image/png;base64,AA==".to_string())
    });
    assert_eq!(out, r#"url("data:image/png;base64,AA=="), url("b.png")"#);
}

#[test]
fn box_shorthand_expands_like_css() {
    assert_eq!(expand_box("1px").unwrap(), ["1px", "1px", "1px", "1px"]);
    assert_eq!(expand_box("1px 2px").unwrap(), ["1px", "2px", "1px", "2px"]);
    assert_eq!(expand_box("1px 2px 3px").unwrap(), ["1px", "2px", "3px", "2px"]);
    assert_eq!(expand_box("1px 2px 3px 4px 5px"), None);
}

use super::*;

#[test]
fn defaults_match_the_card_framing() {
    let cfg = ExportConfig::default();
    assert_eq!(cfg.raw_scale, 2);
    assert_eq!(cfg.card.size, 1080);
    assert_eq!(cfg.card.intermediate_scale, 3);
    assert_eq!(cfg.card.padding_fraction, 0.07);
    assert_eq!(cfg.card.min_corner_radius, 12.0);
    assert_eq!(cfg.card.blur_px, 26.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let cfg: ExportConfig =
        serde_json::from_str(r#"{ "rawScale": 3, "card": { "size": 512 } }"#).unwrap();
    assert_eq!(cfg.raw_scale, 3);
    assert_eq!(cfg.card.size, 512);
    assert_eq!(cfg.card.scrim_opacity, 0.24);
}

#[test]
fn zero_scales_are_rejected() {
    let cfg = ExportConfig {
        raw_scale: 0,
        ..ExportConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(LockshotError::Validation(_))));

    let mut cfg = ExportConfig::default();
    cfg.card.intermediate_scale = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn out_of_range_card_values_are_rejected() {
    let mut card = CardOptions {
        padding_fraction: 0.5,
        ..CardOptions::default()
    };
    assert!(card.validate().is_err());

    card.padding_fraction = 0.1;
    card.blur_px = -1.0;
    assert!(card.validate().is_err());

    card.blur_px = 0.0;
    card.scrim_opacity = 1.5;
    let err = card.validate().unwrap_err();
    assert!(err.to_string().contains("scrimOpacity"));
}

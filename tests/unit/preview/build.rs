use super::*;
use crate::template::model::{NotificationSlot, PreviewConfig, TemplateAssets};

fn template() -> MemeTemplate {
    MemeTemplate {
        id: "rh".into(),
        name: "Recado do RH".into(),
        description: String::new(),
        layout: None,
        assets: TemplateAssets {
            background: "templates/rh/bg.jpg".into(),
            app_icon: "templates/rh/icon.png".into(),
            preview: None,
        },
        fields: Vec::new(),
        defaults: FieldValues::from([
            ("titulo".to_owned(), "RH".to_owned()),
            ("msg1".to_owned(), "Parabéns {ao} {colaborador} {nome}".to_owned()),
        ]),
        notifications: vec![
            NotificationSlot {
                title_key: "titulo".into(),
                text_key: "msg1".into(),
                time_label: Some("agora".into()),
            },
            NotificationSlot {
                title_key: "titulo".into(),
                text_key: "msg2".into(),
                time_label: None,
            },
        ],
        preview: PreviewConfig {
            time: "9:41".into(),
            subtitle: "sexta-feira, 13 de junho".into(),
            battery: "80%".into(),
            notification_time: "5 min".into(),
        },
    }
}

#[test]
fn root_is_the_phone_card_with_background() {
    let root = build_preview(&template(), &FieldValues::new());
    assert_eq!(root.tag, "article");
    assert!(root.has_class("iphone"));
    assert_eq!(
        root.style_value("background-image"),
        Some("url(templates/rh/bg.jpg)")
    );
    let classes: Vec<_> = root
        .children
        .iter()
        .map(|c| c.attr("class").unwrap_or_default())
        .collect();
    assert_eq!(
        classes,
        ["iphone-overlay", "status-bar", "time", "notifications"]
    );
}

#[test]
fn one_notification_row_per_slot_with_interpolated_text() {
    let values = FieldValues::from([
        ("nome".to_owned(), "Bruno".to_owned()),
        ("genero".to_owned(), "m".to_owned()),
    ]);
    let root = build_preview(&template(), &values);
    let rows = &root.children[3].children;
    assert_eq!(rows.len(), 2);

    let header = |row: usize| root.node_at(&[3, row, 1, 0]).unwrap();
    assert_eq!(header(0).children[0].text.as_deref(), Some("RH"));
    assert_eq!(header(0).children[1].text.as_deref(), Some("agora"));
    assert_eq!(header(1).children[1].text.as_deref(), Some("5 min"));

    let body = root.node_at(&[3, 0, 1, 1]).unwrap();
    assert_eq!(body.text.as_deref(), Some("Parabéns o colaborador Bruno"));
    assert_eq!(root.node_at(&[3, 1, 1, 1]).unwrap().text.as_deref(), Some(""));
}

#[test]
fn badges_hold_the_app_icon() {
    let root = build_preview(&template(), &FieldValues::new());
    let img = root.node_at(&[3, 0, 0, 0]).unwrap();
    assert!(img.is_image());
    assert_eq!(img.attr("src"), Some("templates/rh/icon.png"));
    assert_eq!(img.attr("alt"), Some("App"));
    assert_eq!(root.image_loads().len(), 2);
}

#[test]
fn status_bar_and_clock_use_preview_config() {
    let root = build_preview(&template(), &FieldValues::new());
    let battery = root.node_at(&[1, 1, 0]).unwrap();
    assert_eq!(battery.text.as_deref(), Some("80%"));
    let time = root.node_at(&[2, 0]).unwrap();
    assert_eq!(time.tag, "h1");
    assert_eq!(time.text.as_deref(), Some("9:41"));
}

use crate::template::model::MemeTemplate;
use crate::text::tokens::{FieldValues, TextResolver};
use crate::tree::node::{ImageState, VisualNode};

/// Build the lock-screen composition for `template` with the given field values.
///
/// The tree is not laid out yet. Image nodes carry settled loads.
pub fn build_preview(template: &MemeTemplate, values: &FieldValues) -> VisualNode {
    let text = TextResolver::new(values, &template.defaults);
    let preview = &template.preview;

    let status_bar = div("status-bar").with_children([
        VisualNode::new("div").with_text("📶"),
        div("battery").with_children([
            VisualNode::new("span").with_text(preview.battery.as_str()),
            div("battery-icon").with_children([
                div("battery-level"),
                div("battery-tip").with_attr("aria-hidden", "true"),
            ]),
        ]),
    ]);

    let time = div("time").with_children([
        VisualNode::new("h1").with_text(preview.time.as_str()),
        VisualNode::new("span").with_text(preview.subtitle.as_str()),
    ]);

    let notifications = div("notifications").with_children(template.notifications.iter().map(
        |slot| {
            let time_label = slot
                .time_label
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(&preview.notification_time);
            div("notification").with_children([
                div("badge").with_child(app_icon(&template.assets.app_icon)),
                div("notification-content").with_children([
                    div("notification-header").with_children([
                        VisualNode::new("strong").with_text(text.resolve(&slot.title_key)),
                        VisualNode::new("span")
                            .with_class("notification-time")
                            .with_text(time_label),
                    ]),
                    div("notification-text").with_text(text.resolve(&slot.text_key)),
                ]),
            ])
        },
    ));

    VisualNode::new("article")
        .with_class("iphone")
        .with_style(
            "background-image",
            format!("url({})", template.assets.background),
        )
        .with_children([
            div("iphone-overlay").with_attr("aria-hidden", "true"),
            status_bar,
            time,
            notifications,
        ])
}

fn div(class: &str) -> VisualNode {
    VisualNode::new("div").with_class(class)
}

fn app_icon(src: &str) -> VisualNode {
    VisualNode::new("img")
        .with_attr("src", src)
        .with_attr("alt", "App")
        .with_image(ImageState::default())
}

#[cfg(test)]
#[path = "../../tests/unit/preview/build.rs"]
mod tests;

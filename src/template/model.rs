use serde::{Deserialize, Serialize};

use crate::foundation::error::{LockshotError, LockshotResult};
use crate::text::tokens::FieldValues;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLayout {
    #[default]
    Iphone,
    Descanse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Image,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateField {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAssets {
    pub background: String,
    pub app_icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// One notification row: field keys for its title and body, plus an optional time label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSlot {
    pub title_key: String,
    pub text_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    pub time: String,
    pub subtitle: String,
    pub battery: String,
    pub notification_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<TemplateLayout>,
    pub assets: TemplateAssets,
    #[serde(default)]
    pub fields: Vec<TemplateField>,
    #[serde(default)]
    pub defaults: FieldValues,
    #[serde(default)]
    pub notifications: Vec<NotificationSlot>,
    pub preview: PreviewConfig,
}

impl MemeTemplate {
    /// Parse one descriptor and normalize its asset paths.
    pub fn from_json(json: &str) -> LockshotResult<Self> {
        let template: Self = serde_json::from_str(json)
            .map_err(|e| LockshotError::serde(format!("template descriptor: {e}")))?;
        Ok(template.normalized())
    }

    /// Asset paths rooted at `/templates/` become relative to the document location.
    pub fn normalized(mut self) -> Self {
        normalize_asset_path(&mut self.assets.background);
        normalize_asset_path(&mut self.assets.app_icon);
        if let Some(preview) = self.assets.preview.as_mut() {
            normalize_asset_path(preview);
        }
        self
    }

    /// Current field values, each falling back to the template default, else empty.
    pub fn field_values(&self, overrides: &FieldValues) -> FieldValues {
        self.fields
            .iter()
            .map(|field| {
                let value = overrides
                    .get(&field.key)
                    .or_else(|| self.defaults.get(&field.key))
                    .cloned()
                    .unwrap_or_default();
                (field.key.clone(), value)
            })
            .collect()
    }
}

fn normalize_asset_path(path: &mut String) {
    if path.starts_with("/templates/") {
        path.remove(0);
    }
}

/// Parse a catalog (`templates/index.json`, a JSON array) or a single descriptor.
pub fn parse_templates(json: &str) -> LockshotResult<Vec<MemeTemplate>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<MemeTemplate>),
        One(Box<MemeTemplate>),
    }

    let parsed: OneOrMany = serde_json::from_str(json)
        .map_err(|e| LockshotError::serde(format!("template catalog: {e}")))?;
    let templates = match parsed {
        OneOrMany::Many(many) => many,
        OneOrMany::One(one) => vec![*one],
    };
    Ok(templates.into_iter().map(MemeTemplate::normalized).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;

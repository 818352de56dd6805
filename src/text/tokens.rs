use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Field key -> current text.
pub type FieldValues = BTreeMap<String, String>;

pub const NAME_FIELD: &str = "nome";
pub const GENDER_FIELD: &str = "genero";
/// Stand-in used when the name field is blank.
pub const PLACEHOLDER_NAME: &str = "Fulano";

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("Failed to compile token regex")
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Feminine,
    Masculine,
}

impl Gender {
    /// `masculino`, `masc` and `m` (any case, surrounding blanks ignored) are masculine.
    /// Everything else, including an empty value, is feminine.
    pub fn from_field(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "masculino" | "masc" | "m" => Self::Masculine,
            _ => Self::Feminine,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Feminine => "feminino",
            Self::Masculine => "masculino",
        }
    }

    fn pick(self, masculine: &'static str, feminine: &'static str) -> &'static str {
        match self {
            Self::Masculine => masculine,
            Self::Feminine => feminine,
        }
    }
}

/// Replacement text for every known `{token}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenTable {
    entries: BTreeMap<&'static str, String>,
}

impl TokenTable {
    pub fn new(name: &str, gender: Gender) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { PLACEHOLDER_NAME } else { name };
        let entries = BTreeMap::from([
            ("nome", name.to_owned()),
            ("genero", gender.label().to_owned()),
            ("ao", gender.pick("o", "a").to_owned()),
            (
                "colaborador",
                gender.pick("colaborador", "colaboradora").to_owned(),
            ),
            ("seu", gender.pick("seu", "sua").to_owned()),
            ("do", gender.pick("do", "da").to_owned()),
        ]);
        Self { entries }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Replace every `{token}`; unknown tokens become empty. Text without `{` is returned as is.
    pub fn interpolate(&self, raw: &str) -> String {
        if !raw.contains('{') {
            return raw.to_owned();
        }
        token_regex()
            .replace_all(raw, |caps: &Captures<'_>| {
                self.get(&caps[1]).unwrap_or_default().to_owned()
            })
            .into_owned()
    }
}

/// Looks up field text for one template and fills in its tokens.
#[derive(Clone, Copy, Debug)]
pub struct TextResolver<'a> {
    values: &'a FieldValues,
    defaults: &'a FieldValues,
}

impl<'a> TextResolver<'a> {
    pub fn new(values: &'a FieldValues, defaults: &'a FieldValues) -> Self {
        Self { values, defaults }
    }

    /// Current value, else the template default, else empty.
    pub fn raw(&self, key: &str) -> &'a str {
        self.values
            .get(key)
            .or_else(|| self.defaults.get(key))
            .map_or("", String::as_str)
    }

    pub fn tokens(&self) -> TokenTable {
        TokenTable::new(
            self.raw(NAME_FIELD),
            Gender::from_field(self.raw(GENDER_FIELD)),
        )
    }

    pub fn resolve(&self, key: &str) -> String {
        let raw = self.raw(key);
        if !raw.contains('{') {
            return raw.to_owned();
        }
        self.tokens().interpolate(raw)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/tokens.rs"]
mod tests;

//! Profile document model and field-level validation.
//!
//! A profile document is the user-authored JSON that drives a profile page.
//! [`validate`] checks an arbitrary JSON value against the document shape and
//! reports every problem with the path of the offending field, so callers can
//! show all issues at once instead of the first deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Separator used when rendering issue paths.
pub const PATH_SEPARATOR: &str = " → ";

/// A validated profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

/// Presentation options for a profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// Page color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    const NAMES: &'static [&'static str] = &["dark", "light"];
}

/// Page font family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Sans,
    Serif,
}

impl Font {
    const NAMES: &'static [&'static str] = &["sans", "serif"];
}

/// A titled block of content on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    List { title: String, items: Vec<ListItem> },
    Text { title: String, content: String },
    Links { title: String, links: Vec<Link> },
}

impl Section {
    const TYPES: &'static [&'static str] = &["list", "text", "links"];
}

/// Entry of a `list` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Entry of a `links` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Path to the field, segments joined by [`PATH_SEPARATOR`]. Empty for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.path, self.message)
    }
}

/// Validate a JSON value as a profile document.
///
/// Returns the typed document, or every issue found.
pub fn validate(value: &Value) -> Result<ProfileDocument, Vec<ValidationIssue>> {
    let mut checker = Checker::default();
    checker.document(value);

    if !checker.issues.is_empty() {
        return Err(checker.issues);
    }

    serde_json::from_value(value.clone()).map_err(|e| {
        vec![ValidationIssue {
            path: String::new(),
            message: e.to_string(),
        }]
    })
}

#[derive(Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

fn join_path(path: &[Segment<'_>]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child<'a>(path: &[Segment<'a>], segment: Segment<'a>) -> Vec<Segment<'a>> {
    let mut path = path.to_vec();
    path.push(segment);
    path
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn issue(&mut self, path: &[Segment<'_>], message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: join_path(path),
            message: message.into(),
        });
    }

    fn expected(&mut self, path: &[Segment<'_>], expected: &str, value: &Value) {
        self.issue(
            path,
            format!("expected {expected}, received {}", type_name(value)),
        );
    }

    fn object<'v>(
        &mut self,
        path: &[Segment<'_>],
        value: &'v Value,
    ) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.expected(path, "object", other);
                None
            }
        }
    }

    fn array<'v>(&mut self, path: &[Segment<'_>], value: &'v Value) -> Option<&'v [Value]> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.expected(path, "array", other);
                None
            }
        }
    }

    /// Check a required string field; `non_empty` also rejects blank strings.
    fn required_string<'v>(
        &mut self,
        map: &'v Map<String, Value>,
        path: &[Segment<'_>],
        key: &str,
        non_empty: bool,
    ) -> Option<&'v str> {
        let field = child(path, Segment::Key(key));
        match map.get(key) {
            None | Some(Value::Null) => {
                self.issue(&field, "required");
                None
            }
            Some(Value::String(s)) if non_empty && s.trim().is_empty() => {
                self.issue(&field, "must not be empty");
                None
            }
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                self.expected(&field, "string", other);
                None
            }
        }
    }

    fn optional_string<'v>(
        &mut self,
        map: &'v Map<String, Value>,
        path: &[Segment<'_>],
        key: &str,
    ) -> Option<&'v str> {
        match map.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                self.expected(&child(path, Segment::Key(key)), "string", other);
                None
            }
        }
    }

    fn url(&mut self, path: &[Segment<'_>], key: &str, raw: &str) {
        let valid = url::Url::parse(raw)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            self.issue(&child(path, Segment::Key(key)), "invalid url");
        }
    }

    fn one_of(
        &mut self,
        map: &Map<String, Value>,
        path: &[Segment<'_>],
        key: &str,
        allowed: &[&str],
    ) {
        let Some(value) = self.optional_string(map, path, key) else {
            return;
        };
        if !allowed.contains(&value) {
            let options = allowed
                .iter()
                .map(|o| format!("\"{o}\""))
                .collect::<Vec<_>>()
                .join(" | ");
            self.issue(
                &child(path, Segment::Key(key)),
                format!("expected one of {options}"),
            );
        }
    }

    fn document(&mut self, value: &Value) {
        let Some(map) = self.object(&[], value) else {
            return;
        };

        self.required_string(map, &[], "name", true);
        self.required_string(map, &[], "description", false);

        match map.get("style") {
            None | Some(Value::Null) => {}
            Some(style) => self.style(style),
        }

        // `sections` may be omitted but not null
        match map.get("sections") {
            None => {}
            Some(sections) => {
                let path = [Segment::Key("sections")];
                if let Some(sections) = self.array(&path, sections) {
                    for (index, section) in sections.iter().enumerate() {
                        self.section(&child(&path, Segment::Index(index)), section);
                    }
                }
            }
        }
    }

    fn style(&mut self, value: &Value) {
        let path = [Segment::Key("style")];
        let Some(map) = self.object(&path, value) else {
            return;
        };
        self.one_of(map, &path, "theme", Theme::NAMES);
        self.one_of(map, &path, "font", Font::NAMES);
    }

    fn section(&mut self, path: &[Segment<'_>], value: &Value) {
        let Some(map) = self.object(path, value) else {
            return;
        };

        self.required_string(map, path, "title", false);

        let Some(kind) = self.required_string(map, path, "type", false) else {
            return;
        };

        match kind {
            "list" => self.entries(map, path, "items", Self::list_item),
            "text" => {
                self.required_string(map, path, "content", false);
            }
            "links" => self.entries(map, path, "links", Self::link),
            other => {
                let options = Section::TYPES
                    .iter()
                    .map(|t| format!("\"{t}\""))
                    .collect::<Vec<_>>()
                    .join(" | ");
                self.issue(
                    &child(path, Segment::Key("type")),
                    format!("unknown section type \"{other}\", expected one of {options}"),
                );
            }
        }
    }

    fn entries(
        &mut self,
        map: &Map<String, Value>,
        path: &[Segment<'_>],
        key: &str,
        check: fn(&mut Self, &[Segment<'_>], &Value),
    ) {
        let field = child(path, Segment::Key(key));
        let Some(value) = map.get(key) else {
            self.issue(&field, "required");
            return;
        };
        if let Some(entries) = self.array(&field, value) {
            for (index, entry) in entries.iter().enumerate() {
                check(self, &child(&field, Segment::Index(index)), entry);
            }
        }
    }

    fn list_item(&mut self, path: &[Segment<'_>], value: &Value) {
        let Some(map) = self.object(path, value) else {
            return;
        };
        self.required_string(map, path, "title", false);
        if let Some(url) = self.optional_string(map, path, "url") {
            self.url(path, "url", url);
        }
        self.optional_string(map, path, "description");
        self.optional_string(map, path, "date");
    }

    fn link(&mut self, path: &[Segment<'_>], value: &Value) {
        let Some(map) = self.object(path, value) else {
            return;
        };
        self.required_string(map, path, "title", false);
        if let Some(url) = self.required_string(map, path, "url", false) {
            self.url(path, "url", url);
        }
    }
}

//! Bibliography entry model.
//!
//! Entries arrive from the BibTeX adapter or from stored JSON records and are
//! handed to the formatter read-only. Every field is optional: absence is a
//! valid state that the formatter renders through its placeholder rules.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a record, selecting which citation template applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryType {
    Article,
    Book,
    /// Conference paper (`@inproceedings`).
    InProceedings,
    /// Any other tag, rendered with each style's fallback template.
    Other(String),
    /// No type tag at all. Also uses the fallback template.
    #[default]
    Missing,
}

impl EntryType {
    /// Parses a type tag. Matching is exact on the lowercase tag names, so
    /// `"Article"` is an `Other` type, same as `"misc"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "article" => EntryType::Article,
            "book" => EntryType::Book,
            "inproceedings" => EntryType::InProceedings,
            other => EntryType::Other(other.to_string()),
        }
    }

    /// The tag this type was parsed from, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            EntryType::Article => Some("article"),
            EntryType::Book => Some("book"),
            EntryType::InProceedings => Some("inproceedings"),
            EntryType::Other(tag) => Some(tag),
            EntryType::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EntryType::Missing)
    }
}

impl From<Option<&str>> for EntryType {
    fn from(tag: Option<&str>) -> Self {
        tag.map_or(EntryType::Missing, EntryType::from_tag)
    }
}

/// A field a citation template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Author,
    Title,
    Year,
    Journal,
    Volume,
    Pages,
    Publisher,
    Booktitle,
    Address,
}

impl Field {
    /// Lowercase BibTeX field name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::Title => "title",
            Field::Year => "year",
            Field::Journal => "journal",
            Field::Volume => "volume",
            Field::Pages => "pages",
            Field::Publisher => "publisher",
            Field::Booktitle => "booktitle",
            Field::Address => "address",
        }
    }

    /// Looks up a field by its BibTeX name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        const ALL: [Field; 9] = [
            Field::Author,
            Field::Title,
            Field::Year,
            Field::Journal,
            Field::Volume,
            Field::Pages,
            Field::Publisher,
            Field::Booktitle,
            Field::Address,
        ];
        ALL.into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }
}

/// A single bibliography record.
///
/// Deserializes from the stored record shape (`{"id": ..., "type": "article",
/// "author": ..., "year": 2020}`). Scalar values are stringified verbatim and
/// JSON `null` counts as absent. Keys the formatter does not use are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BibliographyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        rename = "type",
        alias = "entryType",
        alias = "entry_type",
        deserialize_with = "entry_type_value",
        serialize_with = "serialize_entry_type",
        skip_serializing_if = "EntryType::is_missing"
    )]
    pub entry_type: EntryType,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub booktitle: Option<String>,
    #[serde(default, deserialize_with = "text_value", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl BibliographyEntry {
    /// Creates an empty entry of the given type.
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            entry_type,
            ..Default::default()
        }
    }

    /// Returns the value of a template field, if present.
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Author => &self.author,
            Field::Title => &self.title,
            Field::Year => &self.year,
            Field::Journal => &self.journal,
            Field::Volume => &self.volume,
            Field::Pages => &self.pages,
            Field::Publisher => &self.publisher,
            Field::Booktitle => &self.booktitle,
            Field::Address => &self.address,
        };
        value.as_deref()
    }

    /// Sets a template field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Author => &mut self.author,
            Field::Title => &mut self.title,
            Field::Year => &mut self.year,
            Field::Journal => &mut self.journal,
            Field::Volume => &mut self.volume,
            Field::Pages => &mut self.pages,
            Field::Publisher => &mut self.publisher,
            Field::Booktitle => &mut self.booktitle,
            Field::Address => &mut self.address,
        };
        *slot = Some(value.into());
    }

    /// Builder-style variant of [`set_field`](Self::set_field).
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set_field(field, value);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

fn text_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

fn entry_type_value<'de, D>(deserializer: D) -> Result<EntryType, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = text_value(deserializer)?;
    Ok(EntryType::from(tag.as_deref()))
}

fn serialize_entry_type<S>(entry_type: &EntryType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match entry_type.tag() {
        Some(tag) => serializer.serialize_str(tag),
        None => serializer.serialize_none(),
    }
}

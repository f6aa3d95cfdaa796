//! Document model
//!
//! A document is created with a caller-supplied id and mutated through
//! partial updates. Deletion is logical: the row stays, its status flips to
//! [`DocumentStatus::Deleted`] and every read path skips it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NanningError, Result};

/// Editor kind a document is opened with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Richtext,
    Code,
    Markdown,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Richtext,
        DocumentType::Code,
        DocumentType::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Richtext => "richtext",
            DocumentType::Code => "code",
            DocumentType::Markdown => "markdown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "richtext" => Ok(DocumentType::Richtext),
            "code" => Ok(DocumentType::Code),
            "markdown" => Ok(DocumentType::Markdown),
            other => Err(format!(
                "unknown document type '{}' (expected richtext, code or markdown)",
                other
            )),
        }
    }
}

/// Visibility of a document row.
///
/// Stored as the `is_deleted` integer column. A purged state would be a
/// third variant here; nothing outside this module matches on the column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Active,
    Deleted,
}

impl DocumentStatus {
    pub(crate) fn from_flag(flag: i64) -> Self {
        if flag == 0 {
            DocumentStatus::Active
        } else {
            DocumentStatus::Deleted
        }
    }

    pub(crate) fn as_flag(&self) -> i64 {
        match self {
            DocumentStatus::Active => 0,
            DocumentStatus::Deleted => 1,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DocumentStatus::Active)
    }
}

/// Language tag used when none is supplied
pub const DEFAULT_LANGUAGE: &str = "plaintext";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// A stored document as returned by every read path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub language: String,
    pub folder_id: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: DocumentStatus,
}

/// Fields accepted by `create_document`. Everything but `id` and `title`
/// has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub doc_type: DocumentType,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            doc_type: DocumentType::default(),
            language: default_language(),
            folder_id: None,
            tags: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = doc_type;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(NanningError::invalid_input("id", "document id is required"));
        }
        if self.title.trim().is_empty() {
            return Err(NanningError::invalid_input(
                "title",
                "document title is required",
            ));
        }
        Ok(())
    }
}

/// Partial update. `None` leaves the stored value alone.
///
/// `folder_id` is doubly optional so a caller can clear the folder with
/// `Some(None)`. Setting `status` to `Active` on a deleted document restores
/// it; setting it to `Deleted` is exactly what `delete_document` does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<DocumentType>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, with = "double_option")]
    pub folder_id: Option<Option<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
}

impl DocumentUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn doc_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn folder(mut self, folder_id: Option<String>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn status(mut self, status: DocumentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Fold this update over the stored document
    pub(crate) fn apply_to(&self, doc: &mut Document) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(NanningError::invalid_input(
                    "title",
                    "document title cannot be empty",
                ));
            }
            doc.title = title.clone();
        }
        if let Some(content) = &self.content {
            doc.content = content.clone();
        }
        if let Some(doc_type) = self.doc_type {
            doc.doc_type = doc_type;
        }
        if let Some(language) = &self.language {
            doc.language = language.clone();
        }
        if let Some(folder_id) = &self.folder_id {
            doc.folder_id = folder_id.clone();
        }
        if let Some(tags) = &self.tags {
            doc.tags = tags.clone();
        }
        if let Some(status) = self.status {
            doc.status = status;
        }
        Ok(())
    }
}

/// Distinguishes a missing `folder_id` key from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

/// Encode tags for the `tags` column
pub fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).map_err(|e| NanningError::invalid_input("tags", e.to_string()))
}

/// Decode the `tags` column. A NULL column is an empty list; anything that
/// is not a JSON array of strings is an error.
pub fn decode_tags(raw: Option<&str>) -> std::result::Result<Vec<String>, serde_json::Error> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s),
    }
}

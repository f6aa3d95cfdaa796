//! Folder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::Result;

/// A stored folder. Folders nest through `parent_id`; documents point at
/// them through `folder_id`. Neither reference is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewFolder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail_invalid!("id", "folder id is required");
        }
        if self.name.trim().is_empty() {
            bail_invalid!("name", "folder name is required");
        }
        if self.parent_id.as_deref() == Some(self.id.as_str()) {
            bail_invalid!("parent_id", "a folder cannot be its own parent");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NanningError;

    #[test]
    fn test_validate_requires_name() {
        let err = NewFolder::new("f1", "  ").validate().unwrap_err();
        assert!(matches!(err, NanningError::InvalidInput { field: "name", .. }));
    }

    #[test]
    fn test_validate_rejects_self_parent() {
        let err = NewFolder::new("f1", "Work")
            .with_parent("f1")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NanningError::InvalidInput {
                field: "parent_id",
                ..
            }
        ));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let folder: NewFolder = serde_json::from_str(r#"{"id":"f1","name":"Work"}"#).unwrap();
        assert_eq!(folder, NewFolder::new("f1", "Work"));
    }
}

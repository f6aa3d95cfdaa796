use rusqlite::{params, Row};

use crate::error::{NanningError, Result};
use crate::folder::{Folder, NewFolder};
use crate::map_db_err;

use super::clock::{format_timestamp, parse_timestamp};

struct FolderRow {
    id: String,
    name: String,
    parent_id: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    created_at: String,
    updated_at: String,
}

impl FolderRow {
    fn read(row: &Row) -> rusqlite::Result<Self> {
        Ok(FolderRow {
            id: row.get(0)?,
            name: row.get(1)?,
            parent_id: row.get(2)?,
            icon: row.get(3)?,
            color: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn decode(self) -> Result<Folder> {
        let created_at = parse_timestamp(&self.created_at)
            .map_err(|e| NanningError::corrupt("folder", self.id.as_str(), "created_at", e))?;
        let updated_at = parse_timestamp(&self.updated_at)
            .map_err(|e| NanningError::corrupt("folder", self.id.as_str(), "updated_at", e))?;
        Ok(Folder {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
            icon: self.icon,
            color: self.color,
            created_at,
            updated_at,
        })
    }
}

impl super::Database {
    #[tracing::instrument(skip(self, folder), fields(id = %folder.id))]
    pub fn create_folder(&self, folder: &NewFolder) -> Result<Folder> {
        folder.validate()?;
        let now = self.clock.now();
        let stamp = format_timestamp(now);

        self.conn
            .execute(
                "INSERT INTO folders (id, name, parent_id, icon, color, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![
                    &folder.id,
                    &folder.name,
                    folder.parent_id.as_deref(),
                    folder.icon.as_deref(),
                    folder.color.as_deref(),
                    &stamp,
                ],
            )
            .map_err(|e| NanningError::from_insert("folder", &folder.id, e))?;

        Ok(Folder {
            id: folder.id.clone(),
            name: folder.name.clone(),
            parent_id: folder.parent_id.clone(),
            icon: folder.icon.clone(),
            color: folder.color.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Every folder, ordered by name
    pub fn list_folders(&self) -> Result<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, parent_id, icon, color, created_at, updated_at
                 FROM folders ORDER BY name, id",
            )
            .map_err(map_db_err!("prepare list folders"))?;
        let rows = stmt
            .query_map([], FolderRow::read)
            .map_err(map_db_err!("list folders"))?;

        let mut folders = Vec::new();
        for row in rows {
            let row = row.map_err(map_db_err!("read folder row"))?;
            folders.push(row.decode()?);
        }
        Ok(folders)
    }
}

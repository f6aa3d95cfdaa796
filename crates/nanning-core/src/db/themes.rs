use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use crate::error::{NanningError, Result};
use crate::map_db_err;
use crate::theme::{presets, Theme, ThemeInput, ThemeMode};

use super::clock::{format_timestamp, parse_timestamp};

const THEME_COLUMNS: &str =
    "id, name, mode, gradient, colors, glass, is_preset, created_at, updated_at";

struct ThemeRow {
    id: String,
    name: String,
    mode: String,
    gradient: String,
    colors: String,
    glass: String,
    is_preset: i64,
    created_at: String,
    updated_at: String,
}

impl ThemeRow {
    fn read(row: &Row) -> rusqlite::Result<Self> {
        Ok(ThemeRow {
            id: row.get(0)?,
            name: row.get(1)?,
            mode: row.get(2)?,
            gradient: row.get(3)?,
            colors: row.get(4)?,
            glass: row.get(5)?,
            is_preset: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    /// Every structured field must decode; a broken theme is an error, never
    /// an empty default
    fn decode(self) -> Result<Theme> {
        let corrupt = |field, e: &dyn std::fmt::Display| {
            NanningError::corrupt("theme", self.id.as_str(), field, e)
        };

        let mode = self
            .mode
            .parse::<ThemeMode>()
            .map_err(|e: String| corrupt("mode", &e))?;
        let gradient = serde_json::from_str(&self.gradient).map_err(|e| corrupt("gradient", &e))?;
        let colors = serde_json::from_str(&self.colors).map_err(|e| corrupt("colors", &e))?;
        let glass = serde_json::from_str(&self.glass).map_err(|e| corrupt("glass", &e))?;
        let created_at = parse_timestamp(&self.created_at).map_err(|e| corrupt("created_at", &e))?;
        let updated_at = parse_timestamp(&self.updated_at).map_err(|e| corrupt("updated_at", &e))?;

        Ok(Theme {
            id: self.id,
            name: self.name,
            mode,
            gradient,
            colors,
            glass,
            is_preset: self.is_preset != 0,
            created_at,
            updated_at,
        })
    }
}

/// Structured theme fields as stored
struct EncodedTheme {
    gradient: String,
    colors: String,
    glass: String,
}

fn encode_field<T: Serialize>(field: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| NanningError::invalid_input(field, e.to_string()))
}

impl EncodedTheme {
    fn new(theme: &ThemeInput) -> Result<Self> {
        Ok(EncodedTheme {
            gradient: encode_field("gradient", &theme.gradient)?,
            colors: encode_field("colors", &theme.colors)?,
            glass: encode_field("glass", &theme.glass)?,
        })
    }
}

fn load_theme(conn: &Connection, id: &str) -> Result<Option<Theme>> {
    let sql = format!("SELECT {} FROM themes WHERE id = ?1", THEME_COLUMNS);
    let row = conn
        .query_row(&sql, params![id], ThemeRow::read)
        .optional()
        .map_err(|e| NanningError::storage(format!("get theme {}", id), e))?;
    row.map(ThemeRow::decode).transpose()
}

impl super::Database {
    /// Insert or overwrite a theme.
    ///
    /// On overwrite every mutable field is replaced, `created_at` is kept and
    /// `updated_at` advances. The preset flag can be raised but never
    /// cleared, so a preset stays undeletable after being customised.
    #[tracing::instrument(skip(self, theme), fields(id = %theme.id))]
    pub fn save_theme(&self, theme: &ThemeInput) -> Result<Theme> {
        theme.validate()?;
        let encoded = EncodedTheme::new(theme)?;

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(map_db_err!("begin save theme transaction"))?;

        let previous: Option<String> = tx
            .query_row(
                "SELECT updated_at FROM themes WHERE id = ?1",
                params![&theme.id],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| NanningError::storage(format!("get theme {}", theme.id), e))?;
        let floor = previous
            .as_deref()
            .map(parse_timestamp)
            .transpose()
            .map_err(|e| NanningError::corrupt("theme", theme.id.as_str(), "updated_at", e))?;
        let stamp = format_timestamp(self.clock.after(floor));

        tx.execute(
            "INSERT INTO themes (id, name, mode, gradient, colors, glass, is_preset, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 mode = excluded.mode,
                 gradient = excluded.gradient,
                 colors = excluded.colors,
                 glass = excluded.glass,
                 is_preset = MAX(themes.is_preset, excluded.is_preset),
                 updated_at = excluded.updated_at",
            params![
                &theme.id,
                &theme.name,
                theme.mode.as_str(),
                &encoded.gradient,
                &encoded.colors,
                &encoded.glass,
                theme.is_preset as i64,
                &stamp,
            ],
        )
        .map_err(|e| NanningError::storage(format!("save theme {}", theme.id), e))?;

        let saved = load_theme(&tx, &theme.id)?
            .ok_or_else(|| NanningError::not_found("theme", theme.id.as_str()))?;

        tx.commit()
            .map_err(map_db_err!("commit save theme transaction"))?;

        Ok(saved)
    }

    pub fn find_theme(&self, id: &str) -> Result<Option<Theme>> {
        load_theme(&self.conn, id)
    }

    pub fn get_theme(&self, id: &str) -> Result<Theme> {
        self.find_theme(id)?
            .ok_or_else(|| NanningError::not_found("theme", id))
    }

    /// Every theme, most recently updated first
    pub fn list_themes(&self) -> Result<Vec<Theme>> {
        let sql = format!(
            "SELECT {} FROM themes ORDER BY updated_at DESC, rowid DESC",
            THEME_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(map_db_err!("prepare list themes"))?;
        let rows = stmt
            .query_map([], ThemeRow::read)
            .map_err(map_db_err!("list themes"))?;

        let mut themes = Vec::new();
        for row in rows {
            let row = row.map_err(map_db_err!("read theme row"))?;
            themes.push(row.decode()?);
        }
        Ok(themes)
    }

    /// Physically delete a non-preset theme.
    ///
    /// Returns the number of rows removed. A preset (or an unknown id)
    /// yields 0 rather than an error; callers check the count.
    #[tracing::instrument(skip(self))]
    pub fn delete_theme(&self, id: &str) -> Result<usize> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM themes WHERE id = ?1 AND is_preset = 0",
                params![id],
            )
            .map_err(|e| NanningError::storage(format!("delete theme {}", id), e))?;
        if removed == 0 {
            tracing::debug!(id, "theme not deleted (preset or missing)");
        }
        Ok(removed)
    }

    /// Insert the built-in presets that are not already stored. Existing
    /// rows, including customised presets, are left alone.
    pub fn seed_presets(&self) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(map_db_err!("begin seed presets transaction"))?;

        let mut inserted = 0;
        for preset in presets::builtin() {
            let encoded = EncodedTheme::new(&preset)?;
            let stamp = format_timestamp(self.clock.now());
            inserted += tx
                .execute(
                    "INSERT OR IGNORE INTO themes (id, name, mode, gradient, colors, glass, is_preset, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)",
                    params![
                        &preset.id,
                        &preset.name,
                        preset.mode.as_str(),
                        &encoded.gradient,
                        &encoded.colors,
                        &encoded.glass,
                        &stamp,
                    ],
                )
                .map_err(|e| NanningError::storage(format!("seed preset {}", preset.id), e))?;
        }

        tx.commit()
            .map_err(map_db_err!("commit seed presets transaction"))?;

        if inserted > 0 {
            tracing::info!(inserted, "seeded theme presets");
        }
        Ok(inserted)
    }
}

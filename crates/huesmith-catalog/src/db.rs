use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use huesmith_core::SeedPalette;
use rusqlite::{Connection, params};
use tracing::info;

use crate::models::{PaletteColors, PaletteId, PaletteRecord};

/// SQLite-backed store of saved palettes, ordered newest first.
pub struct PaletteStore {
    conn: Connection,
}

impl PaletteStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open palette store")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        info!("running palette store migrations");
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS palettes (
                id          INTEGER PRIMARY KEY,
                saved_at    TEXT NOT NULL DEFAULT (datetime('now', 'localtime')),
                primary_hex TEXT NOT NULL,
                neutral_hex TEXT NOT NULL,
                accent_hex  TEXT NOT NULL,
                success_hex TEXT NOT NULL,
                warning_hex TEXT NOT NULL,
                error_hex   TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Save a palette snapshot with the current time as its id.
    pub fn save(&self, palette: &SeedPalette) -> Result<PaletteRecord> {
        let id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before epoch")?
            .as_millis() as i64;
        self.save_with_id(palette, id)
    }

    /// Save with an explicit millisecond-timestamp id. Re-saving the same id
    /// replaces the snapshot.
    pub fn save_with_id(&self, palette: &SeedPalette, id: PaletteId) -> Result<PaletteRecord> {
        let colors = PaletteColors::from_palette(palette);
        self.conn.execute(
            "INSERT OR REPLACE INTO palettes (
                id, primary_hex, neutral_hex, accent_hex,
                success_hex, warning_hex, error_hex
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                colors.primary,
                colors.neutral,
                colors.accent,
                colors.success,
                colors.warning,
                colors.error,
            ],
        )?;
        info!(id, "saved palette");
        self.get(id)?
            .context("saved palette record missing after insert")
    }

    pub fn get(&self, id: PaletteId) -> Result<Option<PaletteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, saved_at, primary_hex, neutral_hex, accent_hex,
                    success_hex, warning_hex, error_hex
             FROM palettes WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_record)?;
        Ok(rows.next().transpose()?)
    }

    /// All saved palettes, newest first.
    pub fn list(&self) -> Result<Vec<PaletteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, saved_at, primary_hex, neutral_hex, accent_hex,
                    success_hex, warning_hex, error_hex
             FROM palettes ORDER BY id DESC",
        )?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Delete a saved palette, returning whether it existed.
    pub fn delete(&self, id: PaletteId) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM palettes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM palettes", [], |row| row.get(0))?)
    }

    /// Export the full list (newest first) as a JSON array.
    pub fn export_json(&self) -> Result<String> {
        let records = self.list()?;
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Import records from a JSON array, preserving their ids.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let records: Vec<PaletteRecord> =
            serde_json::from_str(json).context("malformed palette export")?;
        let mut imported = 0;
        for record in &records {
            let palette = record
                .colors
                .to_palette()
                .with_context(|| format!("palette {} has malformed colors", record.id))?;
            self.save_with_id(&palette, record.id)?;
            imported += 1;
        }
        info!(imported, "imported palettes");
        Ok(imported)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PaletteRecord> {
    Ok(PaletteRecord {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        colors: PaletteColors {
            primary: row.get(2)?,
            neutral: row.get(3)?,
            accent: row.get(4)?,
            success: row.get(5)?,
            warning: row.get(6)?,
            error: row.get(7)?,
        },
    })
}

// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use mathcards_core::error::Fallible;
use mathcards_core::types::settings::WorksheetSettings;
use rusqlite::Connection;
use rusqlite::params;

/// The name of the database file inside the working directory.
pub const DATABASE_FILE: &str = "mathcards.db";

/// Persists worksheet settings as key/value pairs.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path`.
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Fallible<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Load settings, starting from the defaults and overlaying whatever is
    /// stored. Values that fail to parse or are out of range are skipped.
    pub fn load_settings(&self) -> Fallible<WorksheetSettings> {
        let mut settings = WorksheetSettings::default();
        let mut stmt = self.conn.prepare("SELECT key, value FROM settings")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            let mut candidate = settings;
            match candidate.set_entry(&key, &value).and_then(|_| candidate.validate()) {
                Ok(()) => settings = candidate,
                Err(e) => {
                    log::warn!("Ignoring stored setting {key}={value:?}: {}", e.message());
                }
            }
        }
        Ok(settings.normalize())
    }

    pub fn save_settings(&mut self, settings: &WorksheetSettings) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in settings.entries() {
            tx.execute(
                r#"
                INSERT INTO settings(key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;
        log::debug!("Saved settings");
        Ok(())
    }

    /// Forget all stored settings. Returns the number of keys removed.
    pub fn reset_settings(&mut self) -> Fallible<usize> {
        let deleted = self.conn.execute("DELETE FROM settings", [])?;
        Ok(deleted)
    }

    #[cfg(test)]
    fn put_raw(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mathcards_core::types::operator::Operator;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_database_has_defaults() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.load_settings()?, WorksheetSettings::default());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let settings = WorksheetSettings {
            rows: 5,
            cols: 6,
            digits: 3,
            font_size: 12,
            operator: Operator::Subtract,
            avoid_carrying: false,
            avoid_borrowing: true,
        };
        db.save_settings(&settings)?;
        assert_eq!(db.load_settings()?, settings);

        // Saving again overwrites.
        let settings = WorksheetSettings {
            operator: Operator::Multiply,
            avoid_borrowing: false,
            ..settings
        };
        db.save_settings(&settings)?;
        assert_eq!(db.load_settings()?, settings);
        Ok(())
    }

    #[test]
    fn test_bad_values_are_skipped() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.put_raw("rows", "lots")?;
        db.put_raw("cols", "7")?;
        db.put_raw("digits", "0")?;
        db.put_raw("theme", "dark")?;
        let settings = db.load_settings()?;
        assert_eq!(settings.rows, 10);
        assert_eq!(settings.cols, 7);
        assert_eq!(settings.digits, 4);
        Ok(())
    }

    #[test]
    fn test_infeasible_stored_pair_is_not_loaded() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.put_raw("digits", "8")?;
        db.put_raw("operator", "÷")?;
        let settings = db.load_settings()?;
        settings.validate()?;
        assert!(!(settings.digits == 8 && settings.operator == Operator::Divide));
        Ok(())
    }

    #[test]
    fn test_loaded_settings_are_normalized() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.put_raw("operator", "×")?;
        db.put_raw("avoid_carrying", "true")?;
        let settings = db.load_settings()?;
        assert_eq!(settings.operator, Operator::Multiply);
        assert!(!settings.avoid_carrying);
        Ok(())
    }

    #[test]
    fn test_reset() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        db.save_settings(&WorksheetSettings {
            rows: 2,
            ..Default::default()
        })?;
        assert_eq!(db.reset_settings()?, WorksheetSettings::KEYS.len());
        assert_eq!(db.load_settings()?, WorksheetSettings::default());
        Ok(())
    }

    #[test]
    fn test_persists_across_connections() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DATABASE_FILE);
        let settings = WorksheetSettings {
            digits: 2,
            operator: Operator::Divide,
            ..Default::default()
        };
        {
            let mut db = Database::new(&path)?;
            db.save_settings(&settings)?;
        }
        let db = Database::new(&path)?;
        assert_eq!(db.load_settings()?, settings);
        Ok(())
    }
}

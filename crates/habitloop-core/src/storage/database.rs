//! SQLite-backed habit storage.
//!
//! Provides persistent storage for:
//! - Habit documents, keyed by habit id
//! - The single user identity document

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::{data_dir, migrations, HabitStore};
use crate::error::{CoreError, DatabaseError, Result};
use crate::habit::{CompletionMap, Habit};
use crate::identity::UserIdentity;

const IDENTITY_KEY: &str = "current";

/// SQLite database holding habit and identity documents.
pub struct Database {
    conn: Connection,
}

fn decode<T: serde::de::DeserializeOwned>(id: &str, document: &str) -> Result<T> {
    serde_json::from_str(document).map_err(|e| {
        DatabaseError::CorruptDocument {
            id: id.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/habitloop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("habitloop.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn get_habit(&self, id: &str) -> Result<Option<Habit>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM habits WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        document.map(|doc| decode(id, &doc)).transpose()
    }
}

impl HabitStore for Database {
    fn fetch_all(&self) -> Result<Vec<Habit>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, document FROM habits ORDER BY created_at, id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut habits = Vec::new();
        for row in rows {
            let (id, document) = row?;
            habits.push(decode(&id, &document)?);
        }
        Ok(habits)
    }

    fn create(&self, habit: &Habit) -> Result<()> {
        let document = serde_json::to_string(habit)?;
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO habits (id, document, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![habit.id, document, habit.created_at.to_rfc3339(), now],
            )
            .map_err(|e| match DatabaseError::from(e) {
                DatabaseError::Duplicate(_) => DatabaseError::Duplicate(habit.id.clone()),
                other => other,
            })?;
        info!(habit = %habit.id, name = %habit.name, "habit created");
        Ok(())
    }

    fn upsert(&self, habit: &Habit) -> Result<()> {
        let document = serde_json::to_string(habit)?;
        self.conn.execute(
            "INSERT INTO habits (id, document, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at",
            params![
                habit.id,
                document,
                habit.created_at.to_rfc3339(),
                Utc::now().to_rfc3339()
            ],
        )?;
        info!(habit = %habit.id, streak = habit.streak, "habit saved");
        Ok(())
    }

    fn reset_streak(&self, habit_id: &str) -> Result<()> {
        let mut habit = self
            .get_habit(habit_id)?
            .ok_or_else(|| CoreError::habit_not_found(habit_id))?;
        habit.streak = 0;
        habit.completions = CompletionMap::new();
        self.upsert(&habit)
    }

    fn load_identity(&self) -> Result<Option<UserIdentity>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM identity WHERE id = ?1",
                params![IDENTITY_KEY],
                |row| row.get(0),
            )
            .optional()?;
        document.map(|doc| decode(IDENTITY_KEY, &doc)).transpose()
    }

    fn save_identity(&self, identity: &UserIdentity) -> Result<()> {
        let document = serde_json::to_string(identity)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO identity (id, document, updated_at) VALUES (?1, ?2, ?3)",
            params![IDENTITY_KEY, document, Utc::now().to_rfc3339()],
        )?;
        info!(score = identity.current_score, "identity saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::NewHabit;
    use chrono::NaiveDate;

    fn habit(name: &str) -> Habit {
        Habit::from_new(NewHabit::named(name), Utc::now()).unwrap()
    }

    #[test]
    fn create_and_fetch() {
        let db = Database::open_memory().unwrap();
        let h = habit("Stretch");
        db.create(&h).unwrap();
        let all = db.fetch_all().unwrap();
        assert_eq!(all, vec![h]);
    }

    #[test]
    fn create_twice_is_rejected() {
        let db = Database::open_memory().unwrap();
        let h = habit("Stretch");
        db.create(&h).unwrap();
        let err = db.create(&h).unwrap_err();
        assert!(matches!(err, CoreError::Database(DatabaseError::Duplicate(id)) if id == h.id));
    }

    #[test]
    fn upsert_replaces_document() {
        let db = Database::open_memory().unwrap();
        let mut h = habit("Stretch");
        db.upsert(&h).unwrap();
        h.streak = 3;
        db.upsert(&h).unwrap();
        assert_eq!(db.fetch_all().unwrap().len(), 1);
        assert_eq!(db.get_habit(&h.id).unwrap().unwrap().streak, 3);
    }

    #[test]
    fn reset_streak_clears_completions() {
        let db = Database::open_memory().unwrap();
        let mut h = habit("Stretch");
        h.completions
            .set(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), true);
        h.streak = 1;
        db.create(&h).unwrap();
        db.reset_streak(&h.id).unwrap();
        let stored = db.get_habit(&h.id).unwrap().unwrap();
        assert_eq!(stored.streak, 0);
        assert!(stored.completions.is_empty());
    }

    #[test]
    fn reset_unknown_habit_fails() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.reset_streak("missing"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn identity_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_identity().unwrap().is_none());
        let identity = UserIdentity::new("runner", vec!["a".into()], Utc::now()).unwrap();
        db.save_identity(&identity).unwrap();
        assert_eq!(db.load_identity().unwrap(), Some(identity));
    }

    #[test]
    fn corrupt_document_is_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO habits (id, document, created_at, updated_at) VALUES ('x', 'nope', '', '')",
                [],
            )
            .unwrap();
        assert!(matches!(
            db.fetch_all(),
            Err(CoreError::Database(DatabaseError::CorruptDocument { .. }))
        ));
    }
}

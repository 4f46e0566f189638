use crate::Database;
use crate::models::{MessageRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, created_at: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
                (id, username, created_at),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        id: &str,
        sender: &str,
        receiver: &str,
        encrypted_content: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, sender, receiver, encrypted_content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, sender, receiver, encrypted_content, created_at],
            )?;
            Ok(())
        })
    }

    /// All messages sent or received by `identity`, oldest first.
    /// Ties on `created_at` break by insertion order (rowid) so repeated
    /// fetches return a stable sequence.
    pub fn get_messages_for(&self, identity: &str, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages_for(conn, identity, limit))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_messages_for(conn: &Connection, identity: &str, limit: u32) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender, receiver, encrypted_content, created_at
         FROM messages
         WHERE sender = ?1 OR receiver = ?1
         ORDER BY created_at ASC, rowid ASC
         LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![identity, limit], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                sender: row.get(1)?,
                receiver: row.get(2)?,
                encrypted_content: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id                  TEXT PRIMARY KEY,
            sender              TEXT NOT NULL,
            receiver            TEXT NOT NULL,
            encrypted_content   TEXT NOT NULL,
            created_at          TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_sender
            ON messages(sender, created_at);

        CREATE INDEX IF NOT EXISTS idx_messages_receiver
            ON messages(receiver, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}

/// Database row types — these map directly to SQLite rows.
/// Distinct from the courier-types API models to keep the DB layer
/// independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub encrypted_content: String,
    pub created_at: String,
}

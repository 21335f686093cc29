//! Raw blob access over the `kv_blob` table.
//!
//! Each named store is one row; a write replaces the whole payload in a
//! single statement, so readers never observe a half-written blob.

use std::error::Error;
use std::fmt;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DbError;

pub type KvResult<T> = Result<T, KvError>;

/// Failure in the blob layer.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
}

impl fmt::Display for KvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvError::Db(err) => write!(f, "blob store error: {err}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            KvError::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for KvError {
    fn from(err: DbError) -> Self {
        KvError::Db(err)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(err: rusqlite::Error) -> Self {
        KvError::Db(DbError::Sqlite(err))
    }
}

/// Read and write whole serialized payloads by store name.
pub trait BlobStore {
    /// Returns the payload for `store`, or `None` when the row is absent.
    fn read_blob(&self, store: &str) -> KvResult<Option<String>>;

    /// Replaces the payload for `store`, creating the row when missing.
    fn write_blob(&self, store: &str, payload: &str) -> KvResult<()>;
}

/// SQLite-backed `BlobStore` borrowing an open connection.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn read_blob(&self, store: &str) -> KvResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM kv_blob WHERE store = ?1;",
                params![store],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_blob(&self, store: &str, payload: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_blob (store, payload, updated_at)
             VALUES (?1, ?2, strftime('%s','now') * 1000)
             ON CONFLICT(store) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at;",
            params![store, payload],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobStore, SqliteBlobStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn read_returns_none_for_missing_store() {
        let conn = open_db_in_memory().unwrap();
        let blobs = SqliteBlobStore::new(&conn);
        assert_eq!(blobs.read_blob("missing").unwrap(), None);
    }

    #[test]
    fn write_then_read_round_trips_and_overwrites() {
        let conn = open_db_in_memory().unwrap();
        let blobs = SqliteBlobStore::new(&conn);

        blobs.write_blob("diaryEntries", "{}").unwrap();
        assert_eq!(blobs.read_blob("diaryEntries").unwrap().as_deref(), Some("{}"));

        blobs.write_blob("diaryEntries", r#"{"2024-01-01":{}}"#).unwrap();
        assert_eq!(
            blobs.read_blob("diaryEntries").unwrap().as_deref(),
            Some(r#"{"2024-01-01":{}}"#)
        );
    }
}

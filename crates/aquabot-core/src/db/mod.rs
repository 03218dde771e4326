//! SQLite-backed key-value storage.
//!
//! This module provides the synchronous database layer behind
//! [`crate::store::SqliteStore`]. It owns the connection, schema setup, and
//! the handful of queries a string key-value store needs.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod kv_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Creates the tables from the embedded schema if they do not exist.
    fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute_batch(include_str!("../../assets/schema.sql"))
            .db_context("Failed to initialize database schema")
    }
}

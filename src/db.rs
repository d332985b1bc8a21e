//! Opening and preparing the store that holds the expense collection.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table};

/// The value for [StoreConfig::url] that selects a throwaway in-memory store.
pub const IN_MEMORY_STORE: &str = ":memory:";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The directory holding the database files, or [IN_MEMORY_STORE].
    pub url: String,
    /// The name of the database, used as the file stem.
    pub database_name: String,
}

impl StoreConfig {
    /// The file the database is stored in, or `None` for an in-memory store.
    ///
    /// # Errors
    /// Returns [Error::Config] if either value is blank.
    pub fn database_path(&self) -> Result<Option<PathBuf>, Error> {
        if self.url.trim().is_empty() {
            return Err(Error::Config("the store URL must be set".to_owned()));
        }

        if self.database_name.trim().is_empty() {
            return Err(Error::Config("the database name must be set".to_owned()));
        }

        if self.url == IN_MEMORY_STORE {
            return Ok(None);
        }

        Ok(Some(
            PathBuf::from(&self.url).join(format!("{}.db", self.database_name)),
        ))
    }
}

/// Open a connection to the store described by `config`.
///
/// # Errors
/// Returns an error if the configuration is incomplete or the database file
/// cannot be opened.
pub fn open_connection(config: &StoreConfig) -> Result<Connection, Error> {
    let connection = match config.database_path()? {
        Some(path) => {
            tracing::info!("Opening database at {}", path.display());
            Connection::open(path)?
        }
        None => {
            tracing::info!("Opening in-memory database \"{}\"", config.database_name);
            Connection::open_in_memory()?
        }
    };

    Ok(connection)
}

/// Create the expense collection and its indexes if they do not exist.
///
/// Safe to call on every startup.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

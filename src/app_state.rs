//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, classify::SharedClassifier, db::initialize};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The zero-shot classifier used for category suggestions, if one was
    /// configured at startup. Loaded once at boot and shared read-only across
    /// requests; there is no reload.
    pub classifier: Option<SharedClassifier>,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expenses table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        classifier: Option<SharedClassifier>,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            classifier,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

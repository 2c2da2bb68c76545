use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Executor, QueryBuilder, Sqlite,
};

use crate::{
    birthdays,
    config::Config,
    error::{StoreError, StoreResult},
    models::{Contact, CreateContact, UpdateContact},
    schema::{CONTACT_COLUMNS, SCHEMA},
};

/// Data access for the `contacts` table.
///
/// Cloning is cheap: clones share one connection pool. Every operation checks
/// out its own connection and hands it back when the call returns.
#[derive(Clone)]
pub struct ContactStore {
    pool: SqlitePool,
}

impl ContactStore {
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool).await?;
        tracing::info!("Database initialized at: {}", config.database_url);
        Ok(store)
    }

    /// A private in-memory database. The pool is pinned to one connection that
    /// never expires, since each SQLite memory connection is its own database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        pool.execute(SCHEMA).await?;
        Ok(Self { pool })
    }

    pub async fn create(&self, input: CreateContact) -> StoreResult<Contact> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!(
            "INSERT INTO contacts
                 (first_name, last_name, email, phone_number, birthday, additional_data)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(input.first_name)
            .bind(input.last_name)
            .bind(input.email)
            .bind(input.phone_number)
            .bind(input.birthday)
            .bind(input.additional_data)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(id = contact.id, "contact created");
        Ok(contact)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Contact> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?");
        sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Contacts whose first name, last name or email contains `query`.
    ///
    /// Matching uses SQLite `LIKE`, so it is case-insensitive for ASCII.
    /// Wildcard characters in `query` match themselves.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Contact>> {
        let mut conn = self.pool.acquire().await?;

        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            r"SELECT {CONTACT_COLUMNS} FROM contacts
              WHERE first_name LIKE ? ESCAPE '\'
                 OR last_name LIKE ? ESCAPE '\'
                 OR email LIKE ? ESCAPE '\'
              ORDER BY id"
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(query, matches = contacts.len(), "contact search");
        Ok(contacts)
    }

    /// Writes only the fields present in `changes`. An empty change set
    /// returns the current row untouched.
    pub async fn update(&self, id: i64, changes: UpdateContact) -> StoreResult<Contact> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut conn = self.pool.acquire().await?;

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE contacts SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(first_name) = changes.first_name {
                set.push("first_name = ").push_bind_unseparated(first_name);
            }
            if let Some(last_name) = changes.last_name {
                set.push("last_name = ").push_bind_unseparated(last_name);
            }
            if let Some(email) = changes.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(phone_number) = changes.phone_number {
                set.push("phone_number = ").push_bind_unseparated(phone_number);
            }
            if let Some(birthday) = changes.birthday {
                set.push("birthday = ").push_bind_unseparated(birthday);
            }
            if let Some(additional_data) = changes.additional_data {
                set.push("additional_data = ").push_bind_unseparated(additional_data);
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(CONTACT_COLUMNS);

        let contact = builder
            .build_query_as::<Contact>()
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(StoreError::NotFound)?;

        tracing::debug!(id, "contact updated");
        Ok(contact)
    }

    /// Removes the row and returns it as it was just before deletion.
    pub async fn delete(&self, id: i64) -> StoreResult<Contact> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("DELETE FROM contacts WHERE id = ? RETURNING {CONTACT_COLUMNS}");
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(StoreError::NotFound)?;

        tracing::debug!(id, "contact deleted");
        Ok(contact)
    }

    /// Contacts with a birthday anniversary in `[today, today + 7 days]`,
    /// soonest first.
    pub async fn upcoming(&self, today: NaiveDate) -> StoreResult<Vec<Contact>> {
        let mut conn = self.pool.acquire().await?;

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder
            .push(CONTACT_COLUMNS)
            .push(" FROM contacts WHERE substr(birthday, -5) IN (");
        {
            let mut keys = builder.separated(", ");
            for key in birthdays::window_keys(today) {
                keys.push_bind(key);
            }
        }
        builder.push(")");

        let mut contacts = builder
            .build_query_as::<Contact>()
            .fetch_all(&mut *conn)
            .await?;
        debug_assert!(contacts.iter().all(|c| birthdays::is_upcoming(c.birthday, today)));
        contacts.sort_by_key(|c| (birthdays::next_anniversary(c.birthday, today), c.id));

        tracing::debug!(%today, matches = contacts.len(), "upcoming birthdays");
        Ok(contacts)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

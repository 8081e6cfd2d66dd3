//! Repository for account documents

use async_trait::async_trait;
use common::db::{init_db_pool, run_migrations};
use common::decimal::parse_amount;
use common::error::{Error, Result};
use common::model::account::{Account, AccountUpdate};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, info};

use crate::config::AccountServiceConfig;

/// Storage backend selector
#[derive(Debug, Clone)]
pub enum StoreType {
    /// In-memory store
    InMemory,
    /// PostgreSQL store; falls back to `DATABASE_URL` when no URL is given
    Postgres(Option<String>),
}

/// Account document store keyed by username.
///
/// Each call is an independent read or write; nothing here spans calls.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether an account with this username exists
    async fn exists(&self, username: &str) -> Result<bool>;

    /// Fetch an account by username
    async fn find(&self, username: &str) -> Result<Option<Account>>;

    /// Insert a new account; fails with `UsernameTaken` on a duplicate
    async fn insert(&self, account: Account) -> Result<()>;

    /// Overwrite the given fields of an existing account
    async fn update(&self, username: &str, update: AccountUpdate) -> Result<()>;
}

/// In-memory store for account documents
pub struct InMemoryUserStore {
    /// Accounts by username
    pub accounts: DashMap<String, Account>,
}

impl InMemoryUserStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.accounts.contains_key(username))
    }

    async fn find(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get(username).map(|a| a.clone()))
    }

    async fn insert(&self, account: Account) -> Result<()> {
        match self.accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(Error::UsernameTaken(account.username)),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    async fn update(&self, username: &str, update: AccountUpdate) -> Result<()> {
        let mut account = self
            .accounts
            .get_mut(username)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))?;

        update.apply(&mut *account);
        Ok(())
    }
}

/// PostgreSQL store for account documents
pub struct PostgresUserStore {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresUserStore {
    /// Connect to PostgreSQL; `None` reads `DATABASE_URL`
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
        };

        let pool = init_db_pool(&database_url, 5).await?;
        Ok(Self { pool })
    }

    /// Connect using a service configuration, running migrations if enabled
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", config.db_pool_size);

        let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
        if config.run_migrations {
            run_migrations(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &PgRow) -> Result<Account> {
        let balance: String = row.try_get("balance")?;
        let debt: String = row.try_get("debt")?;

        Ok(Account {
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            balance: parse_amount(&balance)
                .map_err(|e| Error::DecimalError(format!("Invalid balance format: {}", e)))?,
            debt: parse_amount(&debt)
                .map_err(|e| Error::DecimalError(format!("Invalid debt format: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn exists(&self, username: &str) -> Result<bool> {
        debug!("Checking account exists: {}", username);

        let row = sqlx::query("SELECT 1 FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn find(&self, username: &str) -> Result<Option<Account>> {
        debug!("Getting account from database: {}", username);

        let row = sqlx::query(
            "SELECT username, password_hash, balance, debt FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::account_from_row).transpose()
    }

    async fn insert(&self, account: Account) -> Result<()> {
        debug!("Inserting account into database: {}", account.username);

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, balance, debt) VALUES ($1, $2, $3, $4)",
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.balance.to_string())
        .bind(account.debt.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::UsernameTaken(account.username))
            }
            Err(e) => Err(Error::Database(e)),
        }
    }

    async fn update(&self, username: &str, update: AccountUpdate) -> Result<()> {
        debug!("Updating account in database: {}", username);

        let result = sqlx::query(
            "UPDATE users
             SET balance = COALESCE($2, balance),
                 debt = COALESCE($3, debt)
             WHERE username = $1",
        )
        .bind(username)
        .bind(update.balance.map(|b| b.to_string()))
        .bind(update.debt.map(|d| d.to_string()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::AccountNotFound(username.to_string()));
        }

        Ok(())
    }
}

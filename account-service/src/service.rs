//! Account service implementation
//!
//! Every operation except registration first passes the credential gate, then
//! performs its reads followed by independent single-field writes against the
//! injected [`UserStore`]. No write is wrapped in a transaction: concurrent
//! requests on one account can lose updates, and a failure between two writes
//! leaves the ledger unbalanced.

use std::sync::Arc;

use common::decimal::{checked_add, checked_sub, Amount};
use common::error::{Error, ErrorExt, Result};
use common::model::account::{Account, AccountUpdate, AccountView, BANK_ACCOUNT, TRANSACTION_FEE};
use tracing::{debug, info, warn};

use crate::config::AccountServiceConfig;
use crate::password::{hash_password, random_password, verify_password};
use crate::repository::{InMemoryUserStore, PostgresUserStore, StoreType, UserStore};

/// Length of the generated BANK password when none is configured
const GENERATED_BANK_PASSWORD_LEN: usize = 32;

/// Account service for registration, deposits, transfers and loans
pub struct AccountService {
    /// Store holding account documents
    store: Arc<dyn UserStore>,
}

impl AccountService {
    /// Create a new account service backed by an empty in-memory store
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryUserStore::new()),
        }
    }

    /// Create an account service over an existing store
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a new account service with a specific store type
    pub async fn with_store_type(store_type: StoreType) -> Result<Self> {
        let store: Arc<dyn UserStore> = match store_type {
            StoreType::InMemory => Arc::new(InMemoryUserStore::new()),
            StoreType::Postgres(database_url) => Arc::new(PostgresUserStore::new(database_url).await?),
        };

        Ok(Self { store })
    }

    /// Create a new account service with a configuration
    pub async fn with_config(config: &AccountServiceConfig) -> Result<Self> {
        let store: Arc<dyn UserStore> = Arc::new(PostgresUserStore::with_config(config).await?);

        Ok(Self { store })
    }

    /// Create the BANK fee account if it does not exist yet.
    ///
    /// Returns `true` when the account was created by this call.
    pub async fn ensure_bank_account(&self, password: Option<&str>) -> Result<bool> {
        if self.store.exists(BANK_ACCOUNT).await? {
            debug!("BANK account already present");
            return Ok(false);
        }

        let password_hash = match password {
            Some(pw) => hash_password(pw)?,
            None => hash_password(&random_password(GENERATED_BANK_PASSWORD_LEN))?,
        };

        match self.store.insert(Account::new(BANK_ACCOUNT, password_hash)).await {
            Ok(()) => {
                info!("Bootstrapped BANK account");
                Ok(true)
            }
            // Another instance won the race
            Err(Error::UsernameTaken(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Register a new user with zero balance and debt
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        if self.store.exists(username).await? {
            warn!("Registration rejected, username taken: {}", username);
            return Err(Error::UsernameTaken(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        self.store.insert(Account::new(username, password_hash)).await?;

        info!("Registered account {}", username);
        Ok(())
    }

    /// Credential gate: the account must exist and the password must verify
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Account> {
        let account = match self.store.find(username).await? {
            Some(account) => account,
            None => {
                warn!("Unknown username: {}", username);
                return Err(Error::UnknownUser(username.to_string()));
            }
        };

        let verified = verify_password(password, &account.password_hash)
            .with_context(|| format!("Failed to verify password for {}", username))?;

        if !verified {
            warn!("Incorrect password for {}", username);
            return Err(Error::IncorrectPassword(username.to_string()));
        }

        Ok(account)
    }

    /// Deposit `amount`, of which the transaction fee goes to BANK
    pub async fn add(&self, username: &str, password: &str, amount: Amount) -> Result<()> {
        let account = self.verify_credentials(username, password).await?;

        if amount <= Amount::ZERO {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        let credited = checked_sub(amount, TRANSACTION_FEE)?;
        let bank_cash = self.balance_of(BANK_ACCOUNT).await?;

        let new_bank = checked_add(bank_cash, TRANSACTION_FEE)?;
        let new_cash = checked_add(account.balance, credited)?;

        self.set_balance(BANK_ACCOUNT, new_bank).await?;
        self.set_balance(username, new_cash).await?;

        info!("Added {} to {} (fee {})", credited, username, TRANSACTION_FEE);
        Ok(())
    }

    /// Move money to `destination`.
    ///
    /// The sender is debited the full `amount` while the destination receives
    /// `amount - fee` and BANK the fee. Only a non-positive sender balance is
    /// rejected; `amount` itself is not checked against the balance.
    pub async fn transfer(
        &self,
        username: &str,
        password: &str,
        destination: &str,
        amount: Amount,
    ) -> Result<()> {
        let sender = self.verify_credentials(username, password).await?;

        if !self.store.exists(destination).await? {
            warn!("Transfer from {} to unknown account {}", username, destination);
            return Err(Error::UnknownDestination(destination.to_string()));
        }

        let sender_cash = sender.balance;
        if sender_cash <= Amount::ZERO {
            return Err(Error::NoFundsToTransfer(username.to_string()));
        }

        let receiver_cash = self.balance_of(destination).await?;
        let bank_cash = self.balance_of(BANK_ACCOUNT).await?;

        let new_bank = checked_add(bank_cash, TRANSACTION_FEE)?;
        let new_receiver = checked_sub(checked_add(receiver_cash, amount)?, TRANSACTION_FEE)?;
        let new_sender = checked_sub(sender_cash, amount)?;

        self.set_balance(BANK_ACCOUNT, new_bank).await?;
        self.set_balance(destination, new_receiver).await?;
        self.set_balance(username, new_sender).await?;

        info!("Transferred {} from {} to {}", amount, username, destination);
        Ok(())
    }

    /// Current account document without the password hash
    pub async fn balance(&self, username: &str, password: &str) -> Result<AccountView> {
        let account = self.verify_credentials(username, password).await?;
        Ok(account.into())
    }

    /// Issue a loan: balance and debt both grow by `amount`, uncapped
    pub async fn take_loan(&self, username: &str, password: &str, amount: Amount) -> Result<()> {
        let account = self.verify_credentials(username, password).await?;

        let new_balance = checked_add(account.balance, amount)?;
        let new_debt = checked_add(account.debt, amount)?;

        self.set_balance(username, new_balance).await?;
        self.set_debt(username, new_debt).await?;

        info!("Loan of {} issued to {}", amount, username);
        Ok(())
    }

    /// Repay `amount` of debt from the balance; debt may go negative
    pub async fn pay_loan(&self, username: &str, password: &str, amount: Amount) -> Result<()> {
        let account = self.verify_credentials(username, password).await?;

        if account.balance < amount {
            return Err(Error::InsufficientFunds(format!(
                "{} has {} but tried to repay {}",
                username, account.balance, amount
            )));
        }

        let new_balance = checked_sub(account.balance, amount)?;
        let new_debt = checked_sub(account.debt, amount)?;

        self.set_balance(username, new_balance).await?;
        self.set_debt(username, new_debt).await?;

        info!("Loan payment of {} processed for {}", amount, username);
        Ok(())
    }

    /// Look up an account without credentials (operator use only)
    pub async fn get_account(&self, username: &str) -> Result<Option<AccountView>> {
        Ok(self.store.find(username).await?.map(AccountView::from))
    }

    async fn balance_of(&self, username: &str) -> Result<Amount> {
        self.store
            .find(username)
            .await?
            .map(|account| account.balance)
            .ok_or_else(|| Error::AccountNotFound(username.to_string()))
    }

    async fn set_balance(&self, username: &str, balance: Amount) -> Result<()> {
        debug!("Setting balance of {} to {}", username, balance);
        self.store
            .update(username, AccountUpdate::balance(balance))
            .await
            .with_context(|| format!("Failed to update balance of {}", username))
    }

    async fn set_debt(&self, username: &str, debt: Amount) -> Result<()> {
        debug!("Setting debt of {} to {}", username, debt);
        self.store
            .update(username, AccountUpdate::debt(debt))
            .await
            .with_context(|| format!("Failed to update debt of {}", username))
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

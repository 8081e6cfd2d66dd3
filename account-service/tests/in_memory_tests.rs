use account_service::{InMemoryUserStore, UserStore};
use common::decimal::{dec, Amount};
use common::error::Error;
use common::model::account::{Account, AccountUpdate};

#[tokio::test]
async fn test_insert_and_find() {
    let store = InMemoryUserStore::new();
    assert!(store.accounts.is_empty());

    store.insert(Account::new("alice", "hash")).await.unwrap();

    assert!(store.exists("alice").await.unwrap());
    assert!(!store.exists("bob").await.unwrap());

    let found = store.find("alice").await.unwrap().unwrap();
    assert_eq!(found.username, "alice");
    assert_eq!(found.password_hash, "hash");
    assert_eq!(found.balance, Amount::ZERO);
    assert_eq!(found.debt, Amount::ZERO);

    assert!(store.find("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_is_rejected() {
    let store = InMemoryUserStore::new();
    store.insert(Account::new("alice", "first")).await.unwrap();

    let err = store.insert(Account::new("alice", "second")).await.unwrap_err();
    assert!(matches!(err, Error::UsernameTaken(ref name) if name == "alice"));

    // Original document survives
    assert_eq!(store.find("alice").await.unwrap().unwrap().password_hash, "first");
    assert_eq!(store.accounts.len(), 1);
}

#[tokio::test]
async fn test_update_sets_only_named_fields() {
    let store = InMemoryUserStore::new();
    store.insert(Account::new("alice", "hash")).await.unwrap();

    store.update("alice", AccountUpdate::balance(dec!(40))).await.unwrap();
    store.update("alice", AccountUpdate::debt(dec!(-5))).await.unwrap();

    let account = store.find("alice").await.unwrap().unwrap();
    assert_eq!(account.balance, dec!(40));
    assert_eq!(account.debt, dec!(-5));
    assert_eq!(account.password_hash, "hash");
}

#[tokio::test]
async fn test_update_unknown_account_fails() {
    let store = InMemoryUserStore::new();

    let err = store
        .update("ghost", AccountUpdate::balance(dec!(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AccountNotFound(_)));
    assert!(!store.exists("ghost").await.unwrap());
}

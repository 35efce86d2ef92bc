//! Tests for the session store
//!
//! These tests verify the session contracts:
//! - loading flag discipline around every operation
//! - logout idempotence
//! - credential round trips and failure paths
//! - per-request fresh token issuance

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use crate::auth::models::ProfileUpdate;
    use crate::auth::provider::ProviderError;
    use crate::auth::SessionStore;
    use crate::testutil::MockProvider;

    fn store_with_account(email: &str, password: &str) -> (SessionStore, Arc<MockProvider>) {
        let provider = MockProvider::new();
        provider.add_account(email, password, Some("Test User"));
        (SessionStore::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn test_session_starts_loading_until_bootstrap() {
        let provider = MockProvider::new();
        let store = SessionStore::new(provider);
        assert!(store.current().loading);
        assert!(store.current().identity.is_none());

        store.bootstrap(None).await;
        assert!(!store.current().loading);
        assert!(store.current().identity.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_stored_session() {
        let provider = MockProvider::new();
        provider.set_restorable("saved@example.com");
        let store = SessionStore::new(provider.clone());

        store.bootstrap(Some("stored-refresh-token".to_string())).await;

        let session = store.current();
        assert!(!session.loading);
        assert_eq!(session.email(), Some("saved@example.com"));
    }

    #[tokio::test]
    async fn test_bootstrap_with_rejected_token_settles_signed_out() {
        let provider = MockProvider::new();
        provider.fail_refresh.store(true, Ordering::SeqCst);
        let store = SessionStore::new(provider);

        store.bootstrap(Some("revoked-token".to_string())).await;

        let session = store.current();
        assert!(!session.loading);
        assert!(session.identity.is_none());
    }

    #[tokio::test]
    async fn test_login_round_trip_matches_email_case_insensitively() {
        let (store, _) = store_with_account("Borrower@Example.com", "hunter42");
        store.bootstrap(None).await;

        let identity = store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .expect("login should succeed");

        assert!(identity.email.eq_ignore_ascii_case("borrower@example.com"));
        let session = store.current();
        assert!(!session.loading);
        assert!(session
            .email()
            .unwrap()
            .eq_ignore_ascii_case("borrower@example.com"));
    }

    #[tokio::test]
    async fn test_failed_login_resets_loading_and_keeps_signed_out() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;

        let result = store
            .login_with_credentials("borrower@example.com", "wrong")
            .await;

        assert!(matches!(result, Err(ProviderError::InvalidCredentials)));
        let session = store.current();
        assert!(!session.loading, "loading must reset on failure");
        assert!(session.identity.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails_and_resets_loading() {
        let (store, _) = store_with_account("taken@example.com", "pw");
        store.bootstrap(None).await;

        let result = store
            .register_with_credentials("taken@example.com", "newpw")
            .await;

        assert!(matches!(result, Err(ProviderError::EmailInUse)));
        assert!(!store.current().loading);
    }

    #[tokio::test]
    async fn test_loading_is_visible_while_login_in_flight() {
        let (store, provider) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        let gate = provider.gate_logins();

        let store = Arc::new(store);
        let task = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .login_with_credentials("borrower@example.com", "hunter42")
                    .await
            })
        };

        // The flag flips synchronously before the provider call, so it is
        // observable as soon as the task has been polled once.
        let mut spins = 1000;
        while !store.current().loading && spins > 0 {
            tokio::task::yield_now().await;
            spins -= 1;
        }
        assert!(store.current().loading, "in-flight login must report loading");
        assert!(store.current().identity.is_none());

        gate.notify_one();
        task.await.unwrap().expect("gated login should succeed");
        assert!(!store.current().loading);
        assert!(store.current().identity.is_some());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();

        store.logout().await;
        let first = store.current();
        store.logout().await;
        let second = store.current();

        assert!(first.identity.is_none() && !first.loading);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_epoch_bumps_on_identity_changes_only() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        let after_bootstrap = store.epoch();

        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();
        let after_login = store.epoch();
        assert!(after_login > after_bootstrap);

        store
            .update_profile(&ProfileUpdate {
                display_name: Some("Renamed".into()),
                photo_url: None,
            })
            .await
            .unwrap();
        assert_eq!(store.epoch(), after_login, "profile update keeps the epoch");

        store.logout().await;
        assert!(store.epoch() > after_login);
    }

    #[tokio::test]
    async fn test_fresh_token_is_refetched_per_call() {
        let (store, provider) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();

        let first = store.fresh_token().await.unwrap().unwrap();
        let second = store.fresh_token().await.unwrap().unwrap();

        assert_ne!(first, second, "tokens must not be cached between requests");
        assert_eq!(provider.refresh_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fresh_token_signed_out_is_none_without_provider_call() {
        let provider = MockProvider::new();
        let store = SessionStore::new(provider.clone());
        store.bootstrap(None).await;

        assert!(store.fresh_token().await.unwrap().is_none());
        assert_eq!(provider.refresh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_profile_merges_into_identity() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();

        let updated = store
            .update_profile(&ProfileUpdate {
                display_name: Some("New Name".into()),
                photo_url: Some("https://img.example/avatar.png".into()),
            })
            .await
            .unwrap();

        assert_eq!(updated.display_name.as_deref(), Some("New Name"));
        let session = store.current();
        let identity = session.identity.unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("New Name"));
        assert_eq!(
            identity.photo_url.as_deref(),
            Some("https://img.example/avatar.png")
        );
        assert_eq!(identity.email, "borrower@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_signed_out_fails() {
        let provider = MockProvider::new();
        let store = SessionStore::new(provider);
        store.bootstrap(None).await;

        let result = store
            .update_profile(&ProfileUpdate {
                display_name: Some("Nobody".into()),
                photo_url: None,
            })
            .await;

        assert!(matches!(result, Err(ProviderError::NotAuthenticated)));
        assert!(!store.current().loading);
    }

    #[tokio::test]
    async fn test_delete_account_clears_session() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();

        store.delete_account().await.unwrap();

        let session = store.current();
        assert!(session.identity.is_none());
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn test_delete_account_requiring_recent_login_keeps_identity() {
        let (store, provider) = store_with_account("borrower@example.com", "hunter42");
        store.bootstrap(None).await;
        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();
        provider
            .delete_requires_recent_login
            .store(true, Ordering::SeqCst);

        let result = store.delete_account().await;

        assert!(matches!(result, Err(ProviderError::RequiresRecentLogin)));
        let session = store.current();
        assert!(session.identity.is_some(), "failed deletion keeps the session");
        assert!(!session.loading);
    }

    #[tokio::test]
    async fn test_subscribe_observes_state_changes() {
        let (store, _) = store_with_account("borrower@example.com", "hunter42");
        let mut receiver = store.subscribe();
        store.bootstrap(None).await;

        receiver.changed().await.unwrap();
        assert!(!receiver.borrow().loading);

        store
            .login_with_credentials("borrower@example.com", "hunter42")
            .await
            .unwrap();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().identity.is_some());
    }
}

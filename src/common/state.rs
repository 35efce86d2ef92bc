// Application context shared across all modules

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;

use super::config::AppConfig;
use super::error::ClientError;
use super::nav::Navigator;
use super::notify::{Notification, Notifier};
use crate::api::ApiClient;
use crate::applications::{
    admin_stats, borrower_stats, manager_stats, AdminStats, ApplicationClient, ApplicationFilter,
    BorrowerStats, ManagerStats,
};
use crate::auth::{
    FederatedProvider, Identity, IdentityProvider, ProfileUpdate, ProviderError, SessionStore,
};
use crate::guards::{decide, match_route, GuardKind, RouteDecision};
use crate::loans::LoanClient;
use crate::payments::PaymentClient;
use crate::roles::{Role, RoleResolver};
use crate::services::{IdentityToolkitClient, UploadService};
use crate::users::{NewUserRecord, UserClient};

/// Everything the application needs, constructed once at bootstrap and
/// passed by reference. There is no hidden module-level singleton: tests
/// build a context around an in-memory provider and loopback URLs.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub roles: Arc<RoleResolver>,
    pub loans: LoanClient,
    pub applications: ApplicationClient,
    pub users: UserClient,
    pub payments: PaymentClient,
    pub uploads: UploadService,
    pub notifier: Notifier,
    pub navigator: Navigator,
}

/// Receiving halves of the context's event channels; the shell drains them.
pub struct AppStreams {
    pub notifications: UnboundedReceiver<Notification>,
    pub navigations: UnboundedReceiver<String>,
}

impl AppContext {
    /// Builds the production context: HTTP identity provider, shared
    /// request client, session store, resolver, and the domain clients.
    pub fn bootstrap(config: AppConfig) -> (Self, AppStreams) {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        let provider = Arc::new(IdentityToolkitClient::new(http.clone(), &config));
        Self::with_provider(config, provider, http)
    }

    /// Builds a context around an explicit provider implementation (test
    /// doubles, alternate hosts).
    pub fn with_provider(
        config: AppConfig,
        provider: Arc<dyn IdentityProvider>,
        http: Client,
    ) -> (Self, AppStreams) {
        let (notifier, notifications) = Notifier::channel();
        let (navigator, navigations) = Navigator::channel();

        let session = Arc::new(SessionStore::new(provider));
        let api = Arc::new(ApiClient::new(
            http.clone(),
            config.api_base_url.clone(),
            session.clone(),
            navigator.clone(),
            notifier.clone(),
        ));
        let roles = Arc::new(RoleResolver::new(api.clone(), session.clone()));
        let uploads = UploadService::new(http, &config);

        let context = Self {
            loans: LoanClient::new(api.clone()),
            applications: ApplicationClient::new(api.clone()),
            users: UserClient::new(api.clone()),
            payments: PaymentClient::new(api.clone()),
            uploads,
            config,
            session,
            api,
            roles,
            notifier,
            navigator,
        };
        let streams = AppStreams {
            notifications,
            navigations,
        };
        (context, streams)
    }

    /// Evaluates the guard for `path` against the current session. Role-gated
    /// routes resolve the role first, so the returned decision is final for
    /// the current state rather than a transient loading answer.
    pub async fn navigate(&self, path: &str) -> RouteDecision {
        let entry = match match_route(path) {
            Some(entry) => entry,
            None => return RouteDecision::NotFound,
        };
        let role = match entry.guard {
            GuardKind::Admin | GuardKind::Manager => self.roles.resolve().await,
            _ => self.roles.role_state(),
        };
        decide(entry.guard, &self.session.current(), &role)
    }

    /// Full registration flow: provider account, optional avatar upload,
    /// profile update, then the backend user record. Requesting the manager
    /// role leaves the backend record pending admin approval.
    pub async fn register_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        avatar: Option<(String, Vec<u8>)>,
        requested_role: Role,
    ) -> Result<Identity, ClientError> {
        self.session
            .register_with_credentials(email, password)
            .await?;

        let photo_url = match avatar {
            Some((filename, bytes)) => Some(self.uploads.upload_image(&filename, bytes).await?),
            None => None,
        };

        let update = ProfileUpdate {
            display_name: Some(display_name.to_string()),
            photo_url,
        };
        let identity = self.session.update_profile(&update).await?;

        self.users
            .create(&NewUserRecord::from_identity(&identity, requested_role))
            .await?;
        Ok(identity)
    }

    /// Federated sign-in; `first_visit` additionally saves the backend user
    /// record, as the register page does.
    pub async fn federated_sign_in(
        &self,
        provider: FederatedProvider,
        oauth_token: &str,
        first_visit: bool,
    ) -> Result<Identity, ClientError> {
        let identity = self
            .session
            .login_with_federated_provider(provider, oauth_token)
            .await?;
        if first_visit {
            self.users
                .create(&NewUserRecord::from_identity(&identity, Role::User))
                .await?;
        }
        Ok(identity)
    }

    /// Borrower dashboard data: the signed-in user's applications, reduced.
    pub async fn borrower_overview(&self) -> Result<BorrowerStats, ClientError> {
        let email = self
            .session
            .current()
            .email()
            .map(str::to_string)
            .ok_or(ClientError::Provider(ProviderError::NotAuthenticated))?;
        let applications = self
            .applications
            .list(&ApplicationFilter::for_email(&email))
            .await?;
        Ok(borrower_stats(&applications))
    }

    /// Manager dashboard data: the full application pipeline, reduced.
    pub async fn manager_overview(&self) -> Result<ManagerStats, ClientError> {
        let applications = self.applications.list_all().await?;
        Ok(manager_stats(&applications))
    }

    /// Admin dashboard data: users, products, and applications fetched
    /// concurrently, then reduced.
    pub async fn admin_overview(&self) -> Result<AdminStats, ClientError> {
        let (users, loans, applications) = futures::try_join!(
            self.users.list(),
            self.loans.list_all(),
            self.applications.list_all(),
        )?;
        Ok(admin_stats(&users, &loans, &applications))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::guards::RouteDecision;
    use crate::roles::Role;
    use crate::testutil::{spawn_backend, test_context, MockProvider};

    fn stub_router(captured_user: Arc<Mutex<Option<Value>>>) -> Router {
        Router::new()
            .route(
                "/users/role/:email",
                get(|axum::extract::Path(email): axum::extract::Path<String>| async move {
                    let role = if email.starts_with("admin") {
                        "admin"
                    } else {
                        "user"
                    };
                    Json(json!({ "role": role }))
                }),
            )
            .route(
                "/users",
                post(
                    |State(captured): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                        *captured.lock().unwrap() = Some(body);
                        Json(json!({ "insertedId": "u1" }))
                    },
                ),
            )
            .with_state(captured_user)
    }

    #[tokio::test]
    async fn test_navigate_through_login_and_role_resolution() {
        let provider = MockProvider::new();
        provider.add_account("admin@example.com", "pw", Some("Admin"));
        let base = spawn_backend(stub_router(Arc::new(Mutex::new(None)))).await;
        let (context, _streams) = test_context(&base, provider).await;

        assert_eq!(context.navigate("/").await, RouteDecision::Render);
        assert_eq!(
            context.navigate("/dashboard/manage-user").await,
            RouteDecision::RedirectToLogin
        );
        assert_eq!(context.navigate("/login").await, RouteDecision::Render);

        context
            .session
            .login_with_credentials("admin@example.com", "pw")
            .await
            .unwrap();

        assert_eq!(
            context.navigate("/dashboard/manage-user").await,
            RouteDecision::Render
        );
        assert_eq!(
            context.navigate("/dashboard/add-loan").await,
            RouteDecision::Forbidden,
            "an admin is not a manager"
        );
        assert_eq!(context.navigate("/login").await, RouteDecision::RedirectHome);
        assert_eq!(context.navigate("/nowhere").await, RouteDecision::NotFound);
    }

    #[tokio::test]
    async fn test_register_account_saves_backend_record() {
        let provider = MockProvider::new();
        let captured = Arc::new(Mutex::new(None));
        let base = spawn_backend(stub_router(captured.clone())).await;
        let (context, _streams) = test_context(&base, provider).await;

        let identity = context
            .register_account(
                "New.Manager@Example.com",
                "s3cret!",
                "Morgan Lee",
                None,
                Role::Manager,
            )
            .await
            .unwrap();

        assert_eq!(identity.display_name.as_deref(), Some("Morgan Lee"));
        assert!(context.session.current().identity.is_some());

        let record = captured.lock().unwrap().clone().expect("user record saved");
        assert_eq!(record["email"], "new.manager@example.com");
        assert_eq!(record["name"], "Morgan Lee");
        assert_eq!(record["role"], "user");
        assert_eq!(record["requestedRole"], "manager");
        assert_eq!(record["status"], "pending");
    }
}

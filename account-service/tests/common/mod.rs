use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::account::errors::AccountError;
use account_service::domain::account::models::Account;
use account_service::domain::account::models::AccountId;
use account_service::domain::account::models::AccountKind;
use account_service::domain::account::models::AccountProfile;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory credential store standing in for Postgres, so the HTTP stack
/// runs end-to-end without a live database. Enforces the same per-collection
/// email uniqueness the real store's constraints do.
pub struct InMemoryAccountRepository {
    collections: Mutex<HashMap<AccountKind, Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, kind: AccountKind, account: Account) -> Result<Account, AccountError> {
        let mut collections = self.collections.lock().unwrap();
        let collection = collections.entry(kind).or_default();

        if collection
            .iter()
            .any(|existing| existing.profile.email == account.profile.email)
        {
            return Err(AccountError::AlreadyExists(
                account.profile.email.as_str().to_string(),
            ));
        }

        collection.push(account.clone());
        Ok(account)
    }

    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, AccountError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&kind)
            .and_then(|collection| {
                collection
                    .iter()
                    .find(|account| account.profile.email.as_str() == email)
            })
            .cloned())
    }

    async fn find_profile_by_id(
        &self,
        kind: AccountKind,
        id: &AccountId,
    ) -> Result<Option<AccountProfile>, AccountError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&kind)
            .and_then(|collection| {
                collection.iter().find(|account| account.profile.id == *id)
            })
            .map(|account| account.profile.clone()))
    }
}

/// Test application that spawns the real HTTP server on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());

        // Low Argon2 costs keep the suite fast.
        let password_hasher =
            PasswordHasher::with_params(8192, 1, 1).expect("Failed to build password hasher");
        let authenticator = Authenticator::with_hasher(TEST_JWT_SECRET, password_hasher);

        let account_service: Arc<dyn AccountServicePort> =
            Arc::new(AccountService::new(repository, authenticator, 24));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(account_service);
        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}

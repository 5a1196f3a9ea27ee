//! Wiring of the in-memory adapters into domain services and HTTP ports.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::SwapEventPublisher;
use crate::domain::{
    AccountServiceImpl, AdminService, FeedbackService, RequestLedgerService, UserDirectoryService,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::events::TracingSwapEventPublisher;
use crate::outbound::memory::{
    InMemoryCredentialStore, InMemoryFeedbackRepository, InMemoryProfileRepository,
    InMemorySwapRequestRepository,
};
use crate::outbound::password::Argon2PasswordHasher;

/// The marketplace's stores, shared by every service built from them.
///
/// Stores are exposed so start-up seeding and integration tests can reach
/// them directly.
#[derive(Clone)]
pub struct InMemoryMarketplace {
    pub profiles: Arc<InMemoryProfileRepository>,
    pub requests: Arc<InMemorySwapRequestRepository>,
    pub feedback: Arc<InMemoryFeedbackRepository>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub hasher: Arc<Argon2PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMarketplace {
    /// Empty stores timed by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles: Arc::new(InMemoryProfileRepository::default()),
            requests: Arc::new(InMemorySwapRequestRepository::default()),
            feedback: Arc::new(InMemoryFeedbackRepository::default()),
            credentials: Arc::new(InMemoryCredentialStore::default()),
            hasher: Arc::new(Argon2PasswordHasher::default()),
            clock,
        }
    }

    pub fn directory(&self) -> UserDirectoryService<InMemoryProfileRepository> {
        UserDirectoryService::new(self.profiles.clone())
    }

    pub fn ledger(
        &self,
    ) -> RequestLedgerService<InMemoryProfileRepository, InMemorySwapRequestRepository> {
        RequestLedgerService::new(
            self.profiles.clone(),
            self.requests.clone(),
            self.clock.clone(),
        )
    }

    pub fn feedback_service(
        &self,
    ) -> FeedbackService<
        InMemoryProfileRepository,
        InMemorySwapRequestRepository,
        InMemoryFeedbackRepository,
    > {
        FeedbackService::new(
            self.profiles.clone(),
            self.requests.clone(),
            self.feedback.clone(),
            self.clock.clone(),
        )
    }

    pub fn admin(&self) -> AdminService<InMemoryProfileRepository, InMemorySwapRequestRepository> {
        AdminService::new(self.profiles.clone(), self.requests.clone())
    }

    pub fn accounts(
        &self,
    ) -> AccountServiceImpl<InMemoryProfileRepository, InMemoryCredentialStore, Argon2PasswordHasher>
    {
        AccountServiceImpl::new(
            self.profiles.clone(),
            self.credentials.clone(),
            self.hasher.clone(),
            self.clock.clone(),
        )
    }

    /// HTTP ports backed by these stores, publishing events to the log.
    pub fn ports(&self) -> HttpStatePorts {
        self.ports_with_events(Arc::new(TracingSwapEventPublisher))
    }

    pub fn ports_with_events(&self, events: Arc<dyn SwapEventPublisher>) -> HttpStatePorts {
        HttpStatePorts {
            accounts: Arc::new(self.accounts()),
            directory: Arc::new(self.directory()),
            ledger: Arc::new(self.ledger()),
            feedback: Arc::new(self.feedback_service()),
            admin: Arc::new(self.admin()),
            events,
        }
    }
}

//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see driving
//! ports, so they stay testable with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, AdminQuery, FeedbackCommand, RequestLedger, SwapEventPublisher, UserDirectory,
};

/// Parameter object bundling the port implementations for [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub directory: Arc<dyn UserDirectory>,
    pub ledger: Arc<dyn RequestLedger>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub admin: Arc<dyn AdminQuery>,
    pub events: Arc<dyn SwapEventPublisher>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub directory: Arc<dyn UserDirectory>,
    pub ledger: Arc<dyn RequestLedger>,
    pub feedback: Arc<dyn FeedbackCommand>,
    pub admin: Arc<dyn AdminQuery>,
    pub events: Arc<dyn SwapEventPublisher>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use skillswap::inbound::http::state::{HttpState, HttpStatePorts};
    /// use skillswap::server::InMemoryMarketplace;
    ///
    /// let marketplace = InMemoryMarketplace::new(Arc::new(mockable::DefaultClock));
    /// let state = HttpState::new(marketplace.ports());
    /// let _ledger = state.ledger.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            directory,
            ledger,
            feedback,
            admin,
            events,
        } = ports;
        Self {
            accounts,
            directory,
            ledger,
            feedback,
            admin,
            events,
        }
    }
}

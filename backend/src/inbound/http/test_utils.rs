//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use crate::domain::ports::{
    MockAccountService, MockAdminQuery, MockFeedbackCommand, MockRequestLedger,
    MockUserDirectory, NoOpSwapEventPublisher, SwapEventPublisher,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port doubles for handler tests; set expectations on the ones a test
/// exercises and leave the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub directory: MockUserDirectory,
    pub ledger: MockRequestLedger,
    pub feedback: MockFeedbackCommand,
    pub admin: MockAdminQuery,
    pub events: Option<Arc<dyn SwapEventPublisher>>,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            directory: Arc::new(self.directory),
            ledger: Arc::new(self.ledger),
            feedback: Arc::new(self.feedback),
            admin: Arc::new(self.admin),
            events: self
                .events
                .unwrap_or_else(|| Arc::new(NoOpSwapEventPublisher)),
        })
    }
}

/// Test-only endpoint that signs the session in as the path's user id.
async fn sign_in_as(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Sign in through the helper route and return the session cookie.
pub async fn signed_in<S>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/test/sign-in/{user_id}"))
            .to_request(),
    )
    .await;
    session_cookie(&res)
}

/// Extract the session cookie set by a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// App with the session middleware, `state`, the sign-in helper route, and
/// the handlers registered by `configure` under `/api/v1`.
pub fn test_app(
    state: HttpState,
    configure: impl FnOnce(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .route("/test/sign-in/{id}", web::post().to(sign_in_as))
        .service(web::scope("/api/v1").configure(configure))
}

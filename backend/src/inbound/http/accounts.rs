//! Signup and login handlers.
//!
//! ```text
//! POST /api/v1/signup {"name":"Sarah Chen","email":"sarah@example.com",...}
//! POST /api/v1/login {"email":"sarah@example.com","password":"password123"}
//! ```
//!
//! Both endpoints start a session for the returned member.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, LoginValidationError, NewPassword,
    ProfileDetails, SignupRequest, SwapError, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, parse_availability, parse_skills,
};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const SKILLS_OFFERED: FieldName = FieldName::new("skillsOffered");
const SKILLS_WANTED: FieldName = FieldName::new("skillsWanted");
const AVAILABILITY: FieldName = FieldName::new("availability");

/// Signup request body for `POST /api/v1/signup`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub skills_offered: Vec<String>,
    #[serde(default)]
    pub skills_wanted: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl TryFrom<SignupBody> for SignupRequest {
    type Error = Error;

    fn try_from(body: SignupBody) -> Result<Self, Self::Error> {
        let name = DisplayName::new(body.name).map_err(|err| invalid_field_error(NAME, err))?;
        let email = EmailAddress::new(&body.email).map_err(|err| invalid_field_error(EMAIL, err))?;
        let password = NewPassword::confirm(&body.password, &body.confirm_password)
            .map_err(|err| invalid_field_error(PASSWORD, err))?;
        Ok(Self {
            name,
            email,
            password,
            avatar: body.avatar,
            skills_offered: parse_skills(body.skills_offered, SKILLS_OFFERED)?,
            skills_wanted: parse_skills(body.skills_wanted, SKILLS_WANTED)?,
            availability: parse_availability(body.availability, AVAILABILITY)?,
            details: ProfileDetails {
                location: body.location,
                bio: body.bio,
                phone: body.phone,
                website: body.website,
                experience: body.experience,
            },
        })
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginBody> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(inner) => invalid_field_error(EMAIL, inner),
        LoginValidationError::EmptyPassword => invalid_field_error(PASSWORD, err),
    }
}

/// Register a member and sign them in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Member registered", body = UserProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "E-mail already registered", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    let profile = state.accounts.signup(request).await?;
    session.persist_user(&profile.id)?;
    Ok(HttpResponse::Created().json(profile))
}

/// Authenticate a member and establish a session.
///
/// Unknown e-mails and wrong passwords produce the same `401` response.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = UserProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<UserProfile>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let profile = state
        .accounts
        .login(&credentials)
        .await
        .map_err(|err| match err {
            SwapError::Forbidden { reason } => Error::unauthorized(reason),
            other => Error::from(other),
        })?;
    session.persist_user(&profile.id)?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_app};
    use crate::test_support::profile;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn signup_body() -> Value {
        json!({
            "name": "Sarah Chen",
            "email": "sarah@example.com",
            "password": "password123",
            "confirmPassword": "password123",
            "skillsOffered": ["Python", "python", "Data Analysis"],
            "skillsWanted": ["Guitar"],
            "availability": ["Weekends"],
        })
    }

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(signup).service(login);
    }

    #[actix_web::test]
    async fn signup_returns_created_profile_and_session() {
        let mut ports = MockPorts::default();
        ports.accounts.expect_signup().times(1).returning(|request| {
            assert_eq!(request.email.as_ref(), "sarah@example.com");
            assert_eq!(request.skills_offered.len(), 2);
            let mut created = profile("Sarah Chen", &["Python", "Data Analysis"], &["Guitar"]);
            created.email = request.email;
            Ok(created)
        });
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(signup_body())
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let _cookie = session_cookie(&res);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["email"], "sarah@example.com");
        assert_eq!(body["isPublic"], true);
    }

    #[rstest]
    #[case("password", "mismatch1", "password")]
    #[case("short", "short", "password")]
    #[case("", "", "password")]
    #[actix_web::test]
    async fn signup_rejects_bad_passwords(
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] field: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.accounts.expect_signup().never();
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let mut body = signup_body();
        body["password"] = json!(password);
        body["confirmPassword"] = json!(confirmation);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            payload.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }

    #[actix_web::test]
    async fn signup_rejects_unknown_availability_label() {
        let mut ports = MockPorts::default();
        ports.accounts.expect_signup().never();
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let mut body = signup_body();
        body["availability"] = json!(["Sometimes"]);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn duplicate_signup_is_conflict() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_signup()
            .returning(|_| Err(SwapError::conflict("e-mail already registered")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(signup_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn login_success_sets_session() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .withf(|creds| creds.email().as_ref() == "sarah@example.com")
            .returning(|_| Ok(profile("Sarah Chen", &["Python"], &[])));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginBody {
                    email: "Sarah@Example.com".into(),
                    password: "password123".into(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let _cookie = session_cookie(&res);
    }

    #[actix_web::test]
    async fn rejected_login_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_login()
            .returning(|_| Err(SwapError::forbidden("invalid credentials")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginBody {
                    email: "nobody@example.com".into(),
                    password: "whatever".into(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.message(), "invalid credentials");
    }

    #[rstest]
    #[case("not-an-email", "pw", "email")]
    #[case("sarah@example.com", "", "password")]
    #[actix_web::test]
    async fn malformed_login_is_bad_request(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.accounts.expect_login().never();
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginBody {
                    email: email.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(
            payload.details().and_then(|d| d.get("field")),
            Some(&json!(field))
        );
    }
}

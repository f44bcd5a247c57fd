//! Handlers for authenticated read-only views.
//!
//! ```text
//! GET /api/profile    Authorization: Bearer <token>
//! GET /api/dashboard  Authorization: Bearer <token>
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ActivityEntry, DashboardSummary, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerSession;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Account identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name.
    #[schema(example = "Ann")]
    pub name: String,
    /// Email address.
    #[schema(example = "ann@x.com")]
    pub email: String,
    /// Registration instant.
    #[schema(value_type = String, format = DateTime, example = "2026-01-15T10:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// One entry in the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ActivityResponse {
    /// Position in the feed.
    pub id: u32,
    /// What happened.
    #[schema(example = "New user registered")]
    pub description: String,
    /// Relative time of the event.
    #[schema(example = "2 hours ago")]
    pub time: String,
}

impl From<&ActivityEntry> for ActivityResponse {
    fn from(entry: &ActivityEntry) -> Self {
        Self {
            id: entry.id(),
            description: entry.description().to_owned(),
            time: entry.time().to_owned(),
        }
    }
}

/// Dashboard metrics. Only `totalUsers` reflects stored data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Number of registered accounts.
    pub total_users: u64,
    /// Placeholder revenue figure.
    pub revenue: u64,
    /// Placeholder active session count.
    pub active_sessions: u64,
    /// Placeholder activity feed.
    pub recent_activity: Vec<ActivityResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_users: summary.total_users(),
            revenue: summary.revenue(),
            active_sessions: summary.active_sessions(),
            recent_activity: summary
                .recent_activity()
                .iter()
                .map(ActivityResponse::from)
                .collect(),
        }
    }
}

/// Fetch the profile of the user owning the bearer token.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Access token required", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: BearerSession,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user = state.profiles.fetch_profile(session.user_id()).await?;
    Ok(web::Json(ProfileResponse::from(user)))
}

/// Fetch dashboard metrics for the authenticated user.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard metrics", body = DashboardResponse),
        (status = 401, description = "Access token required", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: BearerSession,
) -> ApiResult<web::Json<DashboardResponse>> {
    let summary = state.dashboard.fetch_dashboard(session.user_id()).await?;
    Ok(web::Json(DashboardResponse::from(summary)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmailAddress, Error, UserId, UserName};
    use crate::inbound::http::test_utils::{MockPorts, claims_for, test_app};
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::Value;

    fn authorised(ports: &mut MockPorts, user_id: UserId) {
        ports
            .sessions
            .expect_verify()
            .withf(|token| token == "valid")
            .return_once(move |_| Ok(claims_for(user_id)));
    }

    async fn get_json(ports: MockPorts, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports.into_state())).await;
        let mut request = actix_test::TestRequest::get().uri(uri);
        if let Some(token) = bearer {
            request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("JSON response"))
    }

    #[actix_web::test]
    async fn profile_returns_the_token_owner() {
        let user_id = UserId::random();
        let created_at = Utc
            .with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
            .single()
            .expect("timestamp");
        let mut ports = MockPorts::default();
        authorised(&mut ports, user_id);
        ports
            .profiles
            .expect_fetch_profile()
            .withf(move |id| *id == user_id)
            .times(1)
            .return_once(move |id| {
                Ok(User::new(
                    *id,
                    UserName::new("Ann").expect("name"),
                    EmailAddress::new("ann@x.com").expect("email"),
                    created_at,
                ))
            });

        let (status, body) = get_json(ports, "/api/profile", Some("valid")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], user_id.to_string());
        assert_eq!(body["name"], "Ann");
        assert_eq!(body["email"], "ann@x.com");
        assert_eq!(body["createdAt"], "2026-01-15T10:00:00Z");
    }

    #[actix_web::test]
    async fn profile_reports_missing_user() {
        let mut ports = MockPorts::default();
        authorised(&mut ports, UserId::random());
        ports
            .profiles
            .expect_fetch_profile()
            .return_once(|_| Err(Error::not_found("User not found")));

        let (status, body) = get_json(ports, "/api/profile", Some("valid")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[rstest]
    #[case("/api/profile")]
    #[case("/api/dashboard")]
    #[actix_web::test]
    async fn protected_routes_require_a_token(#[case] uri: &str) {
        let mut ports = MockPorts::default();
        ports.profiles.expect_fetch_profile().never();
        ports.dashboard.expect_fetch_dashboard().never();

        let (status, body) = get_json(ports, uri, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access token required");
    }

    #[rstest]
    #[case("/api/profile")]
    #[case("/api/dashboard")]
    #[actix_web::test]
    async fn protected_routes_reject_bad_tokens(#[case] uri: &str) {
        let mut ports = MockPorts::default();
        ports
            .sessions
            .expect_verify()
            .return_once(|_| Err(Error::forbidden("Invalid or expired token")));

        let (status, body) = get_json(ports, uri, Some("forged")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[actix_web::test]
    async fn dashboard_serialises_camel_case_metrics() {
        let mut ports = MockPorts::default();
        authorised(&mut ports, UserId::random());
        ports
            .dashboard
            .expect_fetch_dashboard()
            .return_once(|_| Ok(DashboardSummary::with_placeholder_metrics(3)));

        let (status, body) = get_json(ports, "/api/dashboard", Some("valid")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalUsers"], 3);
        assert_eq!(body["revenue"], 45_678);
        assert_eq!(body["activeSessions"], 892);
        let activity = body["recentActivity"].as_array().expect("activity array");
        assert_eq!(activity.len(), 3);
        assert_eq!(activity[0]["description"], "New user registered");
        assert_eq!(activity[0]["time"], "2 hours ago");
    }
}

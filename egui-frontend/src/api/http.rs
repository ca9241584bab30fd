//! # HTTP Partner API
//!
//! `PartnerApi` over the MindTrace REST backend. Every request carries the
//! signed-in user's ID token as a bearer token; non-2xx answers become
//! `ApiError::Status` with the response body for logging.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use shared::{AddPatientRequest, HealthResponse, OtpResponse, PartnerInfo, Role, UserInfo};
use std::sync::Arc;

use super::{ApiError, PartnerApi, TokenProvider};
use crate::config::ApiConfig;

pub struct HttpPartnerApi {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpPartnerApi {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base URL {}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("base URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.tokens.bearer_token().ok_or(ApiError::Unauthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorized(builder)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("❌ Backend answered {}: {}", status, body);
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PartnerApi for HttpPartnerApi {
    async fn get_partners(&self, role: Role, include_deleted: bool) -> Result<Vec<PartnerInfo>, ApiError> {
        let url = match role {
            Role::Caregiver => self.endpoint(&["v1", "caregivers", "patients"])?,
            Role::Patient => self.endpoint(&["v1", "users", "caregivers"])?,
        };
        debug!("GET {} includeDeleted={}", url, include_deleted);

        let response = self
            .send(self.client.get(url).query(&[("includeDeleted", include_deleted)]))
            .await?;
        Ok(response.json::<Vec<PartnerInfo>>().await?)
    }

    async fn add_patient(&self, request: &AddPatientRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "caregivers", "patients"])?;
        self.send(self.client.post(url).json(request)).await?;
        Ok(())
    }

    async fn send_patient_add_otp(&self, patient_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "caregivers", "patients", patient_id, "otp"])?;
        self.send(self.client.get(url)).await?;
        Ok(())
    }

    async fn delete_caregiver(&self, caregiver_id: &str, otp: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "users", "caregivers", caregiver_id])?;
        self.send(self.client.delete(url).query(&[("otp", otp)])).await?;
        Ok(())
    }

    async fn remove_patient(&self, patient_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "caregivers", "patients", patient_id])?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn send_caregiver_removal_otp(&self, caregiver_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "users", "caregivers", caregiver_id, "otp"])?;
        self.send(self.client.get(url)).await?;
        Ok(())
    }

    async fn get_user_info(&self, user_id: Option<&str>) -> Result<Option<UserInfo>, ApiError> {
        let url = self.endpoint(&["v1", "users"])?;
        let mut builder = self.client.get(url);
        if let Some(id) = user_id {
            builder = builder.query(&[("userId", id)]);
        }

        match self.send(builder).await {
            Ok(response) => Ok(Some(response.json::<UserInfo>().await?)),
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_pairing_otp(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["v1", "auth", "register", "otp"])?;
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<OtpResponse>()
            .await?
            .otp
            .ok_or_else(|| ApiError::NotFound("pairing OTP".to_string()))
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.endpoint(&["actuator", "health"])?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json::<HealthResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticTokenProvider;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    const TOKEN: &str = "test-token";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false)
    }

    async fn list_patients(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<serde_json::Value>, AxumStatus> {
        if !authorized(&headers) {
            return Err(AxumStatus::UNAUTHORIZED);
        }
        let mut partners = vec![serde_json::json!({
            "id": "pt-1", "name": "Ada", "gender": "F", "profilePicture": null, "removedAt": null
        })];
        if params.get("includeDeleted").map(String::as_str) == Some("true") {
            partners.push(serde_json::json!({
                "id": "pt-2", "name": "Bob", "gender": "M", "removedAt": "2025-06-22T08:30:00Z"
            }));
        }
        Ok(Json(serde_json::Value::Array(partners)))
    }

    async fn delete_caregiver(
        Path(id): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (AxumStatus, String) {
        match params.get("otp").map(String::as_str) {
            Some("123456") if id == "cg 1" => (AxumStatus::OK, String::new()),
            _ => (AxumStatus::BAD_REQUEST, "Invalid OTP".to_string()),
        }
    }

    async fn user_info(Query(params): Query<HashMap<String, String>>) -> Result<Json<serde_json::Value>, AxumStatus> {
        match params.get("userId").map(String::as_str) {
            Some("missing") => Err(AxumStatus::NOT_FOUND),
            other => Ok(Json(serde_json::json!({
                "id": other.unwrap_or("me"), "name": "Carol", "email": "carol@example.com",
                "role": "CAREGIVER", "gender": "F", "dob": "1970-01-01"
            }))),
        }
    }

    async fn add_patient(Json(request): Json<AddPatientRequest>) -> AxumStatus {
        if request.patient_id == "pt-9" && request.otp == "999000" {
            AxumStatus::OK
        } else {
            AxumStatus::BAD_REQUEST
        }
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/v1/caregivers/patients", get(list_patients).post(add_patient))
            .route("/v1/users/caregivers/:id", axum::routing::delete(delete_caregiver))
            .route("/v1/users", get(user_info))
            .route("/v1/auth/register/otp", get(|| async { Json(serde_json::json!({ "otp": "424242" })) }))
            .route("/actuator/health", get(|| async { Json(serde_json::json!({ "status": "UP" })) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String, token: Option<&str>) -> HttpPartnerApi {
        let config = ApiConfig {
            base_url,
            request_timeout_secs: 5,
        };
        let tokens = Arc::new(StaticTokenProvider::new(token.map(str::to_string)));
        HttpPartnerApi::new(&config, tokens).unwrap()
    }

    #[tokio::test]
    async fn test_get_partners_sends_token_and_flag() {
        let api = client(spawn_backend().await, Some(TOKEN));

        let active = api.get_partners(Role::Caregiver, false).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Ada");

        let all = api.get_partners(Role::Caregiver, true).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[1].is_removed());
    }

    #[tokio::test]
    async fn test_rejected_token_surfaces_status() {
        let api = client(spawn_backend().await, Some("wrong"));

        let result = api.get_partners(Role::Caregiver, false).await;
        assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_missing_token_never_reaches_backend() {
        let api = client(spawn_backend().await, None);

        let result = api.remove_patient("pt-1").await;
        assert_eq!(result, Err(ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_delete_caregiver_encodes_id_and_checks_otp() {
        let api = client(spawn_backend().await, Some(TOKEN));

        assert!(api.delete_caregiver("cg 1", "123456").await.is_ok());

        let rejected = api.delete_caregiver("cg 1", "000000").await;
        assert!(matches!(rejected, Err(ApiError::Status { status: 400, ref body }) if body == "Invalid OTP"));
    }

    #[tokio::test]
    async fn test_user_lookup_miss_is_none() {
        let api = client(spawn_backend().await, Some(TOKEN));

        assert!(api.get_user_info(Some("missing")).await.unwrap().is_none());

        let me = api.get_user_info(None).await.unwrap().unwrap();
        assert_eq!(me.id, "me");
        assert_eq!(me.role, Role::Caregiver);
    }

    #[tokio::test]
    async fn test_add_patient_posts_camel_case_body() {
        let api = client(spawn_backend().await, Some(TOKEN));

        let ok = AddPatientRequest {
            patient_id: "pt-9".to_string(),
            otp: "999000".to_string(),
        };
        assert!(api.add_patient(&ok).await.is_ok());

        let bad = AddPatientRequest {
            otp: "111111".to_string(),
            ..ok
        };
        assert!(api.add_patient(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_pairing_otp_and_health() {
        let api = client(spawn_backend().await, Some(TOKEN));

        assert_eq!(api.get_pairing_otp().await.unwrap(), "424242");
        assert_eq!(api.health().await.unwrap().status, "UP");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let api = client("http://127.0.0.1:1".to_string(), Some(TOKEN));

        let result = api.get_partners(Role::Patient, false).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}

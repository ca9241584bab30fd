//! In-memory `PartnerApi` for tests. Records every call and mimics the
//! backend's OTP checks and soft deletes.

use async_trait::async_trait;
use chrono::Utc;
use shared::{AddPatientRequest, Gender, HealthResponse, PartnerInfo, Role, UserInfo};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ApiError, PartnerApi};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetPartners { role: Role, include_deleted: bool },
    AddPatient { patient_id: String, otp: String },
    SendPatientAddOtp(String),
    DeleteCaregiver { caregiver_id: String, otp: String },
    RemovePatient(String),
    SendCaregiverRemovalOtp(String),
    GetUserInfo(Option<String>),
    GetPairingOtp,
    Health,
}

pub struct FakePartnerApi {
    partners: Mutex<Vec<PartnerInfo>>,
    users: Mutex<HashMap<String, UserInfo>>,
    self_user: Mutex<Option<UserInfo>>,
    valid_otp: String,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakePartnerApi {
    pub const VALID_OTP: &'static str = "999000";

    pub fn new(partners: Vec<PartnerInfo>) -> Self {
        Self {
            partners: Mutex::new(partners),
            users: Mutex::new(HashMap::new()),
            self_user: Mutex::new(None),
            valid_otp: Self::VALID_OTP.to_string(),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(self, user: UserInfo) -> Self {
        self.users.lock().unwrap().insert(user.id.clone(), user);
        self
    }

    pub fn with_self_user(self, user: UserInfo) -> Self {
        *self.self_user.lock().unwrap() = Some(user);
        self
    }

    /// Make every call to `endpoint` fail with `error`
    pub fn fail(&self, endpoint: &'static str, error: ApiError) {
        self.failures.lock().unwrap().insert(endpoint, error);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn refresh_count(&self) -> usize {
        self.count_calls(|c| matches!(c, ApiCall::GetPartners { .. }))
    }

    fn record(&self, endpoint: &'static str, call: ApiCall) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn check_otp(&self, otp: &str) -> Result<(), ApiError> {
        if otp == self.valid_otp {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 400,
                body: "Invalid OTP".to_string(),
            })
        }
    }

    fn soft_delete(&self, id: &str) -> Result<(), ApiError> {
        let mut partners = self.partners.lock().unwrap();
        match partners.iter_mut().find(|p| p.id == id && !p.is_removed()) {
            Some(partner) => {
                partner.removed_at = Some(Utc::now());
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                body: format!("No active relationship with {}", id),
            }),
        }
    }
}

#[async_trait]
impl PartnerApi for FakePartnerApi {
    async fn get_partners(&self, role: Role, include_deleted: bool) -> Result<Vec<PartnerInfo>, ApiError> {
        self.record("get_partners", ApiCall::GetPartners { role, include_deleted })?;
        let partners = self.partners.lock().unwrap();
        Ok(partners
            .iter()
            .filter(|p| include_deleted || !p.is_removed())
            .cloned()
            .collect())
    }

    async fn add_patient(&self, request: &AddPatientRequest) -> Result<(), ApiError> {
        self.record(
            "add_patient",
            ApiCall::AddPatient {
                patient_id: request.patient_id.clone(),
                otp: request.otp.clone(),
            },
        )?;
        self.check_otp(&request.otp)?;

        let user = self
            .users
            .lock()
            .unwrap()
            .get(&request.patient_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "Patient not found".to_string(),
            })?;

        self.partners.lock().unwrap().push(PartnerInfo {
            id: user.id,
            name: user.name,
            gender: user.gender,
            profile_picture: user.profile_picture,
            created_at: Some(Utc::now()),
            removed_at: None,
        });
        Ok(())
    }

    async fn send_patient_add_otp(&self, patient_id: &str) -> Result<(), ApiError> {
        self.record("send_patient_add_otp", ApiCall::SendPatientAddOtp(patient_id.to_string()))
    }

    async fn delete_caregiver(&self, caregiver_id: &str, otp: &str) -> Result<(), ApiError> {
        self.record(
            "delete_caregiver",
            ApiCall::DeleteCaregiver {
                caregiver_id: caregiver_id.to_string(),
                otp: otp.to_string(),
            },
        )?;
        self.check_otp(otp)?;
        self.soft_delete(caregiver_id)
    }

    async fn remove_patient(&self, patient_id: &str) -> Result<(), ApiError> {
        self.record("remove_patient", ApiCall::RemovePatient(patient_id.to_string()))?;
        self.soft_delete(patient_id)
    }

    async fn send_caregiver_removal_otp(&self, caregiver_id: &str) -> Result<(), ApiError> {
        self.record(
            "send_caregiver_removal_otp",
            ApiCall::SendCaregiverRemovalOtp(caregiver_id.to_string()),
        )
    }

    async fn get_user_info(&self, user_id: Option<&str>) -> Result<Option<UserInfo>, ApiError> {
        self.record("get_user_info", ApiCall::GetUserInfo(user_id.map(str::to_string)))?;
        Ok(match user_id {
            Some(id) => self.users.lock().unwrap().get(id).cloned(),
            None => self.self_user.lock().unwrap().clone(),
        })
    }

    async fn get_pairing_otp(&self) -> Result<String, ApiError> {
        self.record("get_pairing_otp", ApiCall::GetPairingOtp)?;
        Ok(self.valid_otp.clone())
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.record("health", ApiCall::Health)?;
        Ok(HealthResponse {
            status: "UP".to_string(),
        })
    }
}

pub fn partner(id: &str, name: &str) -> PartnerInfo {
    PartnerInfo {
        id: id.to_string(),
        name: name.to_string(),
        gender: Gender::Unspecified,
        profile_picture: None,
        created_at: Some(Utc::now()),
        removed_at: None,
    }
}

pub fn removed_partner(id: &str, name: &str) -> PartnerInfo {
    PartnerInfo {
        removed_at: Some(Utc::now()),
        ..partner(id, name)
    }
}

pub fn user(id: &str, name: &str, role: Role) -> UserInfo {
    UserInfo {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        role,
        gender: Gender::Female,
        dob: "1950-04-12".to_string(),
        profile_picture: None,
        primary_contact: None,
        created_at: None,
        telegram_chat_id: None,
    }
}

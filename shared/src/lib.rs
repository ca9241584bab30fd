use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender code as reported by the backend ("M", "F", "O"/"OTHER", or nothing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Gender {
    Male,
    Female,
    Other,
    /// Missing, blank, or a code the client does not know
    #[default]
    Unspecified,
}

impl Gender {
    /// Parse a backend gender code, case-insensitively
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_uppercase()).as_deref() {
            Some("M") | Some("MALE") => Gender::Male,
            Some("F") | Some("FEMALE") => Gender::Female,
            Some("O") | Some("OTHER") => Gender::Other,
            _ => Gender::Unspecified,
        }
    }

    /// Wire code sent back to the backend
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
            Gender::Other => Some("O"),
            Gender::Unspecified => None,
        }
    }

    /// Human-readable label for partner cards
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unspecified => "Not specified",
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(code: Option<String>) -> Self {
        Gender::from_code(code.as_deref())
    }
}

impl From<Gender> for Option<String> {
    fn from(gender: Gender) -> Self {
        gender.code().map(str::to_string)
    }
}

/// Which side of a care relationship the signed-in user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Caregiver,
    Patient,
}

impl Role {
    /// The role of the people shown on this user's partner screen
    pub fn partner_role(&self) -> Role {
        match self {
            Role::Caregiver => Role::Patient,
            Role::Patient => Role::Caregiver,
        }
    }

    /// Backend spelling ("CAREGIVER" / "PATIENT")
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Caregiver => "CAREGIVER",
            Role::Patient => "PATIENT",
        }
    }

    /// Singular, capitalized noun for this role ("Caregiver" / "Patient")
    pub fn noun(&self) -> &'static str {
        match self {
            Role::Caregiver => "Caregiver",
            Role::Patient => "Patient",
        }
    }

    /// Plural title of this user's partners ("Patients" / "Caregivers")
    pub fn partner_title(&self) -> &'static str {
        match self.partner_role() {
            Role::Caregiver => "Caregivers",
            Role::Patient => "Patients",
        }
    }

    /// Upper-case label of this user's partners ("PATIENT" / "CAREGIVER")
    pub fn partner_label(&self) -> &'static str {
        self.partner_role().as_str()
    }

    /// A patient removing a caregiver must confirm with an OTP sent out-of-band.
    /// A caregiver removing a patient does not.
    pub fn removal_requires_otp(&self) -> bool {
        matches!(self, Role::Patient)
    }

    /// Only caregivers can link a new partner; patients must ask the caregiver.
    pub fn can_add_partner(&self) -> bool {
        matches!(self, Role::Caregiver)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("caregiver") {
            Ok(Role::Caregiver)
        } else if s.trim().eq_ignore_ascii_case("patient") {
            Ok(Role::Patient)
        } else {
            Err(RoleParseError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

/// One linked partner as returned by the partner list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Set when the relationship has been soft-deleted
    #[serde(default)]
    pub removed_at: Option<DateTime<Utc>>,
}

impl PartnerInfo {
    pub fn is_removed(&self) -> bool {
        self.removed_at.is_some()
    }

    /// Up to two initials, used in place of the profile picture
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

/// Primary contact attached to a patient's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryContact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile returned by `GET /v1/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub gender: Gender,
    /// Date of birth, YYYY-MM-DD
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub primary_contact: Option<PrimaryContact>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
}

impl UserInfo {
    pub fn initials(&self) -> String {
        initials_of(&self.name)
    }
}

/// Request body for `POST /v1/caregivers/patients`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPatientRequest {
    pub patient_id: String,
    pub otp: String,
}

/// Response from `GET /v1/auth/register/otp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpResponse {
    pub otp: Option<String>,
}

/// Response from `GET /actuator/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Pairing code shown as a QR code on the patient's device: `<id>|<otp>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub id: String,
    pub otp: Option<String>,
}

impl QrPayload {
    pub const SEPARATOR: char = '|';

    /// Parse a scanned payload. Exactly two `|`-separated parts yield an id and
    /// an OTP; anything else is taken whole as the id.
    pub fn parse(raw: &str) -> Result<Self, QrPayloadError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(QrPayloadError::Empty);
        }

        let parts: Vec<&str> = raw.split(Self::SEPARATOR).collect();
        let payload = if parts.len() == 2 {
            let otp = parts[1].trim();
            QrPayload {
                id: parts[0].trim().to_string(),
                otp: (!otp.is_empty()).then(|| otp.to_string()),
            }
        } else {
            QrPayload {
                id: raw.to_string(),
                otp: None,
            }
        };

        if payload.id.is_empty() {
            return Err(QrPayloadError::MissingId);
        }
        Ok(payload)
    }

    /// Encode an id and OTP the way the patient's pairing screen does
    pub fn encode(id: &str, otp: &str) -> String {
        format!("{}{}{}", id, Self::SEPARATOR, otp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayloadError {
    Empty,
    MissingId,
}

impl fmt::Display for QrPayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrPayloadError::Empty => write!(f, "Pairing code is empty"),
            QrPayloadError::MissingId => write!(f, "Pairing code does not contain a patient ID"),
        }
    }
}

impl std::error::Error for QrPayloadError {}

fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Format a timestamp relative to `now`: "Today, 3:05 PM", "Yesterday, 9:00 AM",
/// "Mar 4, 2:15 PM" within the same year, "Mar 4, 2023, 2:15 PM" otherwise.
pub fn format_friendly_date<Tz>(timestamp: Option<&DateTime<Utc>>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(timestamp) = timestamp else {
        return "Date not available".to_string();
    };

    let local = timestamp.with_timezone(&now.timezone());
    let today = now.date_naive();
    let day = local.date_naive();

    if day == today {
        format!("Today, {}", local.format("%-I:%M %p"))
    } else if Some(day) == today.checked_sub_signed(Duration::days(1)) {
        format!("Yesterday, {}", local.format("%-I:%M %p"))
    } else if day.year() == today.year() {
        local.format("%b %-d, %-I:%M %p").to_string()
    } else {
        local.format("%b %-d, %Y, %-I:%M %p").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code(Some("m")), Gender::Male);
        assert_eq!(Gender::from_code(Some("F")), Gender::Female);
        assert_eq!(Gender::from_code(Some("OTHER")), Gender::Other);
        assert_eq!(Gender::from_code(Some("o")), Gender::Other);
        assert_eq!(Gender::from_code(Some("  ")), Gender::Unspecified);
        assert_eq!(Gender::from_code(Some("X")), Gender::Unspecified);
        assert_eq!(Gender::from_code(None), Gender::Unspecified);

        assert_eq!(Gender::Female.display_name(), "Female");
        assert_eq!(Gender::Unspecified.display_name(), "Not specified");
    }

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("CAREGIVER".parse::<Role>().unwrap(), Role::Caregiver);
        assert_eq!("Patient".parse::<Role>().unwrap(), Role::Patient);
        assert_eq!(" patient ".parse::<Role>().unwrap(), Role::Patient);
        assert!("doctor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_rules() {
        assert!(Role::Patient.removal_requires_otp());
        assert!(!Role::Caregiver.removal_requires_otp());
        assert!(Role::Caregiver.can_add_partner());
        assert!(!Role::Patient.can_add_partner());

        assert_eq!(Role::Caregiver.partner_title(), "Patients");
        assert_eq!(Role::Patient.partner_title(), "Caregivers");
        assert_eq!(Role::Caregiver.partner_label(), "PATIENT");
        assert_eq!(Role::Patient.partner_role(), Role::Caregiver);
    }

    #[test]
    fn test_partner_info_deserialization() {
        let json = r#"[
            {"id": "p1", "name": "Ada Lovelace", "gender": "F", "profilePicture": null,
             "createdAt": "2025-06-20T10:00:00Z", "removedAt": null},
            {"id": "p2", "name": "Alan", "gender": null, "removedAt": "2025-06-22T08:30:00.123456Z"}
        ]"#;

        let partners: Vec<PartnerInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].gender, Gender::Female);
        assert!(!partners[0].is_removed());
        assert_eq!(partners[0].initials(), "AL");
        assert_eq!(partners[1].gender, Gender::Unspecified);
        assert!(partners[1].is_removed());
        assert!(partners[1].created_at.is_none());
    }

    #[test]
    fn test_user_info_role_from_backend() {
        let json = r#"{"id": "u1", "name": "Sam", "email": "sam@example.com", "role": "CAREGIVER",
                       "gender": "M", "dob": "1980-01-01", "profilePicture": null,
                       "primaryContact": null, "createdAt": "2025-01-01T00:00:00Z",
                       "telegramChatId": null}"#;

        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Caregiver);
        assert_eq!(user.gender, Gender::Male);

        let bad = json.replace("CAREGIVER", "ADMIN");
        assert!(serde_json::from_str::<UserInfo>(&bad).is_err());
    }

    #[test]
    fn test_add_patient_request_is_camel_case() {
        let request = AddPatientRequest {
            patient_id: "abc123".to_string(),
            otp: "999000".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["patientId"], "abc123");
        assert_eq!(value["otp"], "999000");
    }

    #[test]
    fn test_qr_payload_with_otp() {
        let payload = QrPayload::parse("abc123|999000").unwrap();
        assert_eq!(payload.id, "abc123");
        assert_eq!(payload.otp.as_deref(), Some("999000"));
    }

    #[test]
    fn test_qr_payload_without_pipe() {
        let payload = QrPayload::parse("abc123").unwrap();
        assert_eq!(payload.id, "abc123");
        assert_eq!(payload.otp, None);
    }

    #[test]
    fn test_qr_payload_with_extra_parts_is_taken_whole() {
        let payload = QrPayload::parse("a|b|c").unwrap();
        assert_eq!(payload.id, "a|b|c");
        assert_eq!(payload.otp, None);
    }

    #[test]
    fn test_qr_payload_edge_cases() {
        assert_eq!(QrPayload::parse("   "), Err(QrPayloadError::Empty));
        assert_eq!(QrPayload::parse("|123456"), Err(QrPayloadError::MissingId));
        assert_eq!(QrPayload::parse("abc123|").unwrap().otp, None);
        assert_eq!(QrPayload::encode("abc123", "999000"), "abc123|999000");
    }

    #[test]
    fn test_friendly_dates() {
        let now = utc("2025-06-23T15:00:00Z");

        assert_eq!(format_friendly_date(None, &now), "Date not available");
        assert_eq!(
            format_friendly_date(Some(&utc("2025-06-23T09:05:00Z")), &now),
            "Today, 9:05 AM"
        );
        assert_eq!(
            format_friendly_date(Some(&utc("2025-06-22T21:30:00Z")), &now),
            "Yesterday, 9:30 PM"
        );
        assert_eq!(
            format_friendly_date(Some(&utc("2025-03-04T14:15:00Z")), &now),
            "Mar 4, 2:15 PM"
        );
        assert_eq!(
            format_friendly_date(Some(&utc("2023-03-04T14:15:00Z")), &now),
            "Mar 4, 2023, 2:15 PM"
        );
    }
}

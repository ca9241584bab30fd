//! # Modal State Module
//!
//! The one modal that can be open on the partner screen, with the form state
//! each modal owns.
//!
//! ## Purpose:
//! A single `ActiveModal` replaces per-dialog visibility flags, so two dialogs
//! can never be open at once and the selected partner disappears together
//! with the dialog it was bound to.

use shared::{PartnerInfo, UserInfo};

/// Longest one-time password the backend issues
pub const OTP_MAX_LEN: usize = 6;

/// One-time password entry shared by the removal and add flows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtpForm {
    pub code: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl OtpForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed code, or `None` when nothing usable was entered
    pub fn submitted_code(&self) -> Option<String> {
        let code = self.code.trim();
        (!code.is_empty()).then(|| code.chars().take(OTP_MAX_LEN).collect())
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.submitted_code().is_some()
    }
}

/// Caregiver's "add patient" form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddPartnerForm {
    /// Patient ID typed by hand or filled from a pairing code
    pub patient_id: String,
    /// Raw pairing code (`<id>|<otp>`) pasted from the patient's QR code
    pub pairing_code: String,
    /// OTP taken from the pairing code, if it carried one
    pub otp: Option<String>,
    /// Profile found by the lookup, shown for confirmation
    pub patient: Option<UserInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AddPartnerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_look_up(&self) -> bool {
        !self.loading && !self.patient_id.trim().is_empty()
    }
}

/// The modal currently shown over the partner list
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveModal {
    #[default]
    None,
    /// "Remove this partner?" with the partner bound
    ConfirmDelete {
        partner: PartnerInfo,
        loading: bool,
        error: Option<String>,
    },
    /// Patient entering the OTP sent for removing a caregiver
    RemovalOtp { partner: PartnerInfo, form: OtpForm },
    /// Caregiver looking up a patient to add
    AddPartner(AddPartnerForm),
    /// Caregiver entering the OTP sent to the patient being added
    AddOtp { patient_id: String, form: OtpForm },
    /// Patients cannot add caregivers themselves
    AddNotSupported,
    /// Patient's own pairing code for a caregiver to scan
    PairingCode {
        code: Option<String>,
        loading: bool,
        error: Option<String>,
    },
}

impl ActiveModal {
    pub fn is_open(&self) -> bool {
        !matches!(self, ActiveModal::None)
    }

    /// Partner bound to a pending delete, if any
    pub fn selected_partner(&self) -> Option<&PartnerInfo> {
        match self {
            ActiveModal::ConfirmDelete { partner, .. } | ActiveModal::RemovalOtp { partner, .. } => Some(partner),
            _ => None,
        }
    }

    /// Whether a request for this modal is in flight
    pub fn is_loading(&self) -> bool {
        match self {
            ActiveModal::ConfirmDelete { loading, .. } | ActiveModal::PairingCode { loading, .. } => *loading,
            ActiveModal::RemovalOtp { form, .. } | ActiveModal::AddOtp { form, .. } => form.loading,
            ActiveModal::AddPartner(form) => form.loading,
            ActiveModal::None | ActiveModal::AddNotSupported => false,
        }
    }

    /// Inline error shown in the modal
    pub fn error(&self) -> Option<&str> {
        match self {
            ActiveModal::ConfirmDelete { error, .. } | ActiveModal::PairingCode { error, .. } => error.as_deref(),
            ActiveModal::RemovalOtp { form, .. } | ActiveModal::AddOtp { form, .. } => form.error.as_deref(),
            ActiveModal::AddPartner(form) => form.error.as_deref(),
            ActiveModal::None | ActiveModal::AddNotSupported => None,
        }
    }
}

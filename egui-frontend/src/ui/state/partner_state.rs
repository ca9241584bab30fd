//! # Partner Screen State
//!
//! State machine behind the "My Patients" / "My Caregivers" screen.
//!
//! ## Flows:
//! - Delete: `Idle -> ConfirmDelete -> Idle` for caregivers removing a patient,
//!   `Idle -> ConfirmDelete -> RemovalOtp -> Idle` for patients removing a caregiver.
//! - Add (caregivers only): `Idle -> AddPartner -> [AddOtp] -> Idle`. A pairing
//!   code that already carries an OTP skips the OTP dialog.
//! - Pairing code (patients only): fetch an OTP and show `<id>|<otp>`.
//!
//! ## Effects:
//! Transitions never talk to the network. They return a `Command` describing the
//! call to make; whoever runs it feeds the `Outcome` back through `apply`. Every
//! command carries a `Ticket`; closing a modal or starting a new fetch retires
//! the old ticket, so late answers are dropped instead of reopening dialogs.
//! Generations come from one process-wide counter, so a ticket issued by an
//! earlier visit to the screen never matches a later one.

use log::{debug, info, warn};
use shared::{PartnerInfo, QrPayload, Role, UserInfo};
use std::sync::atomic::{AtomicU64, Ordering};

use super::modal_state::{ActiveModal, AddPartnerForm, OtpForm};
use crate::api::ApiError;

pub const EMPTY_OTP_MESSAGE: &str = "Please enter the one-time password.";
pub const PATIENT_NOT_FOUND_MESSAGE: &str = "Patient not found.";
pub const ADD_PATIENT_FAILED_MESSAGE: &str = "Failed to add patient. Invalid OTP or patient not found.";
pub const SEND_OTP_FAILED_MESSAGE: &str = "Failed to send OTP. Please try again.";
pub const CANNOT_ADD_CAREGIVER_MESSAGE: &str =
    "You cannot add caregivers directly. Please ask the caregiver to add you as a patient";

/// Backend call requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPartners { role: Role, include_deleted: bool },
    SendRemovalOtp { caregiver_id: String },
    RemovePatient { patient_id: String },
    DeleteCaregiver { caregiver_id: String, otp: String },
    LookupPatient { patient_id: String },
    SendAddOtp { patient_id: String },
    AddPatient { patient_id: String, otp: String },
    RequestPairingOtp,
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Identifies which request an outcome answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    List(u64),
    Modal(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub ticket: Ticket,
    pub effect: Effect,
}

/// Result of running an `Effect`
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    PartnersLoaded(Result<Vec<PartnerInfo>, ApiError>),
    RemovalOtpSent(Result<(), ApiError>),
    PatientRemoved(Result<(), ApiError>),
    CaregiverDeleted(Result<(), ApiError>),
    PatientLookedUp(Result<Option<UserInfo>, ApiError>),
    AddOtpSent(Result<(), ApiError>),
    PatientAdded(Result<(), ApiError>),
    PairingOtpIssued(Result<String, ApiError>),
}

/// What the list area should show
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    /// The user has no partners at all
    NoPartners,
    /// Every partner is removed and removed partners are hidden
    NoActivePartners,
    Partners(Vec<&'a PartnerInfo>),
}

#[derive(Debug)]
pub struct PartnerScreenState {
    current_user: UserInfo,
    partners: Vec<PartnerInfo>,
    show_deleted: bool,
    list_loading: bool,
    loaded: bool,
    list_error: Option<String>,
    modal: ActiveModal,
    modal_generation: u64,
    list_generation: u64,
}

impl PartnerScreenState {
    /// Fresh screen for `current_user`. Removed partners start hidden.
    pub fn new(current_user: UserInfo) -> Self {
        Self {
            current_user,
            partners: Vec::new(),
            show_deleted: false,
            list_loading: false,
            loaded: false,
            list_error: None,
            modal: ActiveModal::None,
            modal_generation: next_generation(),
            list_generation: next_generation(),
        }
    }

    pub fn role(&self) -> Role {
        self.current_user.role
    }

    pub fn current_user(&self) -> &UserInfo {
        &self.current_user
    }

    pub fn partners(&self) -> &[PartnerInfo] {
        &self.partners
    }

    pub fn show_deleted(&self) -> bool {
        self.show_deleted
    }

    pub fn is_list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn list_error(&self) -> Option<&str> {
        self.list_error.as_deref()
    }

    pub fn modal(&self) -> &ActiveModal {
        &self.modal
    }

    pub fn selected_partner(&self) -> Option<&PartnerInfo> {
        self.modal.selected_partner()
    }

    /// Screen title, e.g. "Carol's PATIENTS"
    pub fn title(&self) -> String {
        format!("{}'s {}S", self.current_user.name, self.role().partner_label())
    }

    /// Label next to the "show removed" switch
    pub fn toggle_label(&self) -> String {
        if self.show_deleted {
            format!("Including Removed {}", self.role().partner_title())
        } else {
            format!("Showing Active {} only", self.role().partner_title())
        }
    }

    /// Partners to render: everything when removed partners are shown,
    /// otherwise only those without a removal timestamp
    pub fn visible_partners(&self) -> Vec<&PartnerInfo> {
        self.partners
            .iter()
            .filter(|p| self.show_deleted || !p.is_removed())
            .collect()
    }

    pub fn list_view(&self) -> ListView<'_> {
        if self.list_loading && !self.loaded {
            return ListView::Loading;
        }
        if self.partners.is_empty() {
            return ListView::NoPartners;
        }
        let visible = self.visible_partners();
        if visible.is_empty() {
            ListView::NoActivePartners
        } else {
            ListView::Partners(visible)
        }
    }

    // ---- list ----

    /// Fetch on screen entry
    pub fn enter(&mut self) -> Command {
        info!("👥 Entering partner screen as {}", self.role());
        self.refresh()
    }

    /// Re-fetch the list. Any answer to an earlier fetch is dropped.
    pub fn refresh(&mut self) -> Command {
        self.list_generation = next_generation();
        self.list_loading = true;
        Command {
            ticket: Ticket::List(self.list_generation),
            effect: Effect::FetchPartners {
                role: self.role(),
                include_deleted: self.show_deleted,
            },
        }
    }

    pub fn toggle_show_deleted(&mut self) -> Command {
        self.show_deleted = !self.show_deleted;
        debug!("Show removed partners: {}", self.show_deleted);
        self.refresh()
    }

    // ---- delete ----

    /// Bind `partner_id` to a delete confirmation. Only from `Idle`.
    pub fn request_delete(&mut self, partner_id: &str) -> bool {
        if self.modal.is_open() {
            warn!("Ignoring delete request for {}: another dialog is open", partner_id);
            return false;
        }

        let Some(partner) = self.partners.iter().find(|p| p.id == partner_id && !p.is_removed()) else {
            warn!("Ignoring delete request for unknown or removed partner {}", partner_id);
            return false;
        };

        let partner = partner.clone();
        info!("🗑️ Confirming removal of {} ({})", partner.name, partner.id);
        self.set_modal(ActiveModal::ConfirmDelete {
            partner,
            loading: false,
            error: None,
        });
        true
    }

    /// Confirm the bound removal. Patients get an OTP sent first; caregivers
    /// remove the patient directly.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        let ticket = self.modal_ticket();
        let requires_otp = self.role().removal_requires_otp();

        let ActiveModal::ConfirmDelete { partner, loading, error } = &mut self.modal else {
            return None;
        };
        if *loading {
            return None;
        }

        *loading = true;
        *error = None;
        let effect = if requires_otp {
            Effect::SendRemovalOtp {
                caregiver_id: partner.id.clone(),
            }
        } else {
            Effect::RemovePatient {
                patient_id: partner.id.clone(),
            }
        };
        Some(Command { ticket, effect })
    }

    /// Submit the removal OTP typed by the patient
    pub fn submit_removal_otp(&mut self) -> Option<Command> {
        let ticket = self.modal_ticket();
        let ActiveModal::RemovalOtp { partner, form } = &mut self.modal else {
            return None;
        };
        let otp = Self::take_otp(form)?;
        Some(Command {
            ticket,
            effect: Effect::DeleteCaregiver {
                caregiver_id: partner.id.clone(),
                otp,
            },
        })
    }

    // ---- add ----

    /// Floating "add" action. Ignored while a dialog is open or the list loads.
    pub fn open_add_partner(&mut self) -> bool {
        if self.modal.is_open() || self.list_loading {
            return false;
        }

        if self.role().can_add_partner() {
            self.set_modal(ActiveModal::AddPartner(AddPartnerForm::new()));
        } else {
            info!("Patients cannot add caregivers, showing explanation");
            self.set_modal(ActiveModal::AddNotSupported);
        }
        true
    }

    /// A scanned or pasted pairing code: fill the form and look the patient up
    pub fn scan_pairing_code(&mut self, raw: &str) -> Option<Command> {
        let form = self.add_form_mut()?;
        form.pairing_code = raw.to_string();
        self.apply_pairing_code()
    }

    /// Parse the pairing code field of the add form and look the patient up
    pub fn apply_pairing_code(&mut self) -> Option<Command> {
        let form = self.add_form_mut()?;
        if form.loading {
            return None;
        }

        match QrPayload::parse(&form.pairing_code) {
            Ok(payload) => {
                debug!("Pairing code for {} (otp included: {})", payload.id, payload.otp.is_some());
                form.patient_id = payload.id;
                form.otp = payload.otp;
                form.patient = None;
                self.look_up_patient()
            }
            Err(e) => {
                form.error = Some(e.to_string());
                None
            }
        }
    }

    /// The patient id was edited by hand; an OTP from an earlier pairing code no
    /// longer applies
    pub fn patient_id_edited(&mut self) {
        if let Some(form) = self.add_form_mut() {
            form.otp = None;
            form.patient = None;
            form.error = None;
        }
    }

    pub fn look_up_patient(&mut self) -> Option<Command> {
        let ticket = self.modal_ticket();
        let form = self.add_form_mut()?;
        if !form.can_look_up() {
            if !form.loading {
                form.error = Some("Please enter a patient ID.".to_string());
            }
            return None;
        }

        form.loading = true;
        form.error = None;
        form.patient = None;
        Some(Command {
            ticket,
            effect: Effect::LookupPatient {
                patient_id: form.patient_id.trim().to_string(),
            },
        })
    }

    /// Leave the patient details and edit the id again
    pub fn back_to_lookup(&mut self) {
        if let Some(form) = self.add_form_mut() {
            if !form.loading {
                form.patient = None;
                form.error = None;
            }
        }
    }

    /// Add the looked-up patient: directly when the pairing code carried an OTP,
    /// otherwise by sending the patient an OTP first
    pub fn confirm_add(&mut self) -> Option<Command> {
        let ticket = self.modal_ticket();
        let form = self.add_form_mut()?;
        if form.loading {
            return None;
        }
        let patient_id = form.patient.as_ref()?.id.clone();

        form.loading = true;
        form.error = None;
        let effect = match form.otp.clone() {
            Some(otp) => Effect::AddPatient { patient_id, otp },
            None => Effect::SendAddOtp { patient_id },
        };
        Some(Command { ticket, effect })
    }

    pub fn submit_add_otp(&mut self) -> Option<Command> {
        let ticket = self.modal_ticket();
        let ActiveModal::AddOtp { patient_id, form } = &mut self.modal else {
            return None;
        };
        let otp = Self::take_otp(form)?;
        Some(Command {
            ticket,
            effect: Effect::AddPatient {
                patient_id: patient_id.clone(),
                otp,
            },
        })
    }

    // ---- pairing code ----

    /// Patients: fetch an OTP and show this user's pairing code
    pub fn open_pairing_code(&mut self) -> Option<Command> {
        if self.modal.is_open() || self.role() != Role::Patient {
            return None;
        }

        self.set_modal(ActiveModal::PairingCode {
            code: None,
            loading: true,
            error: None,
        });
        Some(Command {
            ticket: self.modal_ticket(),
            effect: Effect::RequestPairingOtp,
        })
    }

    // ---- shared ----

    /// Cancel or dismiss whatever dialog is open. A request still in flight is
    /// not cancelled; its answer will be dropped.
    pub fn dismiss(&mut self) {
        if self.modal.is_open() {
            debug!("Dismissing dialog (in flight: {})", self.modal.is_loading());
            self.set_modal(ActiveModal::None);
        }
    }

    /// OTP field of the open OTP dialog
    pub fn otp_form_mut(&mut self) -> Option<&mut OtpForm> {
        match &mut self.modal {
            ActiveModal::RemovalOtp { form, .. } | ActiveModal::AddOtp { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn add_form_mut(&mut self) -> Option<&mut AddPartnerForm> {
        match &mut self.modal {
            ActiveModal::AddPartner(form) => Some(form),
            _ => None,
        }
    }

    /// Feed back the result of a command. Returns the follow-up command, which
    /// after a successful add or delete is exactly one list refresh.
    pub fn apply(&mut self, ticket: Ticket, outcome: Outcome) -> Option<Command> {
        let current = match ticket {
            Ticket::List(generation) => generation == self.list_generation,
            Ticket::Modal(generation) => generation == self.modal_generation,
        };
        if !current {
            debug!("Dropping stale outcome for {:?}", ticket);
            return None;
        }

        let partner_noun = self.role().partner_role().noun().to_lowercase();

        match outcome {
            Outcome::PartnersLoaded(Ok(partners)) => {
                info!("👥 Loaded {} partners", partners.len());
                self.partners = partners;
                self.list_loading = false;
                self.loaded = true;
                self.list_error = None;
                None
            }
            Outcome::PartnersLoaded(Err(e)) => {
                warn!("❌ Failed to load partners: {}", e);
                self.list_loading = false;
                self.list_error = Some(format!(
                    "Failed to load {}: {}",
                    self.role().partner_title().to_lowercase(),
                    e
                ));
                None
            }

            Outcome::RemovalOtpSent(result) => {
                if !self.role().removal_requires_otp() {
                    warn!("Ignoring removal OTP outcome for a {}", self.role());
                    return None;
                }
                let ActiveModal::ConfirmDelete { partner, loading, error } = &mut self.modal else {
                    return None;
                };
                match result {
                    Ok(()) => {
                        info!("📨 Removal OTP sent for {}", partner.id);
                        let partner = partner.clone();
                        self.set_modal(ActiveModal::RemovalOtp {
                            partner,
                            form: OtpForm::new(),
                        });
                    }
                    Err(e) => {
                        *loading = false;
                        *error = Some(inline_error(&e, SEND_OTP_FAILED_MESSAGE, "Error sending OTP"));
                    }
                }
                None
            }

            Outcome::PatientRemoved(result) => {
                let ActiveModal::ConfirmDelete { loading, error, .. } = &mut self.modal else {
                    return None;
                };
                match result {
                    Ok(()) => self.finish_mutation("Partner removed"),
                    Err(e) => {
                        *loading = false;
                        *error = Some(inline_error(
                            &e,
                            &format!("Failed to remove {}.", partner_noun),
                            &format!("Error removing {}", partner_noun),
                        ));
                        None
                    }
                }
            }

            Outcome::CaregiverDeleted(result) => {
                let ActiveModal::RemovalOtp { form, .. } = &mut self.modal else {
                    return None;
                };
                match result {
                    Ok(()) => self.finish_mutation("Caregiver removed"),
                    Err(e) => {
                        form.loading = false;
                        form.error = Some(inline_error(&e, "Invalid OTP or failed to remove.", "Error"));
                        None
                    }
                }
            }

            Outcome::PatientLookedUp(result) => {
                let form = self.add_form_mut()?;
                form.loading = false;
                match result {
                    Ok(Some(patient)) => {
                        info!("🔎 Found patient {} ({})", patient.name, patient.id);
                        form.patient = Some(patient);
                    }
                    Ok(None) => form.error = Some(PATIENT_NOT_FOUND_MESSAGE.to_string()),
                    Err(e) => form.error = Some(inline_error(&e, PATIENT_NOT_FOUND_MESSAGE, "Error")),
                }
                None
            }

            Outcome::AddOtpSent(result) => {
                let form = self.add_form_mut()?;
                match result {
                    Ok(()) => {
                        let patient_id = form
                            .patient
                            .as_ref()
                            .map(|p| p.id.clone())
                            .unwrap_or_else(|| form.patient_id.trim().to_string());
                        info!("📨 Add OTP sent to patient {}", patient_id);
                        self.set_modal(ActiveModal::AddOtp {
                            patient_id,
                            form: OtpForm::new(),
                        });
                    }
                    Err(e) => {
                        form.loading = false;
                        form.error = Some(inline_error(
                            &e,
                            SEND_OTP_FAILED_MESSAGE,
                            "Network error while sending OTP",
                        ));
                    }
                }
                None
            }

            Outcome::PatientAdded(result) => match result {
                Ok(()) => self.finish_mutation("Patient added"),
                Err(e) => {
                    let message = inline_error(&e, ADD_PATIENT_FAILED_MESSAGE, "Error adding patient");
                    match &mut self.modal {
                        ActiveModal::AddOtp { form, .. } => {
                            form.loading = false;
                            form.error = Some(message);
                        }
                        ActiveModal::AddPartner(form) => {
                            form.loading = false;
                            form.error = Some(message);
                        }
                        _ => {}
                    }
                    None
                }
            },

            Outcome::PairingOtpIssued(result) => {
                let own_id = self.current_user.id.clone();
                let ActiveModal::PairingCode { code, loading, error } = &mut self.modal else {
                    return None;
                };
                *loading = false;
                match result {
                    Ok(otp) => *code = Some(QrPayload::encode(&own_id, &otp)),
                    Err(e) => *error = Some(format!("Could not get a pairing code: {}", e)),
                }
                None
            }
        }
    }

    fn finish_mutation(&mut self, what: &str) -> Option<Command> {
        info!("✅ {}, refreshing list", what);
        self.set_modal(ActiveModal::None);
        Some(self.refresh())
    }

    fn take_otp(form: &mut OtpForm) -> Option<String> {
        if form.loading {
            return None;
        }
        match form.submitted_code() {
            Some(otp) => {
                form.loading = true;
                form.error = None;
                Some(otp)
            }
            None => {
                form.error = Some(EMPTY_OTP_MESSAGE.to_string());
                None
            }
        }
    }

    fn set_modal(&mut self, modal: ActiveModal) {
        self.modal_generation = next_generation();
        self.modal = modal;
    }

    fn modal_ticket(&self) -> Ticket {
        Ticket::Modal(self.modal_generation)
    }
}

/// Short message for a dialog: the fixed `rejected` text when the backend
/// refused, otherwise `failed` with the error detail
fn inline_error(error: &ApiError, rejected: &str, failed: &str) -> String {
    if error.is_rejection() {
        rejected.to_string()
    } else {
        format!("{}: {}", failed, error)
    }
}

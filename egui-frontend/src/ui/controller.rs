//! # Partner Controller
//!
//! Runs the `Effect`s requested by `PartnerScreenState` against a `PartnerApi`
//! and turns each answer into an `Outcome`.
//!
//! ## Usage:
//! The egui app spawns `execute` on its runtime and hands the outcome back to
//! the state on the UI thread. Tests and headless callers use `run`, which
//! applies outcomes directly and keeps going until no follow-up command is left.

use log::debug;
use shared::AddPatientRequest;
use std::sync::Arc;

use super::state::{Command, Effect, Outcome, PartnerScreenState};
use crate::api::PartnerApi;

pub struct PartnerController<A: PartnerApi + ?Sized> {
    api: Arc<A>,
}

impl<A: PartnerApi + ?Sized> Clone for PartnerController<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api) }
    }
}

impl<A: PartnerApi + ?Sized> PartnerController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn execute(&self, effect: Effect) -> Outcome {
        debug!("Executing {:?}", effect);
        match effect {
            Effect::FetchPartners { role, include_deleted } => {
                Outcome::PartnersLoaded(self.api.get_partners(role, include_deleted).await)
            }
            Effect::SendRemovalOtp { caregiver_id } => {
                Outcome::RemovalOtpSent(self.api.send_caregiver_removal_otp(&caregiver_id).await)
            }
            Effect::RemovePatient { patient_id } => {
                Outcome::PatientRemoved(self.api.remove_patient(&patient_id).await)
            }
            Effect::DeleteCaregiver { caregiver_id, otp } => {
                Outcome::CaregiverDeleted(self.api.delete_caregiver(&caregiver_id, &otp).await)
            }
            Effect::LookupPatient { patient_id } => {
                Outcome::PatientLookedUp(self.api.get_user_info(Some(patient_id.as_str())).await)
            }
            Effect::SendAddOtp { patient_id } => {
                Outcome::AddOtpSent(self.api.send_patient_add_otp(&patient_id).await)
            }
            Effect::AddPatient { patient_id, otp } => {
                let request = AddPatientRequest { patient_id, otp };
                Outcome::PatientAdded(self.api.add_patient(&request).await)
            }
            Effect::RequestPairingOtp => Outcome::PairingOtpIssued(self.api.get_pairing_otp().await),
        }
    }

    /// Execute `command` and every follow-up it produces, applying each outcome
    /// to `state`
    pub async fn run(&self, state: &mut PartnerScreenState, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let outcome = self.execute(command.effect).await;
            next = state.apply(command.ticket, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{partner, user, ApiCall, FakePartnerApi};
    use crate::api::ApiError;
    use crate::ui::state::ActiveModal;
    use shared::Role;

    async fn screen(api: &Arc<FakePartnerApi>, role: Role) -> (PartnerController<FakePartnerApi>, PartnerScreenState) {
        let controller = PartnerController::new(Arc::clone(api));
        let mut state = PartnerScreenState::new(user("me", "Carol", role));
        let command = state.enter();
        controller.run(&mut state, command).await;
        (controller, state)
    }

    #[tokio::test]
    async fn test_caregiver_removal_refreshes_once() {
        let api = Arc::new(FakePartnerApi::new(vec![partner("pt-1", "Ada"), partner("pt-2", "Bob")]));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;
        assert_eq!(state.visible_partners().len(), 2);

        state.request_delete("pt-1");
        let command = state.confirm_delete().unwrap();
        controller.run(&mut state, command).await;

        assert_eq!(api.refresh_count(), 2);
        assert_eq!(api.count_calls(|c| matches!(c, ApiCall::SendCaregiverRemovalOtp(_))), 0);
        assert_eq!(state.visible_partners().len(), 1);
        assert!(!state.modal().is_open());
    }

    #[tokio::test]
    async fn test_patient_removal_requires_valid_otp() {
        let api = Arc::new(FakePartnerApi::new(vec![partner("cg-1", "Carl")]));
        let (controller, mut state) = screen(&api, Role::Patient).await;

        state.request_delete("cg-1");
        let command = state.confirm_delete().unwrap();
        controller.run(&mut state, command).await;
        assert!(matches!(state.modal(), ActiveModal::RemovalOtp { .. }));

        state.otp_form_mut().unwrap().code = "000000".to_string();
        let command = state.submit_removal_otp().unwrap();
        controller.run(&mut state, command).await;
        assert_eq!(state.modal().error(), Some("Invalid OTP or failed to remove."));
        assert_eq!(api.refresh_count(), 1);

        state.otp_form_mut().unwrap().code = FakePartnerApi::VALID_OTP.to_string();
        let command = state.submit_removal_otp().unwrap();
        controller.run(&mut state, command).await;

        assert!(!state.modal().is_open());
        assert_eq!(api.refresh_count(), 2);
        assert_eq!(api.count_calls(|c| matches!(c, ApiCall::RemovePatient(_))), 0);
        assert!(state.visible_partners().is_empty());
    }

    #[tokio::test]
    async fn test_failed_removal_does_not_refresh() {
        let api = Arc::new(FakePartnerApi::new(vec![partner("pt-1", "Ada")]));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;
        api.fail("remove_patient", ApiError::Transport("connection reset".to_string()));

        state.request_delete("pt-1");
        let command = state.confirm_delete().unwrap();
        controller.run(&mut state, command).await;

        assert_eq!(api.refresh_count(), 1);
        assert_eq!(state.visible_partners().len(), 1);
        assert_eq!(
            state.modal().error(),
            Some("Error removing patient: network error: connection reset")
        );
    }

    #[tokio::test]
    async fn test_add_via_pairing_code_skips_otp_request() {
        let api = Arc::new(FakePartnerApi::new(Vec::new()).with_user(user("pt-9", "Ada", Role::Patient)));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;

        state.open_add_partner();
        let command = state.scan_pairing_code("pt-9|999000").unwrap();
        controller.run(&mut state, command).await;
        assert_eq!(
            state.add_form_mut().and_then(|f| f.patient.as_ref()).map(|p| p.name.as_str()),
            Some("Ada")
        );

        let command = state.confirm_add().unwrap();
        controller.run(&mut state, command).await;

        assert_eq!(api.count_calls(|c| matches!(c, ApiCall::SendPatientAddOtp(_))), 0);
        assert_eq!(api.refresh_count(), 2);
        assert_eq!(state.visible_partners().len(), 1);
    }

    #[tokio::test]
    async fn test_add_by_id_goes_through_otp_dialog() {
        let api = Arc::new(FakePartnerApi::new(Vec::new()).with_user(user("pt-9", "Ada", Role::Patient)));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;

        state.open_add_partner();
        state.add_form_mut().unwrap().patient_id = "pt-9".to_string();
        let command = state.look_up_patient().unwrap();
        controller.run(&mut state, command).await;

        let command = state.confirm_add().unwrap();
        controller.run(&mut state, command).await;
        assert_eq!(api.count_calls(|c| *c == ApiCall::SendPatientAddOtp("pt-9".to_string())), 1);
        assert!(matches!(state.modal(), ActiveModal::AddOtp { .. }));

        state.otp_form_mut().unwrap().code = FakePartnerApi::VALID_OTP.to_string();
        let command = state.submit_add_otp().unwrap();
        controller.run(&mut state, command).await;

        assert!(!state.modal().is_open());
        assert_eq!(state.visible_partners()[0].id, "pt-9");
    }

    #[tokio::test]
    async fn test_unknown_patient_lookup() {
        let api = Arc::new(FakePartnerApi::new(Vec::new()));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;

        state.open_add_partner();
        let command = state.scan_pairing_code("nobody").unwrap();
        controller.run(&mut state, command).await;

        assert_eq!(state.modal().error(), Some("Patient not found."));
        assert!(state.confirm_add().is_none());
    }

    #[tokio::test]
    async fn test_show_deleted_refetches_with_flag() {
        let api = Arc::new(FakePartnerApi::new(vec![partner("pt-1", "Ada")]));
        let (controller, mut state) = screen(&api, Role::Caregiver).await;

        let command = state.toggle_show_deleted();
        controller.run(&mut state, command).await;

        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::GetPartners {
                role: Role::Caregiver,
                include_deleted: true
            })
        );
    }

    #[tokio::test]
    async fn test_patient_pairing_code() {
        let api = Arc::new(FakePartnerApi::new(Vec::new()));
        let (controller, mut state) = screen(&api, Role::Patient).await;

        let command = state.open_pairing_code().unwrap();
        controller.run(&mut state, command).await;

        assert!(matches!(
            state.modal(),
            ActiveModal::PairingCode { code: Some(code), .. } if code == "me|999000"
        ));
    }
}

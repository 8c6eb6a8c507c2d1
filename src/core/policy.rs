//! Authorization decisions for appointment operations.
//!
//! Every decision matches on [`Role`] exhaustively so a new role cannot
//! silently inherit another role's permissions.

use serde_json::{Map, Value};

use crate::core::errors::ClinicError;
use crate::core::models::{Appointment, Role, UserProfile};

const DOCTOR_UPDATE_FIELDS: &[&str] = &["status", "date", "time", "reason", "notes"];
const PATIENT_UPDATE_FIELDS: &[&str] = &["date", "time", "reason"];

/// Fields a caller of the given role may change through the generic update path.
pub fn update_allow_list(role: Role) -> &'static [&'static str] {
    match role {
        Role::Doctor => DOCTOR_UPDATE_FIELDS,
        Role::Patient => PATIENT_UPDATE_FIELDS,
    }
}

/// Rejects the whole update if any supplied field is outside the caller's allow-list.
pub fn check_update_fields(role: Role, fields: &Map<String, Value>) -> Result<(), ClinicError> {
    let allowed = update_allow_list(role);
    let invalid: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|field| !allowed.contains(field))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ClinicError::validation(format!("Invalid fields: {}", invalid.join(", "))))
    }
}

pub fn require_role(caller: &UserProfile, role: Role) -> Result<(), ClinicError> {
    if caller.role == role {
        return Ok(());
    }
    let message = match role {
        Role::Doctor => "only doctors can perform this action",
        Role::Patient => "only patients can perform this action",
    };
    Err(ClinicError::forbidden(message))
}

/// The caller must be referenced by the appointment in the slot matching their role.
pub fn authorize_update(caller: &UserProfile, appointment: &Appointment) -> Result<(), ClinicError> {
    let permitted = match caller.role {
        Role::Patient => appointment.patient_id == caller.id,
        Role::Doctor => appointment.doctor_id == caller.id,
    };
    if permitted {
        Ok(())
    } else {
        Err(ClinicError::forbidden("you are not authorized to update this appointment"))
    }
}

/// Either participant may cancel, whatever their role.
pub fn authorize_cancel(caller: &UserProfile, appointment: &Appointment) -> Result<(), ClinicError> {
    if appointment.involves(&caller.id) {
        Ok(())
    } else {
        Err(ClinicError::forbidden("you are not authorized to cancel this appointment"))
    }
}

pub mod appointment;
pub mod audit;
pub mod user;

pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, BookingDetails, DoctorAppointment, HistoryEntry,
    NewAppointment, PatientAppointment, PatientHistory,
};
pub use audit::{Activity, AppLog};
pub use user::{NewUser, Registration, Role, User, UserProfile};

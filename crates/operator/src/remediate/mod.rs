mod controller;
mod outcome;

pub use controller::{ActionKind, RemediationController, TriggerTable};
pub use outcome::{ErrorKind, RemediationAction, RemediationOutcome, RemediationStatus};

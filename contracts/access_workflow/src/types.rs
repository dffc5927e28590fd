use soroban_sdk::{contracttype, String};

/// Lifecycle status of an access request.
/// `Approved` and `Rejected` are terminal; a decided request is never
/// reopened, a new request starts a new lifecycle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A patient's decision on a pending request
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decision {
    Approved,
    Rejected,
}

/// One doctor-to-patient access request and its decision.
///
/// Created by the requesting doctor, decided exactly once by the patient,
/// never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub id: u64,
    pub doctor_id: String,
    pub patient_id: String,
    /// Free-text note from the doctor, immutable after creation
    pub message: String,
    pub status: RequestStatus,
    pub requested_at: u64,
    /// Set exactly once, when the status leaves `Pending`
    pub responded_at: Option<u64>,
}

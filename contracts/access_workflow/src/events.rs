use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::RequestStatus;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub identity: Address,
}

pub fn publish_initialized(env: &Env, admin: Address, identity: Address) {
    env.events()
        .publish((symbol_short!("INIT"),), InitializedEvent { admin, identity });
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestCreatedEvent {
    pub request_id: u64,
    pub doctor_id: String,
    pub patient_id: String,
}

pub fn publish_request_created(env: &Env, request_id: u64, doctor_id: String, patient_id: String) {
    env.events().publish(
        (symbol_short!("REQ_NEW"), doctor_id.clone(), patient_id.clone()),
        RequestCreatedEvent {
            request_id,
            doctor_id,
            patient_id,
        },
    );
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestRespondedEvent {
    pub request_id: u64,
    pub doctor_id: String,
    pub patient_id: String,
    pub status: RequestStatus,
}

pub fn publish_request_responded(
    env: &Env,
    request_id: u64,
    doctor_id: String,
    patient_id: String,
    status: RequestStatus,
) {
    env.events().publish(
        (symbol_short!("REQ_DEC"), doctor_id.clone(), patient_id.clone()),
        RequestRespondedEvent {
            request_id,
            doctor_id,
            patient_id,
            status,
        },
    );
}

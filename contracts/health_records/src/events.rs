use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::RecordCategory;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub identity: Address,
    pub access_workflow: Address,
}

pub fn publish_initialized(env: &Env, admin: Address, identity: Address, access_workflow: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            identity,
            access_workflow,
        },
    );
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub patient_id: String,
    pub category: RecordCategory,
}

pub fn publish_record_added(env: &Env, record_id: u64, patient_id: String, category: RecordCategory) {
    env.events().publish(
        (symbol_short!("REC_ADD"), patient_id.clone()),
        RecordAddedEvent {
            record_id,
            patient_id,
            category,
        },
    );
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordUpdatedEvent {
    pub record_id: u64,
    pub patient_id: String,
}

pub fn publish_record_updated(env: &Env, record_id: u64, patient_id: String) {
    env.events().publish(
        (symbol_short!("REC_UPD"), patient_id.clone()),
        RecordUpdatedEvent {
            record_id,
            patient_id,
        },
    );
}

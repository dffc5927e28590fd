use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events()
        .publish((symbol_short!("INIT"),), InitializedEvent { admin });
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient_id: String,
    pub account: Address,
    pub name: String,
}

pub fn publish_patient_registered(env: &Env, patient_id: String, account: Address, name: String) {
    env.events().publish(
        (symbol_short!("PAT_REG"), account.clone()),
        PatientRegisteredEvent {
            patient_id,
            account,
            name,
        },
    );
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRegisteredEvent {
    pub doctor_id: String,
    pub account: Address,
    pub name: String,
}

pub fn publish_doctor_registered(env: &Env, doctor_id: String, account: Address, name: String) {
    env.events().publish(
        (symbol_short!("DOC_REG"), account.clone()),
        DoctorRegisteredEvent {
            doctor_id,
            account,
            name,
        },
    );
}

#![no_std]

pub mod events;
mod validation;

#[cfg(test)]
mod test;

use common::patient_id;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

const TTL_THRESHOLD: u32 = 5_184_000; // ~60 days
const TTL_EXTEND_TO: u32 = 10_368_000; // ~120 days

/// A patient account, keyed by its canonical identifier (e.g. "P0009").
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientAccount {
    pub patient_id: String,
    pub account: Address,
    pub name: String,
    pub registered_at: u64,
    pub is_active: bool,
}

/// A doctor account, keyed by its canonical identifier (e.g. "D0001").
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorAccount {
    pub doctor_id: String,
    pub account: Address,
    pub name: String,
    pub registered_at: u64,
    pub is_active: bool,
}

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum IdentityError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PatientNotFound = 4,
    DoctorNotFound = 5,
    InvalidInput = 6,
    AlreadyRegistered = 7,
}

fn patient_key(patient_id: &String) -> (Symbol, String) {
    (symbol_short!("PAT"), patient_id.clone())
}

fn doctor_key(doctor_id: &String) -> (Symbol, String) {
    (symbol_short!("DOC"), doctor_id.clone())
}

fn patient_addr_key(account: &Address) -> (Symbol, Address) {
    (symbol_short!("PAT_ADR"), account.clone())
}

fn doctor_addr_key(account: &Address) -> (Symbol, Address) {
    (symbol_short!("DOC_ADR"), account.clone())
}

fn extend_ttl_id_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_addr_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

#[contract]
pub struct IdentityContract;

#[contractimpl]
impl IdentityContract {
    /// Initialize the registry with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), IdentityError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(IdentityError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, IdentityError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(IdentityError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Register a patient account under its canonical identifier.
    ///
    /// The raw identifier is canonicalized ("p9" registers as "P0009"); the
    /// identifier and the account address must both be unused.
    pub fn register_patient(
        env: Env,
        account: Address,
        raw_patient_id: String,
        name: String,
    ) -> Result<PatientAccount, IdentityError> {
        account.require_auth();

        validation::validate_name(&name)?;
        let patient_id = patient_id::normalize(&env, &raw_patient_id)
            .map_err(|_| IdentityError::InvalidInput)?;

        let id_key = patient_key(&patient_id);
        let addr_key = patient_addr_key(&account);
        if env.storage().persistent().has(&id_key) || env.storage().persistent().has(&addr_key) {
            return Err(IdentityError::AlreadyRegistered);
        }

        let patient = PatientAccount {
            patient_id: patient_id.clone(),
            account: account.clone(),
            name: name.clone(),
            registered_at: env.ledger().timestamp(),
            is_active: true,
        };

        env.storage().persistent().set(&id_key, &patient);
        extend_ttl_id_key(&env, &id_key);
        env.storage().persistent().set(&addr_key, &patient_id);
        extend_ttl_addr_key(&env, &addr_key);

        events::publish_patient_registered(&env, patient_id, account, name);

        Ok(patient)
    }

    /// Register a doctor account under its canonical identifier.
    pub fn register_doctor(
        env: Env,
        account: Address,
        raw_doctor_id: String,
        name: String,
    ) -> Result<DoctorAccount, IdentityError> {
        account.require_auth();

        validation::validate_name(&name)?;
        let doctor_id = patient_id::normalize(&env, &raw_doctor_id)
            .map_err(|_| IdentityError::InvalidInput)?;

        let id_key = doctor_key(&doctor_id);
        let addr_key = doctor_addr_key(&account);
        if env.storage().persistent().has(&id_key) || env.storage().persistent().has(&addr_key) {
            return Err(IdentityError::AlreadyRegistered);
        }

        let doctor = DoctorAccount {
            doctor_id: doctor_id.clone(),
            account: account.clone(),
            name: name.clone(),
            registered_at: env.ledger().timestamp(),
            is_active: true,
        };

        env.storage().persistent().set(&id_key, &doctor);
        extend_ttl_id_key(&env, &id_key);
        env.storage().persistent().set(&addr_key, &doctor_id);
        extend_ttl_addr_key(&env, &addr_key);

        events::publish_doctor_registered(&env, doctor_id, account, name);

        Ok(doctor)
    }

    /// Get a patient account by canonical identifier
    pub fn get_patient(env: Env, patient_id: String) -> Result<PatientAccount, IdentityError> {
        env.storage()
            .persistent()
            .get(&patient_key(&patient_id))
            .ok_or(IdentityError::PatientNotFound)
    }

    /// Get a doctor account by canonical identifier
    pub fn get_doctor(env: Env, doctor_id: String) -> Result<DoctorAccount, IdentityError> {
        env.storage()
            .persistent()
            .get(&doctor_key(&doctor_id))
            .ok_or(IdentityError::DoctorNotFound)
    }

    /// Check whether a patient account exists for a canonical identifier
    pub fn patient_exists(env: Env, patient_id: String) -> bool {
        let key = patient_key(&patient_id);
        let exists = env.storage().persistent().has(&key);
        if exists {
            extend_ttl_id_key(&env, &key);
        }
        exists
    }

    /// Look up a patient from a user-typed identifier.
    ///
    /// The search path: the input is canonicalized before the lookup, so
    /// "p9", "P009" and "P0009" all resolve to the same account.
    pub fn find_patient(env: Env, raw_patient_id: String) -> Option<PatientAccount> {
        let patient_id = patient_id::normalize(&env, &raw_patient_id).ok()?;
        env.storage().persistent().get(&patient_key(&patient_id))
    }

    /// Canonical patient identifier registered for an address, if any
    pub fn patient_id_of(env: Env, account: Address) -> Option<String> {
        env.storage().persistent().get(&patient_addr_key(&account))
    }

    /// Canonical doctor identifier registered for an address, if any
    pub fn doctor_id_of(env: Env, account: Address) -> Option<String> {
        env.storage().persistent().get(&doctor_addr_key(&account))
    }
}

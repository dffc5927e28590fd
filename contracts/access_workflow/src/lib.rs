#![no_std]

pub mod events;
mod types;
mod validation;


use common::patient_id;
use identity::IdentityContractClient;
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use types::{AccessRequest, Decision, RequestStatus};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const IDENTITY: Symbol = symbol_short!("IDENTITY");
const REQ_CTR: Symbol = symbol_short!("REQ_CTR");

const TTL_THRESHOLD: u32 = 5_184_000; // ~60 days
const TTL_EXTEND_TO: u32 = 10_368_000; // ~120 days

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PatientNotFound = 4,
    RequestNotFound = 5,
    InvalidInput = 6,
    DuplicateRequest = 7,
    AlreadyResponded = 8,
}

fn request_key(request_id: u64) -> (Symbol, u64) {
    (symbol_short!("REQ"), request_id)
}

fn pending_key(doctor_id: &String, patient_id: &String) -> (Symbol, String, String) {
    (symbol_short!("PEND"), doctor_id.clone(), patient_id.clone())
}

fn grant_key(doctor_id: &String, patient_id: &String) -> (Symbol, String, String) {
    (symbol_short!("GRANT"), doctor_id.clone(), patient_id.clone())
}

fn doctor_index_key(doctor_id: &String) -> (Symbol, String) {
    (symbol_short!("DOC_REQ"), doctor_id.clone())
}

fn patient_index_key(patient_id: &String) -> (Symbol, String) {
    (symbol_short!("PAT_REQ"), patient_id.clone())
}

fn extend_ttl_request_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_pair_key(env: &Env, key: &(Symbol, String, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_index_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn identity_addr(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&IDENTITY)
        .ok_or(ContractError::NotInitialized)
}

fn push_index(env: &Env, key: (Symbol, String), request_id: u64) {
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    ids.push_back(request_id);
    env.storage().persistent().set(&key, &ids);
    extend_ttl_index_key(env, &key);
}

fn collect_requests(env: &Env, key: (Symbol, String)) -> Vec<AccessRequest> {
    let ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    let mut requests: Vec<AccessRequest> = Vec::new(env);
    // Ids are appended in creation order; walk backwards for newest first.
    for i in (0..ids.len()).rev() {
        if let Some(id) = ids.get(i) {
            if let Some(request) = env.storage().persistent().get(&request_key(id)) {
                requests.push_back(request);
            }
        }
    }
    requests
}

#[contract]
pub struct AccessWorkflowContract;

#[contractimpl]
impl AccessWorkflowContract {
    /// Initialize the workflow with an admin and the identity registry it
    /// consults for account lookups
    pub fn initialize(env: Env, admin: Address, identity: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&IDENTITY, &identity);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin, identity);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Submit a doctor's request for access to a patient's record.
    ///
    /// The patient identifier is accepted as typed and canonicalized before
    /// any lookup. While a pair already has a pending request, further
    /// requests fail with `DuplicateRequest`; once that request is decided,
    /// a new one may be created regardless of the outcome.
    pub fn create_request(
        env: Env,
        doctor: Address,
        raw_patient_id: String,
        message: String,
    ) -> Result<AccessRequest, ContractError> {
        doctor.require_auth();

        validation::validate_message(&message)?;
        let patient_id = patient_id::normalize(&env, &raw_patient_id)
            .map_err(|_| ContractError::InvalidInput)?;

        let identity = IdentityContractClient::new(&env, &identity_addr(&env)?);
        let doctor_id = identity
            .doctor_id_of(&doctor)
            .ok_or(ContractError::Unauthorized)?;
        if !identity.patient_exists(&patient_id) {
            return Err(ContractError::PatientNotFound);
        }

        // At most one pending request per (doctor, patient) pair; the
        // second of two racing requests observes the marker and loses.
        let pend_key = pending_key(&doctor_id, &patient_id);
        if env.storage().persistent().has(&pend_key) {
            return Err(ContractError::DuplicateRequest);
        }

        let request_id: u64 = env.storage().instance().get(&REQ_CTR).unwrap_or(0) + 1;
        env.storage().instance().set(&REQ_CTR, &request_id);

        let request = AccessRequest {
            id: request_id,
            doctor_id: doctor_id.clone(),
            patient_id: patient_id.clone(),
            message,
            status: RequestStatus::Pending,
            requested_at: env.ledger().timestamp(),
            responded_at: None,
        };

        let req_key = request_key(request_id);
        env.storage().persistent().set(&req_key, &request);
        extend_ttl_request_key(&env, &req_key);

        env.storage().persistent().set(&pend_key, &request_id);
        extend_ttl_pair_key(&env, &pend_key);

        push_index(&env, doctor_index_key(&doctor_id), request_id);
        push_index(&env, patient_index_key(&patient_id), request_id);

        events::publish_request_created(&env, request_id, doctor_id, patient_id);

        Ok(request)
    }

    /// Get an access request by id
    pub fn get_request(env: Env, request_id: u64) -> Result<AccessRequest, ContractError> {
        env.storage()
            .persistent()
            .get(&request_key(request_id))
            .ok_or(ContractError::RequestNotFound)
    }

    /// All requests referencing a patient, newest first
    pub fn list_for_patient(env: Env, patient_id: String) -> Vec<AccessRequest> {
        collect_requests(&env, patient_index_key(&patient_id))
    }

    /// All requests submitted by a doctor, newest first
    pub fn list_for_doctor(env: Env, doctor_id: String) -> Vec<AccessRequest> {
        collect_requests(&env, doctor_index_key(&doctor_id))
    }

    /// Id of the pending request for a pair, if one is open
    pub fn pending_request_id(env: Env, doctor_id: String, patient_id: String) -> Option<u64> {
        env.storage()
            .persistent()
            .get(&pending_key(&doctor_id, &patient_id))
    }

    /// Decide a pending request.
    ///
    /// Only the patient the request references may decide it, and only
    /// while it is still pending: the transition is a compare-and-set on
    /// the status, so the second of two racing responses observes the
    /// terminal status and fails with `AlreadyResponded` instead of
    /// overwriting the first decision.
    pub fn respond(
        env: Env,
        patient: Address,
        request_id: u64,
        decision: Decision,
    ) -> Result<AccessRequest, ContractError> {
        patient.require_auth();

        let req_key = request_key(request_id);
        let mut request: AccessRequest = env
            .storage()
            .persistent()
            .get(&req_key)
            .ok_or(ContractError::RequestNotFound)?;

        let identity = IdentityContractClient::new(&env, &identity_addr(&env)?);
        match identity.patient_id_of(&patient) {
            Some(patient_id) if patient_id == request.patient_id => {}
            _ => return Err(ContractError::Unauthorized),
        }

        if request.status != RequestStatus::Pending {
            return Err(ContractError::AlreadyResponded);
        }

        request.status = match decision {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        };
        request.responded_at = Some(env.ledger().timestamp());

        env.storage().persistent().set(&req_key, &request);
        extend_ttl_request_key(&env, &req_key);

        // The pair is free for a new request once this one is decided.
        env.storage()
            .persistent()
            .remove(&pending_key(&request.doctor_id, &request.patient_id));

        if request.status == RequestStatus::Approved {
            let key = grant_key(&request.doctor_id, &request.patient_id);
            env.storage().persistent().set(&key, &true);
            extend_ttl_pair_key(&env, &key);
        }

        events::publish_request_responded(
            &env,
            request_id,
            request.doctor_id.clone(),
            request.patient_id.clone(),
            request.status.clone(),
        );

        Ok(request)
    }

    /// Whether a doctor currently holds approved access to a patient.
    ///
    /// True iff at least one request for the pair was approved. Every
    /// doctor-side record read must pass this gate first.
    pub fn is_authorized(env: Env, doctor_id: String, patient_id: String) -> bool {
        let key = grant_key(&doctor_id, &patient_id);
        let authorized = env.storage().persistent().get(&key).unwrap_or(false);
        if authorized {
            extend_ttl_pair_key(&env, &key);
        }
        authorized
    }

    /// Total number of requests ever created
    pub fn get_request_count(env: Env) -> u64 {
        env.storage().instance().get(&REQ_CTR).unwrap_or(0)
    }
}

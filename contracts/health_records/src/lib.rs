#![no_std]

pub mod events;
mod types;
mod validation;


use access_workflow::AccessWorkflowContractClient;
use common::patient_id;
use identity::IdentityContractClient;
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use types::{HealthRecord, RecordCategory};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const IDENTITY: Symbol = symbol_short!("IDENTITY");
const ACCESS: Symbol = symbol_short!("ACCESS");
const REC_CTR: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5_184_000; // ~60 days
const TTL_EXTEND_TO: u32 = 10_368_000; // ~120 days

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RecordsError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PatientNotFound = 4,
    RecordNotFound = 5,
    InvalidInput = 6,
    AccessDenied = 7,
}

fn record_key(record_id: u64) -> (Symbol, u64) {
    (symbol_short!("REC"), record_id)
}

fn patient_records_key(patient_id: &String) -> (Symbol, String) {
    (symbol_short!("PAT_REC"), patient_id.clone())
}

fn extend_ttl_record_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_index_key(env: &Env, key: &(Symbol, String)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn identity_addr(env: &Env) -> Result<Address, RecordsError> {
    env.storage()
        .instance()
        .get(&IDENTITY)
        .ok_or(RecordsError::NotInitialized)
}

fn access_addr(env: &Env) -> Result<Address, RecordsError> {
    env.storage()
        .instance()
        .get(&ACCESS)
        .ok_or(RecordsError::NotInitialized)
}

/// The single gate in front of every doctor-side record read.
/// Authorization lives in the workflow contract; a false predicate is an
/// access failure, distinct from any not-found outcome.
fn require_read_access(
    env: &Env,
    doctor_id: &String,
    patient_id: &String,
) -> Result<(), RecordsError> {
    let access = AccessWorkflowContractClient::new(env, &access_addr(env)?);
    if !access.is_authorized(doctor_id, patient_id) {
        return Err(RecordsError::AccessDenied);
    }
    Ok(())
}

#[contract]
pub struct HealthRecordsContract;

#[contractimpl]
impl HealthRecordsContract {
    /// Initialize the record store with an admin and the identity and
    /// access-workflow contracts it consults
    pub fn initialize(
        env: Env,
        admin: Address,
        identity: Address,
        access_workflow: Address,
    ) -> Result<(), RecordsError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(RecordsError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&IDENTITY, &identity);
        env.storage().instance().set(&ACCESS, &access_workflow);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin, identity, access_workflow);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, RecordsError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(RecordsError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// File a new record entry for the calling patient
    pub fn add_record(
        env: Env,
        patient: Address,
        category: RecordCategory,
        title: String,
        data_hash: String,
    ) -> Result<HealthRecord, RecordsError> {
        patient.require_auth();

        validation::validate_title(&title)?;
        validation::validate_data_hash(&data_hash)?;

        let identity = IdentityContractClient::new(&env, &identity_addr(&env)?);
        let patient_id = identity
            .patient_id_of(&patient)
            .ok_or(RecordsError::Unauthorized)?;

        let record_id: u64 = env.storage().instance().get(&REC_CTR).unwrap_or(0) + 1;
        env.storage().instance().set(&REC_CTR, &record_id);

        let record = HealthRecord {
            id: record_id,
            patient_id: patient_id.clone(),
            category: category.clone(),
            title,
            data_hash,
            created_at: env.ledger().timestamp(),
            updated_at: env.ledger().timestamp(),
        };

        let key = record_key(record_id);
        env.storage().persistent().set(&key, &record);
        extend_ttl_record_key(&env, &key);

        let index_key = patient_records_key(&patient_id);
        let mut record_ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&index_key)
            .unwrap_or(Vec::new(&env));
        record_ids.push_back(record_id);
        env.storage().persistent().set(&index_key, &record_ids);
        extend_ttl_index_key(&env, &index_key);

        events::publish_record_added(&env, record_id, patient_id, category);

        Ok(record)
    }

    /// Update a record entry's title and content pointer
    pub fn update_record(
        env: Env,
        patient: Address,
        record_id: u64,
        title: String,
        data_hash: String,
    ) -> Result<HealthRecord, RecordsError> {
        patient.require_auth();

        validation::validate_title(&title)?;
        validation::validate_data_hash(&data_hash)?;

        let key = record_key(record_id);
        let mut record: HealthRecord = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(RecordsError::RecordNotFound)?;

        let identity = IdentityContractClient::new(&env, &identity_addr(&env)?);
        match identity.patient_id_of(&patient) {
            Some(patient_id) if patient_id == record.patient_id => {}
            _ => return Err(RecordsError::Unauthorized),
        }

        record.title = title;
        record.data_hash = data_hash;
        record.updated_at = env.ledger().timestamp();

        env.storage().persistent().set(&key, &record);
        extend_ttl_record_key(&env, &key);

        events::publish_record_updated(&env, record_id, record.patient_id.clone());

        Ok(record)
    }

    /// Get a record entry by id
    pub fn get_record(env: Env, record_id: u64) -> Result<HealthRecord, RecordsError> {
        env.storage()
            .persistent()
            .get(&record_key(record_id))
            .ok_or(RecordsError::RecordNotFound)
    }

    /// Ids of all records filed for a patient
    pub fn get_patient_records(env: Env, patient_id: String) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&patient_records_key(&patient_id))
            .unwrap_or(Vec::new(&env))
    }

    /// Read a patient's record entries as an authorized doctor.
    ///
    /// The target identifier is accepted as typed and canonicalized before
    /// lookup. The caller must be a registered doctor holding an approved
    /// access grant for the patient.
    pub fn read_patient_records(
        env: Env,
        doctor: Address,
        raw_patient_id: String,
    ) -> Result<Vec<HealthRecord>, RecordsError> {
        doctor.require_auth();

        let patient_id = patient_id::normalize(&env, &raw_patient_id)
            .map_err(|_| RecordsError::InvalidInput)?;

        let identity = IdentityContractClient::new(&env, &identity_addr(&env)?);
        let doctor_id = identity
            .doctor_id_of(&doctor)
            .ok_or(RecordsError::Unauthorized)?;
        if !identity.patient_exists(&patient_id) {
            return Err(RecordsError::PatientNotFound);
        }

        require_read_access(&env, &doctor_id, &patient_id)?;

        let record_ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&patient_records_key(&patient_id))
            .unwrap_or(Vec::new(&env));

        let mut records: Vec<HealthRecord> = Vec::new(&env);
        for id in record_ids.iter() {
            if let Some(record) = env.storage().persistent().get(&record_key(id)) {
                records.push_back(record);
            }
        }

        Ok(records)
    }

    /// Total number of records ever filed
    pub fn get_record_count(env: Env) -> u64 {
        env.storage().instance().get(&REC_CTR).unwrap_or(0)
    }
}

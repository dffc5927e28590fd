use soroban_sdk::{contracttype, String};

/// Structured record categories a patient files entries under
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordCategory {
    Demographics,
    Medication,
    Vaccination,
    Allergy,
    Condition,
    Document,
}

/// One structured health record entry.
///
/// The payload lives in off-chain storage; the ledger keeps a validated
/// content pointer alongside the owning patient's canonical identifier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub id: u64,
    pub patient_id: String,
    pub category: RecordCategory,
    pub title: String,
    pub data_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

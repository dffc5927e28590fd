#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::*;

fn setup(env: &Env) -> IdentityContractClient<'_> {
    env.mock_all_auths();

    let contract_id = env.register(IdentityContract, ());
    let client = IdentityContractClient::new(env, &contract_id);

    let admin = Address::generate(env);
    client.initialize(&admin);

    client
}

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(IdentityContract, ());
    let client = IdentityContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), admin);

    let result = client.try_initialize(&admin);
    assert_eq!(result, Err(Ok(IdentityError::AlreadyInitialized)));
}

#[test]
fn test_register_patient_canonicalizes_identifier() {
    let env = Env::default();
    let client = setup(&env);

    let account = Address::generate(&env);
    let patient = client.register_patient(
        &account,
        &String::from_str(&env, "p9"),
        &String::from_str(&env, "Ada Osei"),
    );

    assert_eq!(patient.patient_id, String::from_str(&env, "P0009"));
    assert_eq!(patient.account, account);
    assert!(patient.is_active);

    let fetched = client.get_patient(&String::from_str(&env, "P0009"));
    assert_eq!(fetched, patient);
    assert!(client.patient_exists(&String::from_str(&env, "P0009")));
}

#[test]
fn test_find_patient_tolerates_input_variation() {
    let env = Env::default();
    let client = setup(&env);

    let account = Address::generate(&env);
    client.register_patient(
        &account,
        &String::from_str(&env, "P0009"),
        &String::from_str(&env, "Ada Osei"),
    );

    let found = client.find_patient(&String::from_str(&env, "  p9 ")).unwrap();
    assert_eq!(found.patient_id, String::from_str(&env, "P0009"));

    assert_eq!(client.find_patient(&String::from_str(&env, "p42")), None);
    assert_eq!(client.find_patient(&String::from_str(&env, "p_9")), None);
}

#[test]
fn test_duplicate_identifier_rejected() {
    let env = Env::default();
    let client = setup(&env);

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.register_patient(
        &first,
        &String::from_str(&env, "P0009"),
        &String::from_str(&env, "Ada Osei"),
    );

    // Same identifier, differently typed, different account.
    let result = client.try_register_patient(
        &second,
        &String::from_str(&env, "p9"),
        &String::from_str(&env, "Kofi Mensah"),
    );
    assert_eq!(result, Err(Ok(IdentityError::AlreadyRegistered)));
}

#[test]
fn test_account_registers_once() {
    let env = Env::default();
    let client = setup(&env);

    let account = Address::generate(&env);
    client.register_patient(
        &account,
        &String::from_str(&env, "P0009"),
        &String::from_str(&env, "Ada Osei"),
    );

    let result = client.try_register_patient(
        &account,
        &String::from_str(&env, "P0010"),
        &String::from_str(&env, "Ada Osei"),
    );
    assert_eq!(result, Err(Ok(IdentityError::AlreadyRegistered)));
}

#[test]
fn test_register_rejects_malformed_input() {
    let env = Env::default();
    let client = setup(&env);

    let account = Address::generate(&env);

    let result = client.try_register_patient(
        &account,
        &String::from_str(&env, "p 9"),
        &String::from_str(&env, "Ada Osei"),
    );
    assert_eq!(result, Err(Ok(IdentityError::InvalidInput)));

    let result = client.try_register_patient(
        &account,
        &String::from_str(&env, "P0009"),
        &String::from_str(&env, "A"),
    );
    assert_eq!(result, Err(Ok(IdentityError::InvalidInput)));
}

#[test]
fn test_register_doctor_and_reverse_lookup() {
    let env = Env::default();
    let client = setup(&env);

    let account = Address::generate(&env);
    let doctor = client.register_doctor(
        &account,
        &String::from_str(&env, "d1"),
        &String::from_str(&env, "Dr. Imani Okafor"),
    );

    assert_eq!(doctor.doctor_id, String::from_str(&env, "D0001"));
    assert_eq!(
        client.doctor_id_of(&account),
        Some(String::from_str(&env, "D0001"))
    );
    assert_eq!(client.patient_id_of(&account), None);

    let fetched = client.get_doctor(&String::from_str(&env, "D0001"));
    assert_eq!(fetched, doctor);
}

#[test]
fn test_get_missing_accounts() {
    let env = Env::default();
    let client = setup(&env);

    let result = client.try_get_patient(&String::from_str(&env, "P0404"));
    assert_eq!(result, Err(Ok(IdentityError::PatientNotFound)));

    let result = client.try_get_doctor(&String::from_str(&env, "D0404"));
    assert_eq!(result, Err(Ok(IdentityError::DoctorNotFound)));

    assert!(!client.patient_exists(&String::from_str(&env, "P0404")));
}

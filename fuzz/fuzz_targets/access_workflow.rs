#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

use access_workflow::{
    AccessWorkflowContract, AccessWorkflowContractClient, Decision, RequestStatus,
};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Request { second_doctor: bool },
    Respond { request_id: u8, approve: bool },
}

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 24 {
        return;
    }

    let env = Env::default();
    env.mock_all_auths();

    let identity_id = env.register(identity::IdentityContract, ());
    let registry = identity::IdentityContractClient::new(&env, &identity_id);
    let admin = Address::generate(&env);
    registry.initialize(&admin);

    let workflow_id = env.register(AccessWorkflowContract, ());
    let client = AccessWorkflowContractClient::new(&env, &workflow_id);
    client.initialize(&admin, &identity_id);

    let patient = Address::generate(&env);
    registry.register_patient(
        &patient,
        &String::from_str(&env, "p9"),
        &String::from_str(&env, "Ada Osei"),
    );
    let patient_id = String::from_str(&env, "P0009");

    let doctors = [Address::generate(&env), Address::generate(&env)];
    registry.register_doctor(
        &doctors[0],
        &String::from_str(&env, "d1"),
        &String::from_str(&env, "Dr. Imani Okafor"),
    );
    registry.register_doctor(
        &doctors[1],
        &String::from_str(&env, "d2"),
        &String::from_str(&env, "Dr. Femi Adeyemi"),
    );
    let doctor_ids = [
        String::from_str(&env, "D0001"),
        String::from_str(&env, "D0002"),
    ];

    let mut approved = [false, false];

    for op in ops {
        match op {
            Op::Request { second_doctor } => {
                let caller = &doctors[second_doctor as usize];
                let _ = client.try_create_request(
                    caller,
                    &String::from_str(&env, "P0009"),
                    &String::from_str(&env, ""),
                );
            }
            Op::Respond {
                request_id,
                approve,
            } => {
                let id = (request_id as u64) % (client.get_request_count() + 1);
                let before = client.try_get_request(&id);
                let decision = if approve {
                    Decision::Approved
                } else {
                    Decision::Rejected
                };
                let result = client.try_respond(&patient, &id, &decision);

                if let Ok(Ok(decided)) = &result {
                    if decided.status == RequestStatus::Approved {
                        for (i, doctor_id) in doctor_ids.iter().enumerate() {
                            if decided.doctor_id == *doctor_id {
                                approved[i] = true;
                            }
                        }
                    }
                }

                // Terminal statuses never change, whatever the retry does.
                if let Ok(Ok(prev)) = before {
                    if prev.status != RequestStatus::Pending {
                        assert!(result.is_err());
                        assert_eq!(client.get_request(&id), prev);
                    }
                }
            }
        }

        for (i, doctor_id) in doctor_ids.iter().enumerate() {
            let pending = client
                .list_for_doctor(doctor_id)
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count();
            assert!(pending <= 1);
            assert_eq!(client.is_authorized(doctor_id, &patient_id), approved[i]);
        }
    }
});

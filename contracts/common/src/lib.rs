#![no_std]

pub mod patient_id;

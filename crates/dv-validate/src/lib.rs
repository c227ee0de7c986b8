#![deny(unsafe_code)]

pub mod validator;

pub use validator::{Issue, Severity, ValidationReport, Validator, validate_schema};

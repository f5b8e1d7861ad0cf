//! Domain entities

pub mod otp_record;

pub use otp_record::{OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};

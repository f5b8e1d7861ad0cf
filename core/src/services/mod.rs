//! Business services

pub mod otp;
pub mod password_reset;

pub use otp::{
    generate_code, Clock, CodeGenerator, IssuedOtp, ManualClock, OtpStore, SecureCodeGenerator,
    SystemClock, VerifyOutcome,
};
pub use password_reset::{
    NotificationSender, PasswordResetConfig, PasswordResetService, RequestOtpResult,
};

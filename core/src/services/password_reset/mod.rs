//! Password reset workflow driven by one-time passcodes
//!
//! This module wires the OTP store to the outside world:
//! - Issuing a code and handing it to a notification sender
//! - Verifying a submitted code without consuming it
//! - Finalizing the reset: re-verifying, storing the new password hash,
//!   then clearing the code

mod config;
mod service;
mod traits;
mod types;


pub use config::{PasswordResetConfig, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use service::PasswordResetService;
pub use traits::NotificationSender;
pub use types::RequestOtpResult;

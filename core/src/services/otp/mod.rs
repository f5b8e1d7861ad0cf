//! One-time passcode lifecycle
//!
//! - `generator` produces uniformly random 6-digit codes
//! - `store` keeps the single outstanding code per identifier, with
//!   lazy and scheduled expiry
//! - `clock` abstracts the current instant so expiry can be simulated

mod clock;
mod generator;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::{generate_code, CodeGenerator, SecureCodeGenerator};
pub use store::{IssuedOtp, OtpStore, VerifyOutcome};

//! Passcode generation

use rand::{rngs::OsRng, Rng};

use crate::domain::entities::otp_record::CODE_LENGTH;

/// Exclusive upper bound of the numeric code space (10^CODE_LENGTH)
const CODE_SPACE: u32 = 1_000_000;

/// Produces fresh passcodes
pub trait CodeGenerator: Send + Sync {
    /// Return a code of exactly `CODE_LENGTH` ASCII digits
    fn generate(&self) -> String;
}

/// Generator backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generate a cryptographically secure random 6-digit code
///
/// `gen_range` samples uniformly over `0..1_000_000` (rejection sampling,
/// no modulo bias), so every digit position is independent and uniform.
/// Leading zeros are kept.
pub fn generate_code() -> String {
    let code = OsRng.gen_range(0..CODE_SPACE);
    format!("{:0width$}", code, width = CODE_LENGTH)
}

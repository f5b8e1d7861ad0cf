pub mod password_reset;

pub use password_reset::{
    RequestOtpResponse, ResetPasswordRequest, SetNewPasswordRequest, VerifyOtpRequest,
};

//! Email templates

/// Validity window quoted when the sender is not told otherwise
pub const DEFAULT_EXPIRY_MINUTES: i64 = 10;

/// Subject line of the password reset email
pub fn otp_email_subject(app_name: &str) -> String {
    format!("Password Reset OTP - {}", app_name)
}

/// HTML body of the password reset email
pub fn otp_email_html(app_name: &str, code: &str, expiry_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Password Reset OTP</title>
</head>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 20px;">
  <div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; padding: 30px;">
    <h1 style="color: #333333; text-align: center;">{app_name}</h1>
    <h2 style="color: #555555;">Password Reset Request</h2>
    <p style="color: #666666;">You requested to reset your password. Use the following OTP to proceed:</p>
    <div style="background-color: #f0f0f0; border-radius: 4px; padding: 20px; text-align: center; margin: 20px 0;">
      <span style="font-size: 32px; font-weight: bold; letter-spacing: 8px; color: #333333;">{code}</span>
    </div>
    <p style="color: #666666;">This OTP will expire in {expiry_minutes} minutes.</p>
    <p style="color: #666666;">If you did not request a password reset, please ignore this email.</p>
    <p style="color: #999999; font-size: 12px;">Never share this code with anyone.</p>
  </div>
</body>
</html>"#,
        app_name = app_name,
        code = code,
        expiry_minutes = expiry_minutes,
    )
}

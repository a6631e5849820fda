//! Email copy for verification and login codes

use c2e_core::domain::entities::verification_code::CodePurpose;

/// Subject line for a code email
pub fn subject(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Registration => "Chess2Earn - Verify Your Email",
        CodePurpose::Login => "Chess2Earn - Login Code",
    }
}

/// HTML body for a code email
pub fn html_body(code: &str, display_name: Option<&str>, purpose: CodePurpose) -> String {
    let (greeting, lead, footer) = match purpose {
        CodePurpose::Registration => (
            match display_name {
                Some(name) => format!("Welcome to Chess2Earn, {}!", name),
                None => "Welcome to Chess2Earn!".to_string(),
            },
            "Thank you for signing up. Please use the verification code below to complete your registration:",
            "If you didn't request this code, please ignore this email.",
        ),
        CodePurpose::Login => (
            "Chess2Earn Login".to_string(),
            "Here's your login verification code:",
            "If you didn't request this code, please secure your account immediately.",
        ),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">{greeting}</h2>
  <p>{lead}</p>
  <div style="background-color: #f4f4f4; padding: 20px; text-align: center; font-size: 32px; font-weight: bold; letter-spacing: 5px; margin: 20px 0;">
    {code}
  </div>
  <p style="color: #666;">This code will expire in 15 minutes.</p>
  <p style="color: #999; font-size: 12px; margin-top: 30px;">{footer}</p>
</div>"#
    )
}

//! Email content for verification codes

use vm_core::domain::entities::verification_code::CodePurpose;

/// Rendered content for one verification email
pub struct VerificationEmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl VerificationEmailContent {
    /// Render subject and bodies for a code and the flow it belongs to
    pub fn new(code: &str, purpose: CodePurpose, expire_minutes: i64) -> Self {
        let action = match purpose {
            CodePurpose::Register => "complete your registration",
            CodePurpose::Login => "sign in to your account",
            CodePurpose::ResetPassword => "reset your password",
        };

        Self {
            subject: format!("Your VeriMail verification code: {}", code),
            text: format!(
                "Use this code to {}:\n\n{}\n\nThe code expires in {} minutes. \
                 If you didn't request it, please ignore this email.\n",
                action, code, expire_minutes
            ),
            html: format!(
                r#"<html><body style="font-family: sans-serif">
<p>Use this code to {}:</p>
<p style="font-size: 28px; font-weight: bold; letter-spacing: 6px">{}</p>
<p>The code expires in {} minutes. If you didn't request it, please ignore this email.</p>
</body></html>"#,
                action, code, expire_minutes
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_contains_code() {
        let content = VerificationEmailContent::new("123456", CodePurpose::Register, 5);
        assert!(content.subject.contains("123456"));
        assert!(content.text.contains("123456"));
        assert!(content.html.contains("123456"));
        assert!(content.text.contains("registration"));
    }

    #[test]
    fn test_content_varies_by_purpose() {
        let login = VerificationEmailContent::new("123456", CodePurpose::Login, 5);
        let reset = VerificationEmailContent::new("123456", CodePurpose::ResetPassword, 5);
        assert!(login.text.contains("sign in"));
        assert!(reset.text.contains("reset your password"));
    }
}

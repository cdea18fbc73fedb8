//! Verification email content.

use super::user::{OrganizationType, UserRole, VerificationPin};

/// Rendered verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMessage {
    pub subject: String,
    pub html_body: String,
}

impl VerificationMessage {
    /// Compose the message sent after signup.
    ///
    /// The subject names the user type; the body also names the organization
    /// sub-type where one applies. The PIN is the only dynamic payload.
    pub fn compose(role: &UserRole, pin: &VerificationPin) -> Self {
        let user_type = role.user_type();
        let registration = match role {
            UserRole::Organization {
                organization_type: OrganizationType::Donor,
                ..
            } => "donor organization",
            UserRole::Organization {
                organization_type: OrganizationType::Recipient,
                ..
            } => "recipient organization",
            UserRole::Individual | UserRole::Admin { .. } => user_type.as_str(),
        };

        let subject = format!("Don't reply: Verify Your Email ({user_type})");
        let html_body = format!(
            "<h2>Your verification PIN is:</h2>\n\
             <p>{pin}</p>\n\
             <p>Enter this PIN to verify your email for {registration} registration.</p>\n"
        );
        Self { subject, html_body }
    }
}

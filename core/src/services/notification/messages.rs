//! Builders for the transactional mails the auth flow sends.
//!
//! Plain text plus minimal HTML; full templating is outside this core.

use super::EmailMessage;

/// Account-verification OTP delivery
pub fn otp_email(to: &str, name: &str, code: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Verify your account".to_string(),
        text_body: format!(
            "Hello {name},\n\nYour verification code is {code}. It expires in 10 minutes.\n"
        ),
        html_body: format!(
            "<p>Hello {name},</p><p>Your verification code is <b>{code}</b>. \
             It expires in 10 minutes.</p>"
        ),
    }
}

/// Password-reset link delivery
pub fn password_reset_email(to: &str, name: &str, reset_url: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Password Reset Request".to_string(),
        text_body: format!(
            "Hello {name},\n\nUse the link below to reset your password. \
             It expires in 15 minutes:\n\n{reset_url}\n"
        ),
        html_body: format!(
            "<p>Hello {name},</p><p>Click the link below to reset your password. \
             This link expires in 15 minutes:</p><a href=\"{reset_url}\">{reset_url}</a>"
        ),
    }
}

/// New-login security alert
pub fn login_alert_email(to: &str, name: &str, ip: &str, user_agent: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Security Alert: New Login Detected".to_string(),
        text_body: format!(
            "Hello {name},\n\nA new login to your account was detected.\n\
             IP address: {ip}\nDevice: {user_agent}\n\n\
             If this was not you, please change your password immediately.\n"
        ),
        html_body: format!(
            "<p>Hello {name},</p><p>A new login to your account was detected.</p>\
             <p>IP address: {ip}<br>Device: {user_agent}</p>\
             <p>If this was not you, please change your password immediately.</p>"
        ),
    }
}

/// Password-change confirmation alert
pub fn password_change_email(to: &str, name: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Password Change Alert".to_string(),
        text_body: format!(
            "Hello {name},\n\nYour password was just changed. \
             If this was not you, please reset your password immediately.\n"
        ),
        html_body: format!(
            "<p>Hello {name},</p><p>Your password was just changed. \
             If this was not you, please reset your password immediately.</p>"
        ),
    }
}

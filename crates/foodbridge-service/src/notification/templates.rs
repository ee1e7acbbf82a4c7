//! Text of in-app notifications and outbound mail.

use foodbridge_core::traits::OutgoingMail;
use foodbridge_entity::donation::Donation;
use foodbridge_entity::notification::{NewNotification, NotificationKind};
use foodbridge_entity::user::User;

/// Notice to a donor that their listing was created.
pub fn donation_created(donation: &Donation) -> NewNotification {
    NewNotification::new(
        donation.donor_id,
        NotificationKind::DonationCreated,
        "Donation Created",
        format!(
            "Your donation \"{}\" has been created successfully",
            donation.title
        ),
    )
    .about(donation.id)
}

/// Notice to a nearby charity that a new listing is available.
pub fn new_donation(charity: &User, donation: &Donation) -> NewNotification {
    NewNotification::new(
        charity.id,
        NotificationKind::NewDonation,
        "New Donation Available",
        format!(
            "New donation \"{}\" is available in your area",
            donation.title
        ),
    )
    .about(donation.id)
}

/// Notice to a donor that a charity accepted their listing.
pub fn donation_accepted(donation: &Donation, charity_name: &str) -> NewNotification {
    NewNotification::new(
        donation.donor_id,
        NotificationKind::DonationAccepted,
        "Donation Accepted",
        format!(
            "Your donation \"{}\" has been accepted by {}",
            donation.title, charity_name
        ),
    )
    .about(donation.id)
}

/// Notice to a charity that an admin verified it.
pub fn charity_verified(charity: &User) -> NewNotification {
    NewNotification::new(
        charity.id,
        NotificationKind::CharityVerified,
        "Account Verified",
        "Your charity account has been verified by the admin. \
         You can now start accepting donations.",
    )
}

/// Mail sent to a charity right after registration.
pub fn registration_under_review_mail(charity: &User) -> OutgoingMail {
    OutgoingMail::new(
        &charity.email,
        "Verify Your Food Bridge Charity Account",
        format!(
            "<h1>Welcome to Food Bridge!</h1>\
             <p>Dear {},</p>\
             <p>Thank you for registering as a charity organization with Food Bridge. \
             Your account is currently under review.</p>\
             <p>We will notify you once your account has been verified by our admin team.</p>\
             <p>Best regards,<br>The Food Bridge Team</p>",
            escape(&charity.name)
        ),
    )
}

/// Mail sent to a donor when a charity accepts their listing.
pub fn donation_accepted_mail(
    donor: &User,
    charity_name: &str,
    donation: &Donation,
) -> OutgoingMail {
    OutgoingMail::new(
        &donor.email,
        "Your Donation Has Been Accepted!",
        format!(
            "<h1>Donation Accepted</h1>\
             <p>Dear {},</p>\
             <p>Your donation \"{}\" has been accepted by {}.</p>\
             <p>They will contact you shortly to arrange the pickup.</p>\
             <p>Thank you for making a difference!</p>\
             <p>Best regards,<br>The Food Bridge Team</p>",
            escape(&donor.name),
            escape(&donation.title),
            escape(charity_name)
        ),
    )
}

/// Mail sent to a charity once an admin verifies it.
pub fn charity_verified_mail(charity: &User) -> OutgoingMail {
    OutgoingMail::new(
        &charity.email,
        "Your Food Bridge Account Has Been Verified!",
        format!(
            "<h1>Account Verified</h1>\
             <p>Dear {},</p>\
             <p>Congratulations! Your Food Bridge charity account has been verified \
             by our admin team.</p>\
             <p>You can now start accepting donations through our platform.</p>\
             <p>Best regards,<br>The Food Bridge Team</p>",
            escape(&charity.name)
        ),
    )
}

/// Escape text for inclusion in an HTML body.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

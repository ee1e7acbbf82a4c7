//! Donation lifecycle scenarios against the in-memory store.

mod common;

use std::sync::Arc;

use foodbridge_core::error::ErrorKind;
use foodbridge_database::store::DonationStore;
use foodbridge_entity::donation::DonationStatus;
use foodbridge_entity::notification::NotificationKind;
use uuid::Uuid;

use common::{Harness, donation_input};

#[tokio::test]
async fn test_create_notifies_donor_and_city_charities() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let near_a = h.charity("a@example.com", "Springfield", true).await;
    let near_b = h.charity("b@example.com", "Springfield", true).await;
    let unverified = h.charity("c@example.com", "Springfield", false).await;
    let elsewhere = h.charity("d@example.com", "Shelbyville", true).await;

    let outcome = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap();

    assert!(outcome.is_clean());
    let donation = outcome.value;
    assert_eq!(donation.status, DonationStatus::Available);
    assert_eq!(donation.donor_id, donor.user_id);

    let donor_notes = h.unread(&donor).await;
    assert_eq!(donor_notes.len(), 1);
    assert_eq!(donor_notes[0].kind, NotificationKind::DonationCreated);
    assert_eq!(donor_notes[0].related_donation_id, Some(donation.id));

    for charity in [&near_a, &near_b] {
        let notes = h.unread(charity).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::NewDonation);
    }
    assert!(h.unread(&unverified).await.is_empty());
    assert!(h.unread(&elsewhere).await.is_empty());
}

#[tokio::test]
async fn test_create_ignores_supplied_status() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let mut input = donation_input("Springfield");
    input.status = Some("completed".to_string());

    let donation = h.donations.create(&donor, input).await.unwrap().value;
    assert_eq!(donation.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_only_donors_create() {
    let h = Harness::new();
    let charity = h.charity("c@example.com", "Springfield", true).await;

    let err = h
        .donations
        .create(&charity, donation_input("Springfield"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_create_reports_first_invalid_field() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let mut input = donation_input("Springfield");
    input.quantity_unit = None;
    input.pickup_address = None;

    let err = h.donations.create(&donor, input).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.field.as_deref(), Some("quantityUnit"));
}

#[tokio::test]
async fn test_notification_failure_does_not_revert_create() {
    let h = Harness::with_failing_notifications();
    let donor = h.donor("donor@example.com").await;
    h.charity("a@example.com", "Springfield", true).await;

    let outcome = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap();

    assert_eq!(outcome.warnings.len(), 2);
    assert!(outcome.warnings.iter().all(|w| w.kind == ErrorKind::Dependency));
    let stored = h.store.find_by_id(outcome.value.id).await.unwrap();
    assert_eq!(stored.unwrap().status, DonationStatus::Available);
}

#[tokio::test]
async fn test_accept_mails_donor_when_notification_fails() {
    let h = Harness::with_failing_notifications();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let outcome = h.donations.accept(&charity, donation.id).await.unwrap();

    assert_eq!(outcome.value.status, DonationStatus::Accepted);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].effect, "notification:donation_accepted");
    assert_eq!(outcome.warnings[0].kind, ErrorKind::Dependency);
    assert_eq!(h.mailer.sent_to("donor@example.com").len(), 1);
}

#[tokio::test]
async fn test_accept_notifies_donor_when_charity_lookup_fails() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let outcome = h
        .donations_unable_to_read(charity.user_id)
        .accept(&charity, donation.id)
        .await
        .unwrap();

    assert_eq!(outcome.value.status, DonationStatus::Accepted);
    assert!(outcome.is_clean());
    let notice = h
        .unread(&donor)
        .await
        .into_iter()
        .find(|n| n.kind == NotificationKind::DonationAccepted)
        .expect("donor was notified");
    assert!(notice.message.ends_with("accepted by a charity"));
    let mails = h.mailer.sent_to("donor@example.com");
    assert_eq!(mails.len(), 1);
    assert!(mails[0].body.contains("accepted by a charity"));
}

#[tokio::test]
async fn test_verified_charity_accepts() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let outcome = h.donations.accept(&charity, donation.id).await.unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.value.status, DonationStatus::Accepted);
    assert_eq!(outcome.value.accepted_by, Some(charity.user_id));
    assert!(outcome.value.accepted_at.is_some());

    let accepted_notes: Vec<_> = h
        .unread(&donor)
        .await
        .into_iter()
        .filter(|n| n.kind == NotificationKind::DonationAccepted)
        .collect();
    assert_eq!(accepted_notes.len(), 1);
    assert_eq!(h.mailer.sent_to("donor@example.com").len(), 1);
}

#[tokio::test]
async fn test_unverified_charity_cannot_accept() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", false).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let err = h.donations.accept(&charity, donation.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let stored = h.store.find_by_id(donation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DonationStatus::Available);
    assert!(stored.accepted_by.is_none());
}

#[tokio::test]
async fn test_donor_cannot_accept() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let err = h.donations.accept(&donor, donation.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_accept_checks_state_before_role() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let first = h.charity("a@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;
    h.donations.accept(&first, donation.id).await.unwrap();

    // A donor hitting an already-accepted donation sees the state conflict first.
    let err = h.donations.accept(&donor, donation.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_accept_missing_donation() {
    let h = Harness::new();
    let charity = h.charity("c@example.com", "Springfield", true).await;

    let err = h.donations.accept(&charity, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_concurrent_accepts_have_one_winner() {
    let h = Arc::new(Harness::new());
    let donor = h.donor("donor@example.com").await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let mut handles = Vec::new();
    for i in 0..8 {
        let charity = h
            .charity(&format!("c{i}@example.com"), "Springfield", true)
            .await;
        let h = Arc::clone(&h);
        handles.push(tokio::spawn(async move {
            h.donations.accept(&charity, donation.id).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::Conflict),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_mail_failure_is_a_warning() {
    let h = Harness::with_failing_mailer();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let outcome = h.donations.accept(&charity, donation.id).await.unwrap();

    assert_eq!(outcome.value.status, DonationStatus::Accepted);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].effect, "mail:donation_accepted");
    // The in-app notice was still written.
    assert!(
        h.unread(&donor)
            .await
            .iter()
            .any(|n| n.kind == NotificationKind::DonationAccepted)
    );
}

#[tokio::test]
async fn test_accept_on_expired_donation_persists_expiry() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let stale = h.stale_donation(&donor, DonationStatus::Available).await;

    let err = h.donations.accept(&charity, stale.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let stored = h.store.find_by_id(stale.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DonationStatus::Expired);
    assert!(stored.accepted_by.is_none());
}

#[tokio::test]
async fn test_expiry_wins_over_requested_status() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let stale = h.stale_donation(&donor, DonationStatus::Available).await;

    let updated = h
        .donations
        .update_status(&donor, stale.id, "completed")
        .await
        .unwrap();
    assert_eq!(updated.status, DonationStatus::Expired);

    let stored = h.store.find_by_id(stale.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DonationStatus::Expired);
}

#[tokio::test]
async fn test_update_status_by_donor_and_acceptor() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;
    h.donations.accept(&charity, donation.id).await.unwrap();

    let completed = h
        .donations
        .update_status(&charity, donation.id, "completed")
        .await
        .unwrap();
    assert_eq!(completed.status, DonationStatus::Completed);

    // No transition graph: the donor may move it anywhere.
    let reopened = h
        .donations
        .update_status(&donor, donation.id, "available")
        .await
        .unwrap();
    assert_eq!(reopened.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_third_party_cannot_update_status() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let stranger = h.charity("s@example.com", "Springfield", true).await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let err = h
        .donations
        .update_status(&stranger, donation.id, "completed")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let stored = h.store.find_by_id(donation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let donation = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;

    let err = h
        .donations
        .update_status(&donor, donation.id, "cancelled")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.field.as_deref(), Some("status"));
}

#[tokio::test]
async fn test_reads_report_effective_status_without_writing() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let stale = h.stale_donation(&donor, DonationStatus::Available).await;

    let fetched = h.donations.get(stale.id).await.unwrap();
    assert_eq!(fetched.status, DonationStatus::Expired);

    let listed = h.donations.list(Some("expired"), None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(h.donations.list(Some("available"), None).await.unwrap().is_empty());

    let stored = h.store.find_by_id(stale.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_role_scoped_listings() {
    let h = Harness::new();
    let donor = h.donor("donor@example.com").await;
    let other = h.donor("other@example.com").await;
    let charity = h.charity("c@example.com", "Springfield", true).await;
    let admin = h.admin_ctx().await;

    let mine = h
        .donations
        .create(&donor, donation_input("Springfield"))
        .await
        .unwrap()
        .value;
    h.donations
        .create(&other, donation_input("Shelbyville"))
        .await
        .unwrap();
    h.donations.accept(&charity, mine.id).await.unwrap();

    assert_eq!(h.donations.list_for_donor(&donor).await.unwrap().len(), 1);
    let accepted = h.donations.list_for_charity(&charity).await.unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].id, mine.id);

    let in_city = h.donations.list(None, Some("Shelbyville")).await.unwrap();
    assert_eq!(in_city.len(), 1);

    assert_eq!(h.donations.admin_list(&admin, Some("all")).await.unwrap().len(), 2);
    assert_eq!(
        h.donations
            .admin_list(&admin, Some("accepted"))
            .await
            .unwrap()
            .len(),
        1
    );
    let err = h.donations.admin_list(&donor, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

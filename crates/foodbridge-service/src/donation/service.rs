//! Donation lifecycle engine.
//!
//! Every write path loads the record and persists `expired` first when the
//! expiry date has passed, then evaluates the requested change against the
//! record as it now stands. Status changes are compare-and-set writes, so a
//! concurrent writer that got there first turns this request into a
//! `Conflict`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_core::{Outcome, SideEffectWarning};
use foodbridge_database::store::{DonationFilter, DonationStore, UserStore};
use foodbridge_entity::donation::{CreateDonation, Donation, DonationStatus};
use foodbridge_entity::user::{User, UserRole};

use super::validation::build_donation;
use crate::context::RequestContext;
use crate::notification::{NotificationDispatcher, templates};

const FALLBACK_CHARITY_NAME: &str = "a charity";

/// Handles donation lifecycle commands and donation queries.
#[derive(Clone)]
pub struct DonationService {
    /// User store, for side-effect recipients.
    users: Arc<dyn UserStore>,
    /// Donation store.
    donations: Arc<dyn DonationStore>,
    /// Notification and mail delivery.
    dispatcher: NotificationDispatcher,
}

impl DonationService {
    /// Creates a new donation service.
    pub fn new(
        users: Arc<dyn UserStore>,
        donations: Arc<dyn DonationStore>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            users,
            donations,
            dispatcher,
        }
    }

    /// Lists a new donation on behalf of the current donor.
    ///
    /// Notifies the donor and every verified charity registered in the
    /// pickup city. Notification failures are returned as warnings.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateDonation,
    ) -> AppResult<Outcome<Donation>> {
        ctx.require_role(UserRole::Donor)?;

        let donation = build_donation(input, ctx.user_id, Utc::now())?;
        self.donations.insert(&donation).await?;

        info!(
            donor_id = %ctx.user_id,
            donation_id = %donation.id,
            food_type = %donation.food_type,
            city = %donation.pickup_address.city,
            "Donation created"
        );

        let mut warnings = Vec::new();
        self.dispatcher
            .notify(templates::donation_created(&donation), &mut warnings)
            .await;

        match self
            .users
            .verified_charities_in_city(&donation.pickup_address.city)
            .await
        {
            Ok(charities) => {
                for charity in &charities {
                    self.dispatcher
                        .notify(templates::new_donation(charity, &donation), &mut warnings)
                        .await;
                }
            }
            Err(e) => {
                warn!(
                    donation_id = %donation.id,
                    error = %e.detail_chain(),
                    "Failed to look up charities for new-donation alerts"
                );
                warnings.push(SideEffectWarning::from_error("notification:new_donation", &e));
            }
        }

        Ok(Outcome::with_warnings(donation, warnings))
    }

    /// Accepts an available donation on behalf of the current charity.
    ///
    /// Checks, in order: the donation exists, it is `available`, the actor
    /// is a charity, the charity is verified. The donor is then notified
    /// in-app and by mail; neither failure undoes the acceptance.
    pub async fn accept(
        &self,
        ctx: &RequestContext,
        donation_id: Uuid,
    ) -> AppResult<Outcome<Donation>> {
        let now = Utc::now();
        let donation = self.load(donation_id).await?;
        let donation = self.expire_if_due(donation, now).await?;

        if donation.status != DonationStatus::Available {
            return Err(AppError::conflict("Donation is not available"));
        }
        if ctx.role != UserRole::Charity {
            return Err(AppError::authorization("Only charities can accept donations"));
        }
        if !ctx.is_verified() {
            return Err(AppError::authorization(
                "Your account needs to be verified to accept donations",
            ));
        }

        let accepted = self
            .donations
            .accept(donation_id, ctx.user_id, now)
            .await?
            .ok_or_else(|| AppError::conflict("Donation is not available"))?;

        info!(
            charity_id = %ctx.user_id,
            donation_id = %accepted.id,
            donor_id = %accepted.donor_id,
            "Donation accepted"
        );

        let mut warnings = Vec::new();
        let charity_name = self.charity_name(ctx.user_id).await;
        self.dispatcher
            .notify(
                templates::donation_accepted(&accepted, &charity_name),
                &mut warnings,
            )
            .await;

        let donor = self
            .lookup(accepted.donor_id, "mail:donation_accepted", &mut warnings)
            .await;
        if let Some(donor) = &donor {
            self.dispatcher
                .mail(
                    "donation_accepted",
                    templates::donation_accepted_mail(donor, &charity_name, &accepted),
                    &mut warnings,
                )
                .await;
        }

        Ok(Outcome::with_warnings(accepted, warnings))
    }

    /// Sets a donation's status on behalf of its donor or accepting charity.
    ///
    /// Any status value is allowed. A donation past its expiry date stays
    /// `expired` whatever was requested.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        donation_id: Uuid,
        new_status: &str,
    ) -> AppResult<Donation> {
        let new_status: DonationStatus = new_status.parse()?;
        let now = Utc::now();

        let donation = self.load(donation_id).await?;
        if !donation.is_party(ctx.user_id) {
            return Err(AppError::authorization(
                "Only the donor or the accepting charity can update this donation",
            ));
        }

        let donation = self.expire_if_due(donation, now).await?;
        if donation.is_expired_at(now) {
            return Ok(donation);
        }
        if donation.status == new_status {
            return Ok(donation);
        }

        let updated = self
            .donations
            .compare_and_set_status(donation_id, donation.status, new_status)
            .await?
            .ok_or_else(|| AppError::conflict("Donation was modified concurrently"))?;

        info!(
            user_id = %ctx.user_id,
            donation_id = %donation_id,
            from = %donation.status,
            to = %new_status,
            "Donation status updated"
        );
        Ok(updated)
    }

    /// Lists all donations, newest first, optionally filtered by effective
    /// status and pickup city.
    pub async fn list(&self, status: Option<&str>, city: Option<&str>) -> AppResult<Vec<Donation>> {
        let now = Utc::now();
        let mut filter = DonationFilter::all(now);
        filter.status = parse_status_filter(status)?;
        filter.city = city.map(str::trim).filter(|c| !c.is_empty()).map(String::from);
        self.query(filter).await
    }

    /// Gets one donation by id.
    pub async fn get(&self, donation_id: Uuid) -> AppResult<Donation> {
        Ok(self.load(donation_id).await?.observed_at(Utc::now()))
    }

    /// Lists the current user's own donations.
    pub async fn list_for_donor(&self, ctx: &RequestContext) -> AppResult<Vec<Donation>> {
        let mut filter = DonationFilter::all(Utc::now());
        filter.donor_id = Some(ctx.user_id);
        self.query(filter).await
    }

    /// Lists donations the current charity has accepted.
    pub async fn list_for_charity(&self, ctx: &RequestContext) -> AppResult<Vec<Donation>> {
        let mut filter = DonationFilter::all(Utc::now());
        filter.accepted_by = Some(ctx.user_id);
        self.query(filter).await
    }

    /// Admin listing; `status` of `all` or none means no filter.
    pub async fn admin_list(
        &self,
        ctx: &RequestContext,
        status: Option<&str>,
    ) -> AppResult<Vec<Donation>> {
        ctx.require_admin()?;
        let mut filter = DonationFilter::all(Utc::now());
        filter.status = parse_status_filter(status)?;
        self.query(filter).await
    }

    async fn query(&self, filter: DonationFilter) -> AppResult<Vec<Donation>> {
        let as_of = filter.as_of;
        Ok(self
            .donations
            .list(&filter)
            .await?
            .into_iter()
            .map(|d| d.observed_at(as_of))
            .collect())
    }

    async fn load(&self, donation_id: Uuid) -> AppResult<Donation> {
        self.donations
            .find_by_id(donation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Donation not found"))
    }

    /// Persist `expired` when the expiry date has passed but the stored
    /// status says otherwise. Returns the record as it now stands.
    async fn expire_if_due(&self, donation: Donation, now: DateTime<Utc>) -> AppResult<Donation> {
        if !donation.is_expired_at(now) || donation.status == DonationStatus::Expired {
            return Ok(donation);
        }

        let expired = self
            .donations
            .compare_and_set_status(donation.id, donation.status, DonationStatus::Expired)
            .await?;

        match expired {
            Some(expired) => {
                info!(
                    donation_id = %expired.id,
                    previous = %donation.status,
                    "Donation expired"
                );
                Ok(expired)
            }
            // Another writer changed it first; the expiry date still wins.
            None => Ok(self.load(donation.id).await?.observed_at(now)),
        }
    }

    /// Display name of the accepting charity, or a generic one when the
    /// record can't be read.
    async fn charity_name(&self, charity_id: Uuid) -> String {
        match self.users.find_by_id(charity_id).await {
            Ok(Some(charity)) => charity.name,
            Ok(None) => {
                warn!(charity_id = %charity_id, "Accepting charity not found");
                FALLBACK_CHARITY_NAME.to_string()
            }
            Err(e) => {
                warn!(charity_id = %charity_id, error = %e.detail_chain(), "Charity lookup failed");
                FALLBACK_CHARITY_NAME.to_string()
            }
        }
    }

    async fn lookup(
        &self,
        user_id: Uuid,
        effect: &str,
        warnings: &mut Vec<SideEffectWarning>,
    ) -> Option<User> {
        let found = match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => return Some(user),
            Ok(None) => AppError::dependency(format!("User {user_id} not found")),
            Err(e) => e,
        };
        warn!(user_id = %user_id, effect, error = %found.detail_chain(), "Recipient lookup failed");
        warnings.push(SideEffectWarning::from_error(effect, &found));
        None
    }
}

fn parse_status_filter(status: Option<&str>) -> AppResult<Option<DonationStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

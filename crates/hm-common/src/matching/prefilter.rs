use strum::{AsRefStr, IntoStaticStr};

use super::adapter::user_budget;
use crate::{
    api::UserRecord,
    corrections::{correct_gender, correct_gender_preference, GenderPreference},
    normalize::{coerce::to_text, normalize_amenities, NormalizedListing},
};

/// Why a candidate was dropped before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    SelfMatch,
    NotStudent,
    GenderMismatch,
    LocationMismatch,
    BudgetMismatch,
    AmenityMismatch,
    PriceBelowMin,
    PriceAboveMax,
    MissingAmenity,
}

/// Hard constraints a roommate candidate must satisfy, taken from the
/// searching student's own record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoommateFilter {
    pub exclude_id: Option<String>,
    /// `None` or `Any` accept every gender
    pub gender: Option<GenderPreference>,
    /// Case-insensitive substring of the candidate's location
    pub location: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    /// At least one must be shared when non-empty
    pub amenities: Vec<String>,
}

impl RoommateFilter {
    pub fn from_user(user: &UserRecord) -> Self {
        let preferences = user.preferences.as_ref();
        let (budget_min, budget_max) = user_budget(user);

        Self {
            exclude_id: user.id_text(),
            gender: preferences
                .and_then(|p| to_text(p.gender.as_ref()))
                .and_then(|raw| correct_gender_preference(&raw)),
            location: preferences
                .and_then(|p| to_text(p.location.as_ref()))
                .map(|loc| loc.to_lowercase()),
            budget_min,
            budget_max,
            amenities: preferences
                .map(|p| normalize_amenities(p.amenities.as_ref()))
                .unwrap_or_default(),
        }
    }

    pub fn evaluate(&self, candidate: &UserRecord) -> Result<(), RejectReason> {
        if self.exclude_id.is_some() && candidate.id_text() == self.exclude_id {
            return Err(RejectReason::SelfMatch);
        }

        if let Some(role) = candidate.role_text() {
            if !role.eq_ignore_ascii_case("student") {
                return Err(RejectReason::NotStudent);
            }
        }

        if let Some(pref) = self.gender.filter(|p| *p != GenderPreference::Any) {
            let gender = to_text(candidate.gender.as_ref()).and_then(|raw| correct_gender(&raw));
            if !gender.is_some_and(|g| pref.accepts(g)) {
                return Err(RejectReason::GenderMismatch);
            }
        }

        if let Some(wanted) = self.location.as_deref() {
            let found = to_text(candidate.location.as_ref())
                .is_some_and(|loc| loc.to_lowercase().contains(wanted));
            if !found {
                return Err(RejectReason::LocationMismatch);
            }
        }

        if !self.budget_overlaps(candidate) {
            return Err(RejectReason::BudgetMismatch);
        }

        if !self.amenities.is_empty() {
            let theirs = candidate
                .preferences
                .as_ref()
                .map(|p| normalize_amenities(p.amenities.as_ref()))
                .unwrap_or_default();
            let shared = theirs
                .iter()
                .any(|a| self.amenities.iter().any(|b| a.eq_ignore_ascii_case(b)));
            if !shared {
                return Err(RejectReason::AmenityMismatch);
            }
        }

        Ok(())
    }

    pub fn accepts(&self, candidate: &UserRecord) -> bool {
        self.evaluate(candidate).is_ok()
    }

    // Candidates without any budget are kept.
    fn budget_overlaps(&self, candidate: &UserRecord) -> bool {
        let (their_min, their_max) = user_budget(candidate);
        if their_min.is_none() && their_max.is_none() {
            return true;
        }

        let below_floor = matches!((their_max, self.budget_min), (Some(hi), Some(lo)) if hi < lo);
        let above_ceiling =
            matches!((their_min, self.budget_max), (Some(lo), Some(hi)) if lo > hi);
        !below_floor && !above_ceiling
    }
}

/// Browse filters applied to normalized listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Every entry must be offered (case-insensitive)
    pub amenities: Vec<String>,
    /// Listings open to `any` always pass
    pub gender: Option<GenderPreference>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.amenities.is_empty()
            && self.gender.is_none()
    }

    pub fn evaluate(&self, listing: &NormalizedListing) -> Result<(), RejectReason> {
        let price = listing.pricing.starting_price;
        if self.min_price.is_some_and(|min| price < min) {
            return Err(RejectReason::PriceBelowMin);
        }
        if self.max_price.is_some_and(|max| price > max) {
            return Err(RejectReason::PriceAboveMax);
        }

        let offers_all = self.amenities.iter().all(|wanted| {
            listing
                .amenities
                .iter()
                .any(|offered| offered.eq_ignore_ascii_case(wanted))
        });
        if !offers_all {
            return Err(RejectReason::MissingAmenity);
        }

        if let Some(pref) = self.gender.filter(|p| *p != GenderPreference::Any) {
            let theirs = listing.preferences.gender;
            if theirs != GenderPreference::Any && theirs != pref {
                return Err(RejectReason::GenderMismatch);
            }
        }

        Ok(())
    }

    pub fn accepts(&self, listing: &NormalizedListing) -> bool {
        self.evaluate(listing).is_ok()
    }
}

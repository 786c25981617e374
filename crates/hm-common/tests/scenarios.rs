use hm_common::{
    api::{ListingRecord, UserRecord},
    corrections::{Gender, GenderPreference},
    matching::{score, CompatibilityEngine, ProfileSource, RankingEngine},
    normalize::{normalize_listing, normalize_rents, RentTier},
    Academic, Lifestyle, Profile,
};
use serde_json::{json, Value};

fn listing(raw: Value) -> ListingRecord {
    serde_json::from_value(raw).unwrap()
}

fn student() -> Profile {
    Profile {
        budget_min: Some(8000.0),
        budget_max: Some(12000.0),
        location: Some("Koramangala, Bangalore".into()),
        lifestyle: Lifestyle {
            smoking: Some("Non-smoker".into()),
            cleanliness: Some("Moderately clean".into()),
            sleep_schedule: Some("Night owl".into()),
            study_habits: Some("Study focused".into()),
            social: Some("Quiet/Private".into()),
        },
        academic: Academic {
            college: Some("Christ University".into()),
            course: Some("BBA".into()),
            year: Some("3".into()),
        },
        gender: Some(Gender::Male),
        gender_preference: Some(GenderPreference::Male),
    }
}

#[test]
fn identical_profiles_score_one_hundred() {
    assert_eq!(score(&student(), &student()), 100);
}

#[test]
fn disjoint_budgets_contribute_nothing() {
    let mut a = student();
    a.budget_min = Some(5000.0);
    a.budget_max = Some(7000.0);
    let mut b = student();
    b.budget_min = Some(15000.0);
    b.budget_max = Some(20000.0);

    let result = CompatibilityEngine::default().calculate_match_score(&a, &b);
    assert_eq!(result.budget.score, 0.0);
    // everything else is identical
    assert_eq!(result.compatibility(), 80);
}

#[test]
fn empty_pricing_falls_back_to_legacy_fields() {
    let normalized = normalize_listing(&listing(json!({
        "rents": {},
        "price": 9500,
        "availableRooms": 2
    })));
    assert_eq!(normalized.pricing.starting_price, 9500.0);
    assert_eq!(normalized.pricing.available_rooms_computed, 2);
}

#[test]
fn double_encoded_amenities_are_flattened() {
    let normalized = normalize_listing(&listing(json!({
        "amenities": ["[\"Wi-Fi\",\"AC\"]"]
    })));
    assert_eq!(normalized.amenities, vec!["Wi-Fi", "AC"]);
}

#[test]
fn every_historical_tier_shape_resolves() {
    let expected = |rent, available, count| RentTier {
        rent,
        available,
        count,
    };

    assert_eq!(
        normalize_rents(Some(&json!({"single": "8000"}))).single,
        expected(8000.0, false, 0)
    );
    assert_eq!(
        normalize_rents(Some(&json!({
            "single": {"rent": 8000, "available": true, "count": 3}
        })))
        .single,
        expected(8000.0, true, 3)
    );
    assert_eq!(
        normalize_rents(Some(&json!(
            r#"{"single":{"rent":8000,"available":true,"count":3}}"#
        )))
        .single,
        expected(8000.0, true, 3)
    );
}

#[test]
fn mixed_tier_shapes_in_one_listing() {
    let normalized = normalize_listing(&listing(json!({
        "totalRooms": "12",
        "rents": {
            "single": "{\"rent\":\"15000\",\"available\":\"true\",\"count\":\"1\"}",
            "double": 9000,
            "triple": {"rent": 6500, "available": 1, "count": 4}
        }
    })));

    assert_eq!(normalized.pricing.starting_price, 6500.0);
    assert_eq!(normalized.pricing.available_rooms_computed, 5);
    assert_eq!(normalized.pricing.occupied_rooms, 7);
}

#[test]
fn student_and_listing_share_one_scorer() {
    let user: UserRecord = serde_json::from_value(json!({
        "_id": "s1",
        "gender": "male",
        "budget": "8000-12000",
        "location": "Koramangala, Bangalore",
        "preferences": {"gender": "boys", "smoking": "Non-smoker"}
    }))
    .unwrap();
    let listing = normalize_listing(&listing(json!({
        "_id": "l1",
        "address": "Koramangala, Bangalore",
        "rents": {
            "single": {"rent": 12000, "available": true, "count": 1},
            "double": {"rent": 8000, "available": true, "count": 1}
        },
        "preferences": {"gender": "male", "smoking": false}
    })));

    let engine = CompatibilityEngine::default();
    let result = engine.calculate_match_score(&user.to_profile(), &listing.to_profile());

    assert_eq!(result.budget.score, 1.0);
    assert_eq!(result.location.score, 1.0);
    assert_eq!(result.gender.score, 1.0);
    // lifestyle: smoking matches, four factors unknown (0.625); academics unknown
    assert!((result.lifestyle.score - 0.625).abs() < 1e-9);
    assert_eq!(result.academic.score, 0.5);
    assert_eq!(result.compatibility(), 79);
}

#[test]
fn ranking_pipeline_end_to_end() {
    let me: UserRecord = serde_json::from_value(json!({
        "_id": "me",
        "role": "student",
        "gender": "female",
        "budget": {"min": 6000, "max": 10000},
        "preferences": {"gender": "female", "location": "pune"}
    }))
    .unwrap();
    let candidates: Vec<UserRecord> = serde_json::from_value(json!([
        {"_id": "a", "role": "student", "gender": "female", "location": "Kothrud, Pune"},
        {"_id": "b", "role": "student", "gender": "female", "location": "Mumbai"},
        {"_id": "c", "role": "student", "gender": "female", "location": "Pune",
         "budget": {"min": 6000, "max": 10000}}
    ]))
    .unwrap();

    let ranked = RankingEngine::default().rank_roommates(&me, &candidates);
    let ids: Vec<_> = ranked.iter().filter_map(|m| m.user.id_text()).collect();
    assert_eq!(ids, vec!["c", "a"]);
}

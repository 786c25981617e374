use hm_common::{
    api::ListingRecord,
    corrections::{Gender, GenderPreference},
    matching::{score, CompatibilityEngine},
    normalize::normalize_listing,
    Academic, Lifestyle, Profile,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn label() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None::<String>),
        Just(Some("Non-smoker".to_string())),
        Just(Some("Regular smoker".to_string())),
        Just(Some("Very clean".to_string())),
        Just(Some("Casual".to_string())),
        Just(Some("Early bird (6 AM - 10 PM)".to_string())),
        Just(Some("Night owl".to_string())),
        Just(Some("Balanced".to_string())),
        Just(Some("Quiet/Private".to_string())),
        "[a-z ]{0,12}".prop_map(Some),
    ]
}

fn gender() -> impl Strategy<Value = Option<Gender>> {
    prop_oneof![
        Just(None::<Gender>),
        Just(Some(Gender::Male)),
        Just(Some(Gender::Female)),
        Just(Some(Gender::Other)),
    ]
}

fn preference() -> impl Strategy<Value = Option<GenderPreference>> {
    prop_oneof![
        Just(None::<GenderPreference>),
        Just(Some(GenderPreference::Male)),
        Just(Some(GenderPreference::Female)),
        Just(Some(GenderPreference::Any)),
    ]
}

fn budget() -> impl Strategy<Value = (Option<f64>, Option<f64>)> {
    (
        proptest::option::of(0.0f64..50_000.0),
        proptest::option::of(0.0f64..50_000.0),
    )
        .prop_map(|(lo, hi)| match (lo, hi) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            bounds => bounds,
        })
}

prop_compose! {
    fn profile()(
        (budget_min, budget_max) in budget(),
        location in proptest::option::of("[A-Za-z, ]{0,24}"),
        smoking in label(),
        cleanliness in label(),
        sleep_schedule in label(),
        study_habits in label(),
        social in label(),
        college in proptest::option::of("(IIT|NIT|BITS)"),
        year in proptest::option::of("[1-4]"),
        gender in gender(),
        gender_preference in preference(),
    ) -> Profile {
        Profile {
            budget_min,
            budget_max,
            location,
            lifestyle: Lifestyle { smoking, cleanliness, sleep_schedule, study_habits, social },
            academic: Academic { college, course: None, year },
            gender,
            gender_preference,
        }
    }
}

fn raw_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5_000i64..60_000).prop_map(Value::from),
        (0u32..60_000).prop_map(|n| Value::from(n.to_string())),
        "[a-z0-9 ]{0,8}".prop_map(Value::from),
    ]
}

fn raw_tier() -> impl Strategy<Value = Value> {
    prop_oneof![
        raw_scalar(),
        (raw_scalar(), raw_scalar(), raw_scalar())
            .prop_map(|(rent, available, count)| json!({"rent": rent, "available": available, "count": count})),
        (0u32..60_000, any::<bool>(), 0u32..10).prop_map(|(rent, available, count)| {
            Value::from(json!({"rent": rent, "available": available, "count": count}).to_string())
        }),
    ]
}

prop_compose! {
    fn raw_listing()(
        single in raw_tier(),
        double in raw_tier(),
        triple in raw_tier(),
        encode_container in any::<bool>(),
        price in raw_scalar(),
        available_rooms in raw_scalar(),
        total_rooms in raw_scalar(),
        amenities in prop_oneof![
            Just(json!(["Wi-Fi", " AC "])),
            Just(json!(["[\"Wi-Fi\",\"AC\"]"])),
            Just(json!("Laundry, Gym")),
            raw_scalar(),
        ],
    ) -> ListingRecord {
        let rents = json!({"single": single, "double": double, "triple": triple});
        let rents = if encode_container { Value::from(rents.to_string()) } else { rents };
        serde_json::from_value(json!({
            "title": "Generated",
            "rents": rents,
            "price": price,
            "availableRooms": available_rooms,
            "totalRooms": total_rooms,
            "amenities": amenities,
            "preferences": {"gender": "female", "smoking": true},
        }))
        .unwrap()
    }
}

proptest! {
    #[test]
    fn score_stays_in_range(a in profile(), b in profile()) {
        let result = CompatibilityEngine::default().calculate_match_score(&a, &b);
        prop_assert!(result.total >= 0.0 && result.total <= 100.0 + 1e-9, "total {}", result.total);
        for dim in [&result.budget, &result.location, &result.lifestyle, &result.academic, &result.gender] {
            prop_assert!((0.0..=1.0).contains(&dim.score), "{} {}", dim.status, dim.score);
        }
        prop_assert!(score(&a, &b) <= 100);
    }

    #[test]
    fn missing_factors_score_half(a in profile()) {
        let engine = CompatibilityEngine::default();
        let empty = Profile::default();
        let result = engine.calculate_match_score(&a, &empty);

        prop_assert_eq!(result.location.score, 0.5);
        prop_assert_eq!(result.lifestyle.score, 0.5);
        prop_assert_eq!(result.academic.score, 0.5);
        prop_assert_eq!(result.gender.score, 0.5);

        let budget = engine.score_budget(&a, &empty);
        prop_assert_eq!(&result.budget, &budget);
        let expected = budget.score * 20.0 + 0.5 * 80.0;
        prop_assert!((result.total - expected).abs() < 1e-9, "total {} vs {}", result.total, expected);
    }

    #[test]
    fn score_is_symmetric(a in profile(), b in profile()) {
        prop_assert_eq!(score(&a, &b), score(&b, &a));
    }

    #[test]
    fn normalization_is_idempotent(record in raw_listing()) {
        let first = normalize_listing(&record);
        let reparsed: ListingRecord = serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
        let second = normalize_listing(&reparsed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalized_pricing_is_consistent(record in raw_listing()) {
        let pricing = normalize_listing(&record).pricing;
        prop_assert!(pricing.starting_price >= 0.0);
        if let Some(min) = pricing.tiers.min_rent() {
            prop_assert_eq!(pricing.starting_price, min);
        }
        for (_, tier) in pricing.tiers.iter() {
            prop_assert!(tier.rent >= 0.0);
        }
    }
}

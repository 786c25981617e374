#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMatch {
    Exact,
    /// One comma-delimited part contains a part of the other side
    Partial,
    NoMatch,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct LocationEvaluation {
    pub kind: LocationMatch,
    pub score: f64, // 0.0..=1.0
    pub details: String,
}

impl LocationEvaluation {
    pub fn is_unknown(&self) -> bool {
        self.kind == LocationMatch::Unknown
    }
}

/// Compares two free-text locations ("Koramangala, Bangalore").
///
/// - either side missing or blank: 0.5
/// - equal ignoring case: 1.0
/// - any part of one contains, or is contained in, a part of the other: 0.8
/// - otherwise 0.0
pub fn evaluate_location(a: Option<&str>, b: Option<&str>) -> LocationEvaluation {
    let (a, b) = match (clean(a), clean(b)) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return LocationEvaluation {
                kind: LocationMatch::Unknown,
                score: 0.5,
                details: "location missing on one side; neutral score".into(),
            };
        }
    };

    if a == b {
        return LocationEvaluation {
            kind: LocationMatch::Exact,
            score: 1.0,
            details: format!("same location: {a}"),
        };
    }

    let parts_a = split_parts(&a);
    let parts_b = split_parts(&b);
    let shared = parts_a.iter().find_map(|pa| {
        parts_b
            .iter()
            .find(|pb| pa.contains(*pb) || pb.contains(pa))
            .map(|pb| (*pa, *pb))
    });

    match shared {
        Some((pa, pb)) => LocationEvaluation {
            kind: LocationMatch::Partial,
            score: 0.8,
            details: format!("overlapping area: {pa} ~ {pb}"),
        },
        None => LocationEvaluation {
            kind: LocationMatch::NoMatch,
            score: 0.0,
            details: format!("different locations: {a} vs {b}"),
        },
    }
}

fn clean(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn split_parts(location: &str) -> Vec<&str> {
    location
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

use super::evidence::{evidence_for, tag_matches};
use crate::error::{MatcherError, MatcherResult};
use crate::types::{CandidateProfile, MatchResult, PreferenceKey, PreferenceSet};

/// Rejects profiles the scorer cannot reason about.
pub fn validate_profile(candidate: &CandidateProfile) -> MatcherResult<()> {
    let malformed = |reason: &str| MatcherError::MalformedProfile {
        id: candidate.id.clone(),
        reason: reason.to_string(),
    };

    if candidate.id.trim().is_empty() {
        return Err(malformed("empty id"));
    }
    if let Some(price) = candidate.price {
        if !price.is_finite() || price < 0.0 {
            return Err(malformed("price must be a non-negative number"));
        }
    }
    if candidate.lifestyle_tags.iter().any(|t| t.trim().is_empty()) {
        return Err(malformed("blank lifestyle tag"));
    }
    Ok(())
}

/// Scores `candidate` against `prefs`.
///
/// Each preference with evidence on the profile contributes its weight; the
/// total is divided by `max(1, |prefs|)` so the result stays in `[0, 1]`
/// whatever the size of the preference set. An empty set scores 0.
pub fn score(prefs: &PreferenceSet, candidate: &CandidateProfile) -> MatcherResult<MatchResult> {
    validate_profile(candidate)?;

    let occupation = candidate.occupation.to_lowercase();
    let bio = candidate.bio.to_lowercase();

    let mut total = 0.0_f32;
    let mut matched_signals = Vec::new();
    for signal in prefs.iter() {
        if has_evidence(signal.key, candidate, &occupation, &bio) {
            total += signal.weight;
            matched_signals.push(signal.clone());
        }
    }

    let score = (total / prefs.len().max(1) as f32).clamp(0.0, 1.0);
    Ok(MatchResult {
        candidate_id: candidate.id.clone(),
        score,
        matched_signals,
    })
}

// Tags are checked first, free text only as a fallback
fn has_evidence(key: PreferenceKey, candidate: &CandidateProfile, occupation: &str, bio: &str) -> bool {
    let evidence = evidence_for(key);

    let tagged = candidate.lifestyle_tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        evidence.tags.iter().any(|term| tag_matches(&tag, term))
    });
    if tagged {
        return true;
    }

    evidence.occupation.iter().any(|term| occupation.contains(term))
        || evidence.text.iter().any(|term| bio.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::extract;
    use crate::types::{CandidateKind, PreferenceKey::*, PreferenceSignal};

    fn candidate(id: &str, tags: &[&str], occupation: &str, bio: &str) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            kind: CandidateKind::Roommate,
            name: String::new(),
            lifestyle_tags: tags.iter().map(|t| t.to_lowercase()).collect(),
            bio: bio.to_string(),
            occupation: occupation.to_string(),
            location: String::new(),
            price: None,
            interests: vec![],
        }
    }

    #[test]
    fn test_clean_and_quiet_scenario() {
        let prefs = extract("I want someone clean and quiet");
        let tidy = candidate("1", &["clean", "tidy"], "", "");
        let social = candidate("2", &["social"], "", "");

        let tidy_result = score(&prefs, &tidy).unwrap();
        let social_result = score(&prefs, &social).unwrap();

        assert_eq!(tidy_result.score, 0.5);
        assert_eq!(
            tidy_result.matched_signals.iter().map(|s| s.key).collect::<Vec<_>>(),
            vec![Clean]
        );
        assert_eq!(social_result.score, 0.0);
        assert!(social_result.matched_signals.is_empty());
        assert!(tidy_result.score > social_result.score);
    }

    #[test]
    fn test_evidence_sources() {
        let test_cases = vec![
            ("tag word", candidate("a", &["Very clean"], "", ""), Clean, true),
            ("bio fallback", candidate("b", &[], "", "Neat and quiet."), Quiet, true),
            ("occupation", candidate("c", &[], "PhD Student", ""), Student, true),
            ("occupation class", candidate("d", &[], "Product Manager", ""), Professional, true),
            ("no evidence", candidate("e", &["Night owl"], "Chef", "Loves parties"), EarlyRiser, false),
            ("pet tag", candidate("f", &["Pet friendly"], "", ""), PetFriendly, true),
            ("pets in bio", candidate("g", &[], "", "Me and my cat"), PetFriendly, true),
        ];

        for (label, profile, key, expected) in test_cases {
            let prefs: PreferenceSet = vec![PreferenceSignal::new(key, 1.0, key.as_str())]
                .into_iter()
                .collect();
            let result = score(&prefs, &profile).unwrap();
            assert_eq!(result.score > 0.0, expected, "Failed for case: {}", label);
        }
    }

    #[test]
    fn test_empty_preferences_score_zero() {
        let profile = candidate("1", &["clean"], "Engineer", "quiet and clean");
        let result = score(&PreferenceSet::new(), &profile).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.matched_signals.is_empty());
    }

    #[test]
    fn test_score_stays_in_unit_range() {
        let profile = candidate(
            "1",
            &["clean", "quiet", "social", "active", "vegan", "early riser", "night owl", "non-smoker"],
            "student professional",
            "",
        );
        let weights = [0.0, 0.3, 1.0];
        for weight in weights {
            let prefs: PreferenceSet = [Clean, Quiet, Social, Professional, Student, NonSmoker, EarlyRiser, NightOwl, Vegetarian, Active]
                .into_iter()
                .map(|key| PreferenceSignal::new(key, weight, key.as_str()))
                .collect();
            let result = score(&prefs, &profile).unwrap();
            assert!((0.0..=1.0).contains(&result.score));
            assert!((result.score - weight).abs() < 1e-6);
        }
    }

    #[test]
    fn test_malformed_profiles_are_rejected() {
        let mut negative = candidate("1", &["clean"], "", "");
        negative.price = Some(-10.0);
        let mut not_a_number = candidate("2", &["clean"], "", "");
        not_a_number.price = Some(f64::NAN);
        let blank_tag = candidate("3", &["clean", "  "], "", "");
        let blank_id = candidate("", &["clean"], "", "");

        let prefs = extract("clean");
        for profile in [negative, not_a_number, blank_tag, blank_id] {
            assert!(matches!(
                score(&prefs, &profile),
                Err(MatcherError::MalformedProfile { .. })
            ));
        }
    }
}

use crate::types::PreferenceKey;

/// Terms that count as evidence for a preference on a candidate profile.
#[derive(Debug, Clone, Copy)]
pub struct Evidence {
    /// Compared against lifestyle tags, whole tag or single word.
    pub tags: &'static [&'static str],
    /// Substrings of the occupation, for occupation-class preferences.
    pub occupation: &'static [&'static str],
    /// Substrings of the bio.
    pub text: &'static [&'static str],
}

pub fn evidence_for(key: PreferenceKey) -> Evidence {
    match key {
        PreferenceKey::Clean => Evidence {
            tags: &["clean", "tidy", "neat", "organized"],
            occupation: &[],
            text: &["clean", "tidy", "neat"],
        },
        PreferenceKey::Quiet => Evidence {
            tags: &["quiet", "calm", "peaceful", "studious"],
            occupation: &[],
            text: &["quiet", "peaceful", "calm"],
        },
        PreferenceKey::Social => Evidence {
            tags: &["social", "sociable", "outgoing", "friendly"],
            occupation: &[],
            text: &["social", "sociable", "outgoing", "gatherings"],
        },
        PreferenceKey::Professional => Evidence {
            tags: &["professional"],
            occupation: &[
                "professional",
                "engineer",
                "manager",
                "analyst",
                "designer",
                "marketer",
                "producer",
                "developer",
                "consultant",
            ],
            text: &["professional"],
        },
        PreferenceKey::Student => Evidence {
            tags: &["student", "studious"],
            occupation: &["student"],
            text: &["student", "university", "phd"],
        },
        PreferenceKey::NonSmoker => Evidence {
            tags: &["non-smoker", "non smoker", "nonsmoker"],
            occupation: &[],
            text: &["non-smoker", "don't smoke"],
        },
        PreferenceKey::EarlyRiser => Evidence {
            tags: &["early riser"],
            occupation: &[],
            text: &["early riser", "morning person"],
        },
        PreferenceKey::NightOwl => Evidence {
            tags: &["night owl"],
            occupation: &[],
            text: &["night owl"],
        },
        PreferenceKey::Vegetarian => Evidence {
            tags: &["vegetarian", "vegan"],
            occupation: &[],
            text: &["vegetarian", "vegan"],
        },
        PreferenceKey::Active => Evidence {
            tags: &["active", "fitness enthusiast", "sporty"],
            occupation: &[],
            text: &["fitness", "hiking", "outdoor"],
        },
        PreferenceKey::PetFriendly => Evidence {
            tags: &["pet friendly", "pet-friendly", "pet lover", "pets allowed"],
            occupation: &[],
            text: &["pet friendly", "pet-friendly", "pets", "my dog", "my cat"],
        },
    }
}

/// True when `tag` is `term` or contains it as a whole word.
pub fn tag_matches(tag: &str, term: &str) -> bool {
    tag == term || tag.split_whitespace().any(|word| word == term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matching() {
        let test_cases = vec![
            ("clean", "clean", true),
            ("very clean", "clean", true),
            ("early riser", "early riser", true),
            ("non-smoker", "non-smoker", true),
            ("cleanish", "clean", false),
            ("smoker", "non-smoker", false),
        ];

        for (tag, term, expected) in test_cases {
            assert_eq!(
                tag_matches(tag, term),
                expected,
                "Failed for tag '{}' and term '{}'",
                tag,
                term
            );
        }
    }
}

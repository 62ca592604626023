use crate::types::PreferenceKey;
use lazy_static::lazy_static;

#[derive(Debug, Clone)]
pub struct VocabularyEntry {
    pub phrase: &'static str,
    pub key: PreferenceKey,
}

lazy_static! {
    /// Phrases recognised in user messages, matched case-insensitively as substrings.
    pub static ref VOCABULARY: Vec<VocabularyEntry> = {
        use PreferenceKey::*;
        let table: &[(&'static str, PreferenceKey)] = &[
            ("clean", Clean),
            ("tidy", Clean),
            ("neat", Clean),
            ("quiet", Quiet),
            ("peaceful", Quiet),
            ("calm", Quiet),
            ("social", Social),
            ("friendly", Social),
            ("outgoing", Social),
            ("professional", Professional),
            ("work", Professional),
            ("student", Student),
            ("study", Student),
            ("non-smoker", NonSmoker),
            ("non smoker", NonSmoker),
            ("no smoking", NonSmoker),
            ("early riser", EarlyRiser),
            ("morning person", EarlyRiser),
            ("night owl", NightOwl),
            ("vegetarian", Vegetarian),
            ("vegan", Vegetarian),
            ("active", Active),
            ("fitness", Active),
            ("outdoors", Active),
            ("pet friendly", PetFriendly),
            ("pet-friendly", PetFriendly),
            ("pet lover", PetFriendly),
            ("have pets", PetFriendly),
            ("with pets", PetFriendly),
            ("my dog", PetFriendly),
            ("my cat", PetFriendly),
        ];
        table
            .iter()
            .map(|&(phrase, key)| VocabularyEntry { phrase, key })
            .collect()
    };
}

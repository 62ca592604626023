use crate::types::PreferenceKey;

pub fn no_candidates() -> String {
    "There are no candidates available right now. Please check back later.".to_string()
}

pub fn fallback(count: usize) -> String {
    if count == 0 {
        return "I couldn't find any new roommates right now. Tell me a bit about what you're looking for and I'll keep searching."
            .to_string();
    }
    format!(
        "I found {} that might be interesting for you. Take a look at their profiles below!",
        potential_roommates(count)
    )
}

pub fn ranked(keys: &[PreferenceKey], count: usize) -> String {
    let preferences = keys
        .iter()
        .map(PreferenceKey::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if count == 0 {
        return format!(
            "I couldn't find any new roommates matching your preference for {}. Try adjusting your preferences.",
            preferences
        );
    }
    format!(
        "Based on your preference for {}, I found {} that might be a good match. Check out their profiles below!",
        preferences,
        potential_roommates(count)
    )
}

fn potential_roommates(count: usize) -> String {
    if count == 1 {
        "1 potential roommate".to_string()
    } else {
        format!("{} potential roommates", count)
    }
}

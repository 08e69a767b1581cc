use std::collections::HashSet;

/// Immutable set of API keys permitted to call the gateway.
///
/// Membership is exact and case-sensitive; keys are never normalised.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    keys: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Redacted form of a caller key for log lines.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        let allow_list = AllowList::new(["VALIDKEY", "other"]);
        assert!(allow_list.contains("VALIDKEY"));
        assert!(!allow_list.contains("validkey"));
        assert!(!allow_list.contains("VALIDKEY "));
        assert!(!allow_list.contains(""));
        assert_eq!(allow_list.len(), 2);
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let allow_list = AllowList::new(Vec::<String>::new());
        assert!(allow_list.is_empty());
        assert!(!allow_list.contains("anything"));
    }

    #[test]
    fn mask_key_hides_the_tail() {
        assert_eq!(mask_key("abc"), "****");
        assert_eq!(mask_key("VALIDKEY"), "VALI****");
    }
}

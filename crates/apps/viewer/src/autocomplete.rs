/// Result of one keystroke in the region picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteUpdate {
    /// The option equal to the input, ignoring case.
    pub exact_match: Option<String>,
    /// Options starting with the input, ignoring case, sorted ascending.
    pub suggestions: Vec<String>,
}

/// Prefix filter over a fixed set of region names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autocomplete {
    options: Vec<String>,
}

impl Autocomplete {
    pub fn new(options: Vec<String>) -> Self {
        Self { options }
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn input(&self, text: &str) -> AutocompleteUpdate {
        let needle = text.to_lowercase();

        let exact_match = self
            .options
            .iter()
            .find(|option| option.to_lowercase() == needle)
            .cloned();

        let mut suggestions: Vec<String> = self
            .options
            .iter()
            .filter(|option| option.to_lowercase().starts_with(&needle))
            .cloned()
            .collect();
        suggestions.sort();

        AutocompleteUpdate {
            exact_match,
            suggestions,
        }
    }
}

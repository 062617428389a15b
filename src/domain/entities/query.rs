use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

impl SortOrder {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses the `orderby` wire form: `name` or `-name`. Blank input means no sort.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(field) if !field.is_empty() => Some(Self::descending(field)),
            Some(_) => None,
            None if raw.is_empty() => None,
            None => Some(Self::ascending(raw)),
        }
    }

    pub fn to_param(&self) -> String {
        if self.descending {
            format!("-{}", self.field)
        } else {
            self.field.clone()
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_param())
    }
}

/// Next sort after a header click on `field`: ascending flips to descending on the
/// same field, anything else selects ascending on `field`.
pub fn toggle_sort(current: Option<&SortOrder>, field: &str) -> SortOrder {
    match current {
        Some(order) if order.field == field && !order.descending => SortOrder::descending(field),
        _ => SortOrder::ascending(field),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterDescriptor {
    pub field: String,
    pub value: String,
}

impl FilterDescriptor {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub fn add_filter(filters: &[FilterDescriptor], next: FilterDescriptor) -> Vec<FilterDescriptor> {
    let mut updated = filters.to_vec();
    let field = next.field.trim();
    let value = next.value.trim();
    if field.is_empty() || value.is_empty() {
        return updated;
    }
    let next = FilterDescriptor::new(field, value);
    if !updated.contains(&next) {
        updated.push(next);
    }
    updated
}

/// Chips are keyed by value, so every filter sharing that value goes away together.
pub fn remove_filters_by_value(filters: &[FilterDescriptor], value: &str) -> Vec<FilterDescriptor> {
    filters
        .iter()
        .filter(|filter| filter.value != value)
        .cloned()
        .collect()
}

/// The tuple that decides whether a fetched page replaces or extends the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySignature {
    pub order_by: Option<SortOrder>,
    pub filters: Vec<FilterDescriptor>,
    pub search: String,
}

impl QuerySignature {
    pub fn is_narrowed(&self) -> bool {
        !self.filters.is_empty() || !self.search.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub signature: QuerySignature,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_direction_prefix() {
        assert_eq!(SortOrder::parse("name"), Some(SortOrder::ascending("name")));
        assert_eq!(SortOrder::parse("-name"), Some(SortOrder::descending("name")));
        assert_eq!(SortOrder::parse(""), None);
        assert_eq!(SortOrder::parse("-"), None);
    }

    #[test]
    fn toggle_on_descending_field_returns_to_ascending() {
        let current = SortOrder::descending("name");
        assert_eq!(
            toggle_sort(Some(&current), "name"),
            SortOrder::ascending("name")
        );
    }

    #[test]
    fn add_filter_skips_blank_and_duplicate_entries() {
        let filters = vec![FilterDescriptor::new("status", "open")];

        let same = add_filter(&filters, FilterDescriptor::new("status", "open"));
        assert_eq!(same, filters, "duplicate filter should not be added");

        let blank = add_filter(&filters, FilterDescriptor::new("status", "  "));
        assert_eq!(blank, filters, "blank value should be ignored");

        let added = add_filter(&filters, FilterDescriptor::new(" owner ", "ann"));
        assert_eq!(added.len(), 2);
        assert_eq!(added[1], FilterDescriptor::new("owner", "ann"));
    }

    #[test]
    fn remove_by_value_drops_every_match() {
        let filters = vec![
            FilterDescriptor::new("status", "open"),
            FilterDescriptor::new("label", "open"),
            FilterDescriptor::new("owner", "ann"),
        ];

        let remaining = remove_filters_by_value(&filters, "open");

        assert_eq!(remaining, vec![FilterDescriptor::new("owner", "ann")]);
    }
}

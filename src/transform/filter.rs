use crate::data::osm::ElementKind;

/// Kind-level gate deciding which elements reach the output.
///
/// An empty allow list allows every kind; an empty deny list denies none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    allow: Vec<ElementKind>,
    deny: Vec<ElementKind>,
}

impl ElementFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.allow = kinds.into_iter().collect();
        self
    }

    pub fn with_denied(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.deny = kinds.into_iter().collect();
        self
    }

    pub fn can_emit(&self, kind: ElementKind) -> bool {
        (self.allow.is_empty() || self.allow.contains(&kind))
            && (self.deny.is_empty() || !self.deny.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_filter_allows_everything() {
        let filter = ElementFilter::new();
        assert!(ElementKind::ALL.iter().all(|kind| filter.can_emit(*kind)));
    }

    #[test]
    fn allow_list_restricts_kinds() {
        let filter = ElementFilter::new().with_allowed([ElementKind::Way, ElementKind::Relation]);
        assert!(!filter.can_emit(ElementKind::Node));
        assert!(filter.can_emit(ElementKind::Way));
        assert!(filter.can_emit(ElementKind::Relation));
    }

    #[test]
    fn deny_list_wins_over_allow_list() {
        let filter = ElementFilter::new()
            .with_allowed(ElementKind::ALL)
            .with_denied([ElementKind::Node]);
        assert!(!filter.can_emit(ElementKind::Node));
        assert!(filter.can_emit(ElementKind::Way));
    }

    #[test]
    fn deny_list_alone_allows_the_rest() {
        let filter = ElementFilter::new().with_denied([ElementKind::Relation]);
        assert!(filter.can_emit(ElementKind::Node));
        assert!(!filter.can_emit(ElementKind::Relation));
    }
}

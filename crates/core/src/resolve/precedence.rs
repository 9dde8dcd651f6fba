use crate::storage::StoreKind;

/// Picks the winner of a dual-store probe.
///
/// A document-store hit always wins; the relational hit is only used when the
/// document store found nothing. The losing value is dropped untouched.
///
/// ```
/// use roster_core::resolve::pick_by_precedence;
/// use roster_core::storage::StoreKind;
///
/// assert_eq!(pick_by_precedence(Some("doc"), Some("row")), Some((StoreKind::Document, "doc")));
/// assert_eq!(pick_by_precedence(None, Some("row")), Some((StoreKind::Relational, "row")));
/// assert_eq!(pick_by_precedence::<&str>(None, None), None);
/// ```
pub fn pick_by_precedence<T>(document: Option<T>, relational: Option<T>) -> Option<(StoreKind, T)> {
    match (document, relational) {
        (Some(doc), _) => Some((StoreKind::Document, doc)),
        (None, Some(row)) => Some((StoreKind::Relational, row)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wins_when_both_match() {
        assert_eq!(
            pick_by_precedence(Some(1), Some(2)),
            Some((StoreKind::Document, 1))
        );
    }

    #[test]
    fn test_relational_used_when_document_missing() {
        assert_eq!(
            pick_by_precedence(None, Some(2)),
            Some((StoreKind::Relational, 2))
        );
    }

    #[test]
    fn test_document_only() {
        assert_eq!(
            pick_by_precedence(Some(1), None),
            Some((StoreKind::Document, 1))
        );
    }

    #[test]
    fn test_neither() {
        assert_eq!(pick_by_precedence::<u8>(None, None), None);
    }
}

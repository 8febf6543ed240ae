//! Document selection for grounded search mode.
//!
//! The analysis panel's document picker keeps a set of selected ids. The
//! set is not validated against document existence when toggled — a
//! document deleted after selection simply drops out at submit time via
//! [`DocumentSelection::sanitize`].

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::Document;

/// The set of document ids selected for a `document_search` query.
#[derive(Debug, Clone, Default)]
pub struct DocumentSelection {
    selected: HashSet<Uuid>,
}

impl DocumentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for one document id.
    pub fn toggle(&mut self, id: Uuid) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Single toggle-all operation: select every known document unless all
    /// of them are already selected, in which case clear the selection.
    pub fn toggle_all(&mut self, known: &[Document]) {
        let all_selected =
            !known.is_empty() && known.iter().all(|doc| self.selected.contains(&doc.id));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected = known.iter().map(|doc| doc.id).collect();
        }
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Intersect the selection with the live document list, in document
    /// order. Ids removed from the library since selection are dropped
    /// silently — a stale selection never fails a request.
    pub fn sanitize(&self, documents: &[Document]) -> Vec<Uuid> {
        documents
            .iter()
            .filter(|doc| self.selected.contains(&doc.id))
            .map(|doc| doc.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DealCategory;
    use chrono::Local;

    fn doc(filename: &str) -> Document {
        Document {
            id: Uuid::new_v4(),
            filename: filename.into(),
            uploaded_at: Local::now().naive_local(),
            tags: Vec::new(),
            category: DealCategory::Other,
        }
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = DocumentSelection::new();
        let id = Uuid::new_v4();

        selection.toggle(id);
        assert!(selection.contains(&id));

        selection.toggle(id);
        assert!(!selection.contains(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let docs = vec![doc("a.pdf"), doc("b.pdf"), doc("c.pdf")];
        let mut selection = DocumentSelection::new();

        selection.toggle_all(&docs);
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&docs);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_with_partial_selection_selects_everything() {
        let docs = vec![doc("a.pdf"), doc("b.pdf")];
        let mut selection = DocumentSelection::new();
        selection.toggle(docs[0].id);

        selection.toggle_all(&docs);
        assert_eq!(selection.len(), 2);
        assert!(docs.iter().all(|d| selection.contains(&d.id)));
    }

    #[test]
    fn toggle_all_on_empty_library_is_noop() {
        let mut selection = DocumentSelection::new();
        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_replaces_stale_ids() {
        let docs = vec![doc("a.pdf")];
        let mut selection = DocumentSelection::new();
        let stale = Uuid::new_v4();
        selection.toggle(stale);

        selection.toggle_all(&docs);
        assert!(selection.contains(&docs[0].id));
        assert!(!selection.contains(&stale));
    }

    #[test]
    fn sanitize_drops_stale_ids_in_document_order() {
        let docs = vec![doc("a.pdf"), doc("b.pdf"), doc("c.pdf")];
        let mut selection = DocumentSelection::new();
        selection.toggle(docs[2].id);
        selection.toggle(docs[0].id);
        selection.toggle(Uuid::new_v4()); // deleted since selection

        let ids = selection.sanitize(&docs);
        assert_eq!(ids, vec![docs[0].id, docs[2].id]);
    }

    #[test]
    fn sanitize_of_fully_stale_selection_is_empty() {
        let mut selection = DocumentSelection::new();
        selection.toggle(Uuid::new_v4());
        assert!(selection.sanitize(&[]).is_empty());
    }
}

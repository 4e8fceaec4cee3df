//! Cross-page selection set.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::model::Artwork;
use crate::model::ArtworkId;

/// Selected artworks, keyed by id, spanning every page visited.
///
/// Only one page of records is resident at a time, so the set keeps its own
/// copy of each selected record. Entries for pages other than the visible
/// one are never touched by a page diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashMap<ArtworkId, Artwork>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected records.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.selected.contains_key(&id)
    }

    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.selected.get(&id)
    }

    /// Iterates over selected records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Artwork> {
        self.selected.values()
    }

    /// Selected records sorted by id.
    pub fn sorted(&self) -> Vec<&Artwork> {
        let mut records: Vec<&Artwork> = self.selected.values().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Reconciles the visible page's reported selection into the set.
    ///
    /// For every record on `page`: selected ids are inserted (using the page's
    /// copy of the record), the rest are removed. Ids not on `page` are left
    /// alone. Reported ids that are not on the page are ignored.
    pub fn apply_page_diff(&mut self, page: &[Artwork], selected: &HashSet<ArtworkId>) {
        for record in page {
            if selected.contains(&record.id) {
                self.selected.insert(record.id, record.clone());
            } else {
                self.selected.remove(&record.id);
            }
        }
    }

    /// Replaces the whole set with `records`.
    pub fn replace_with(&mut self, records: impl IntoIterator<Item = Artwork>) {
        self.selected.clear();
        self.selected
            .extend(records.into_iter().map(|record| (record.id, record)));
    }

    /// Records of `page` that are selected, in page order.
    pub fn selected_on<'a>(&self, page: &'a [Artwork]) -> Vec<&'a Artwork> {
        page.iter().filter(|r| self.contains(r.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[u64]) -> Vec<Artwork> {
        ids.iter().map(|&id| Artwork::new(id).with_title(format!("Artwork {}", id))).collect()
    }

    fn ids(ids: &[u64]) -> HashSet<ArtworkId> {
        ids.iter().map(|&id| ArtworkId(id)).collect()
    }

    #[test]
    fn test_diff_inserts_and_removes_on_page() {
        let mut set = SelectionSet::new();
        let records = page(&[1, 2, 3]);

        set.apply_page_diff(&records, &ids(&[1, 3]));
        assert_eq!(set.len(), 2);
        assert!(set.contains(ArtworkId(1)));
        assert!(set.contains(ArtworkId(3)));

        set.apply_page_diff(&records, &ids(&[2]));
        assert_eq!(set.len(), 1);
        assert!(set.contains(ArtworkId(2)));
    }

    #[test]
    fn test_diff_leaves_other_pages_alone() {
        let mut set = SelectionSet::new();
        let first = page(&[1, 2]);
        let second = page(&[3, 4]);

        set.apply_page_diff(&first, &ids(&[1, 2]));
        set.apply_page_diff(&second, &ids(&[4]));
        set.apply_page_diff(&second, &ids(&[]));

        assert_eq!(set.len(), 2);
        assert_eq!(set.selected_on(&first).len(), 2);
        assert!(set.selected_on(&second).is_empty());
    }

    #[test]
    fn test_diff_ignores_ids_not_on_page() {
        let mut set = SelectionSet::new();
        set.apply_page_diff(&page(&[1]), &ids(&[1, 99]));
        assert_eq!(set.len(), 1);
        assert!(!set.contains(ArtworkId(99)));
    }

    #[test]
    fn test_diff_overwrites_with_page_copy() {
        let mut set = SelectionSet::new();
        set.apply_page_diff(&[Artwork::new(5).with_title("Old")], &ids(&[5]));
        set.apply_page_diff(&[Artwork::new(5).with_title("New")], &ids(&[5]));
        assert_eq!(set.get(ArtworkId(5)).unwrap().title.as_deref(), Some("New"));
    }

    #[test]
    fn test_replace_with() {
        let mut set = SelectionSet::new();
        set.apply_page_diff(&page(&[1, 2]), &ids(&[1, 2]));
        set.replace_with(page(&[7, 8, 9]));
        assert_eq!(
            set.sorted().iter().map(|r| r.id.0).collect::<Vec<_>>(),
            vec![7, 8, 9]
        );
    }

    #[test]
    fn test_selected_on_keeps_page_order() {
        let mut set = SelectionSet::new();
        let records = page(&[30, 10, 20]);
        set.apply_page_diff(&records, &ids(&[20, 30]));
        let on_page: Vec<u64> = set.selected_on(&records).iter().map(|r| r.id.0).collect();
        assert_eq!(on_page, vec![30, 20]);
    }
}

use std::collections::HashSet;

use shared::domain::{Artwork, ArtworkId};

/// Cross-page record of chosen artworks. Membership does not depend on which rows are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ArtworkId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn insert_all<'a>(&mut self, rows: impl IntoIterator<Item = &'a Artwork>) {
        self.ids.extend(rows.into_iter().map(|row| row.id));
    }

    pub fn remove_all<'a>(&mut self, rows: impl IntoIterator<Item = &'a Artwork>) {
        for row in rows {
            self.ids.remove(&row.id);
        }
    }

    pub fn sorted_ids(&self) -> Vec<ArtworkId> {
        let mut ids: Vec<_> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Rows of `window` that are selected, in window order.
    pub fn view_of<'a>(&self, window: &'a [Artwork]) -> Vec<&'a Artwork> {
        window.iter().filter(|row| self.contains(row.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[i64]) -> Vec<Artwork> {
        ids.iter()
            .map(|id| Artwork::new(*id, format!("Artwork {id}")))
            .collect()
    }

    #[test]
    fn view_keeps_window_order() {
        let window = rows(&[5, 3, 9, 1]);
        let mut selection = SelectionSet::new();
        selection.insert_all(rows(&[1, 5, 42]).iter());

        let view: Vec<_> = selection.view_of(&window).iter().map(|row| row.id.0).collect();
        assert_eq!(view, vec![5, 1]);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn remove_all_leaves_other_pages_alone() {
        let page_one = rows(&[1, 2, 3]);
        let page_two = rows(&[11, 12]);
        let mut selection = SelectionSet::new();
        selection.insert_all(page_one.iter().chain(page_two.iter()));

        selection.remove_all(page_one.iter());

        assert_eq!(selection.sorted_ids(), vec![ArtworkId(11), ArtworkId(12)]);
        assert!(selection.view_of(&page_one).is_empty());
    }
}

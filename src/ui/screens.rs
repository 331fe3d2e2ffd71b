use crate::catalog::{display_title, filter, Facets};
use crate::models::ListingRecord;

use super::forms::cycle_facet;

/// Public grid: the active facets plus the selected card. The visible cards
/// are re-derived from the store on every frame.
pub(crate) struct GridScreen {
    pub(crate) facets: Facets,
    pub(crate) selected: usize,
}

impl GridScreen {
    pub(crate) fn new(facets: Facets) -> Self {
        Self {
            facets,
            selected: 0,
        }
    }

    pub(crate) fn visible(&self, records: &[ListingRecord]) -> Vec<ListingRecord> {
        filter(records, &self.facets)
    }

    pub(crate) fn title(&self) -> String {
        display_title(&self.facets)
    }

    pub(crate) fn cycle_tech(&mut self, forward: bool) {
        self.facets.tech = cycle_facet(self.facets.tech.as_ref(), forward);
        self.selected = 0;
    }

    pub(crate) fn cycle_project(&mut self, forward: bool) {
        self.facets.project = cycle_facet(self.facets.project.as_ref(), forward);
        self.selected = 0;
    }

    pub(crate) fn clear_facets(&mut self) {
        self.facets = Facets::default();
        self.selected = 0;
    }

    /// Move by `offset` cards, ignoring moves that would leave the grid.
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        let new_index = self.selected as isize + offset;
        if (0..len as isize).contains(&new_index) {
            self.selected = new_index as usize;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Admin table: just the selected row; rows are the full catalog.
pub(crate) struct AdminScreen {
    pub(crate) selected: usize,
}

impl AdminScreen {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::models::Tech;

    #[test]
    fn facet_changes_reset_selection() {
        let mut grid = GridScreen::new(Facets::default());
        grid.selected = 5;
        grid.cycle_tech(true);
        assert_eq!(grid.facets.tech, Some(Tech::Js));
        assert_eq!(grid.selected, 0);
        assert_eq!(grid.title(), "JS Courses");

        let visible = grid.visible(&default_catalog());
        let ids: Vec<_> = visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "7"]);

        grid.clear_facets();
        assert_eq!(grid.title(), "All Projects");
    }

    #[test]
    fn grid_moves_stay_inside() {
        let mut grid = GridScreen::new(Facets::default());
        grid.move_selection(-1, 4);
        assert_eq!(grid.selected, 0);
        grid.move_selection(3, 4);
        assert_eq!(grid.selected, 3);
        grid.move_selection(3, 4);
        assert_eq!(grid.selected, 3);
        grid.ensure_in_bounds(2);
        assert_eq!(grid.selected, 1);
    }

    #[test]
    fn admin_moves_clamp() {
        let mut admin = AdminScreen::new();
        admin.move_selection(10, 3);
        assert_eq!(admin.selected, 2);
        admin.move_selection(-10, 3);
        assert_eq!(admin.selected, 0);
        admin.select_last(3);
        assert_eq!(admin.selected, 2);
        admin.ensure_in_bounds(0);
        assert_eq!(admin.selected, 0);
    }
}

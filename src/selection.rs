use uuid::Uuid;

/// Single-slot card selection with toggle semantics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Uuid>,
}

impl Selection {
    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected == Some(id)
    }

    /// Selecting the selected card clears the slot; any other card replaces it.
    pub fn toggle(&mut self, id: Uuid) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drops the selection if it points at a card that is gone.
    pub fn retain(&mut self, exists: impl Fn(Uuid) -> bool) {
        if let Some(id) = self.selected {
            if !exists(id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_semantics() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut selection = Selection::default();

        selection.toggle(a);
        assert!(selection.is_selected(a));
        selection.toggle(b);
        assert_eq!(selection.selected(), Some(b));
        selection.toggle(b);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_retain_drops_missing() {
        let a = Uuid::new_v4();
        let mut selection = Selection::default();
        selection.toggle(a);
        selection.retain(|id| id != a);
        assert_eq!(selection.selected(), None);
    }
}

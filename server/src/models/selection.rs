use super::{ContentKind, Mood};

/// Current mood/category selection. The category set is clamped to size
/// at most one: picking a second category replaces the first, re-picking
/// the current one clears it, and changing mood clears the category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    mood: Option<Mood>,
    category: Option<ContentKind>,
}

impl Selection {
    pub fn select_mood(&mut self, mood: Mood) {
        self.mood = Some(mood);
        self.category = None;
    }

    pub fn toggle_category(&mut self, kind: ContentKind) {
        self.category = match self.category {
            Some(current) if current == kind => None,
            _ => Some(kind),
        };
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn category(&self) -> Option<ContentKind> {
        self.category
    }

    /// Both a mood and exactly one category, or nothing
    pub fn complete(&self) -> Option<(Mood, ContentKind)> {
        Some((self.mood?, self.category?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_incomplete() {
        assert_eq!(Selection::default().complete(), None);
    }

    #[test]
    fn second_category_replaces_first() {
        let mut sel = Selection::default();
        sel.select_mood(Mood::Relax);
        sel.toggle_category(ContentKind::Music);
        sel.toggle_category(ContentKind::Book);
        assert_eq!(sel.category(), Some(ContentKind::Book));
        assert_eq!(sel.complete(), Some((Mood::Relax, ContentKind::Book)));
    }

    #[test]
    fn retoggle_clears_category() {
        let mut sel = Selection::default();
        sel.select_mood(Mood::Happy);
        sel.toggle_category(ContentKind::Quote);
        sel.toggle_category(ContentKind::Quote);
        assert_eq!(sel.category(), None);
        assert_eq!(sel.complete(), None);
    }

    #[test]
    fn mood_change_clears_category() {
        let mut sel = Selection::default();
        sel.select_mood(Mood::Sad);
        sel.toggle_category(ContentKind::Verse);
        sel.select_mood(Mood::Motivated);
        assert_eq!(sel.mood(), Some(Mood::Motivated));
        assert_eq!(sel.category(), None);
    }

    #[test]
    fn category_without_mood_is_incomplete() {
        let mut sel = Selection::default();
        sel.toggle_category(ContentKind::Music);
        assert_eq!(sel.complete(), None);
    }
}

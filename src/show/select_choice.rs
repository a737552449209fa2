use super::{Selection, Show};
use crate::log_debug;

impl Show {
    /// React to the quiz answer at `index` being picked
    pub fn select_choice(&self, index: usize) -> Selection {
        let Some(choice) = self.stage.choice(index) else {
            log_debug!("no quiz choice at index {}", index);
            return Selection::Ignored;
        };

        if choice.element.is_disabled() {
            return Selection::Ignored;
        }

        if !choice.correct {
            self.mark_wrong(index);
            return Selection::Wrong;
        }

        if self.begin_reveal(index) {
            Selection::Correct
        } else {
            Selection::Ignored
        }
    }
}

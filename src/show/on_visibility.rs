use super::Show;
use crate::stage::{tag, SceneId};

impl Show {
    /// Pause the skier animation while the host is hidden
    pub fn on_visibility(&self, hidden: bool) {
        let Some(skier) = self.element(SceneId::Skier) else { return };
        if hidden {
            skier.add_tag(tag::PAUSED);
        } else {
            skier.remove_tag(tag::PAUSED);
        }
    }
}

use super::Show;
use crate::effects::sleep_ms;
use crate::stage::tag;

impl Show {
    /// Flag a wrong answer and shake it; the shake clears itself
    pub(crate) fn mark_wrong(&self, index: usize) {
        let Some(choice) = self.stage.choice(index) else { return };
        let el = choice.element.clone();

        el.remove_tag(tag::CORRECT);
        el.add_tag(tag::WRONG);
        el.add_tag(tag::SHAKE);

        let shake_ms = self.config.quiz.shake_ms;
        self.tasks.spawn(async move {
            sleep_ms(shake_ms).await;
            el.remove_tag(tag::SHAKE);
        });
    }
}

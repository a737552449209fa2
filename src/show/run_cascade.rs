use tokio::time::Instant;

use super::Show;
use crate::config::Step;
use crate::effects::sleep_from;
use crate::log_debug;

impl Show {
    /// Schedule every cue relative to `origin`; cues run side by side,
    /// the steps inside one cue run in order.
    pub(crate) fn run_cascade(&self, origin: Instant) {
        for (i, cue) in self.config.cascade.iter().enumerate() {
            let show = self.clone();
            let at_ms = cue.at_ms;
            self.tasks.spawn(async move {
                sleep_from(origin, at_ms).await;
                let steps = show.config.cascade[i].steps.clone();
                let span: Option<u64> = steps.iter().map(Step::duration_ms).sum();
                log_debug!("cue {} fired at +{}ms, {} steps, span {:?}ms", i, at_ms, steps.len(), span);
                for step in &steps {
                    show.run_step(step).await;
                }
            });
        }
    }
}

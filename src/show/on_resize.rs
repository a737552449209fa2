use super::Show;
use crate::effects::autofit;
use crate::log_debug;
use crate::stage::SceneId;

impl Show {
    /// The viewport changed to `width_px`: re-measure the wordmark
    /// containers and refit the date and guest lines that are on screen.
    ///
    /// Inline sizes are cleared first so a wider viewport lets them grow back.
    pub fn on_resize(&self, width_px: f32) {
        for id in SceneId::WORDMARKS {
            if let Some(el) = self.element(id) {
                el.set_container_width(Some(width_px));
            }
        }
        if let Some(flash) = self.element(SceneId::AltitudeFlash) {
            flash.set_container_width(Some(width_px));
        }

        for id in [SceneId::Date, SceneId::Guest] {
            let Some(el) = self.element(id) else { continue };
            if !el.is_perceivable() {
                continue;
            }
            el.clear_font_px();
            let fitted = autofit(Some(el), self.stage.measure(), self.config.autofit);
            log_debug!("refit {} at width {} -> {:?}", id.as_str(), width_px, fitted);
        }
    }
}

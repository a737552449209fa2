pub mod measure;
pub mod quiz;
pub mod scenery;
pub mod signage;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::app::App;
use crate::show::Show;
use crate::stage::SceneId;

pub use measure::{cells_to_px, CellMeasure};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        StageView {
            show: &self.show,
            selected: self.selected,
            frame: self.frame,
            skier_progress: self.skier_progress,
        }
        .render(area, buf);
    }
}

/// One frame of the show, layered back to front
#[derive(Debug, Clone, Copy)]
pub struct StageView<'a> {
    pub show: &'a Show,
    pub selected: usize,
    pub frame: u64,
    pub skier_progress: u64,
}

impl Widget for StageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stage = self.show.stage();
        let mut rng = rand::thread_rng();

        if let Some(bg) = stage.element(SceneId::Background) {
            scenery::render_sky(bg, area, buf, &mut rng);
        }
        if let Some(snow) = stage.element(SceneId::Snow) {
            scenery::render_snow(snow, self.frame, area, buf, &mut rng);
        }
        if let Some(skier) = stage.element(SceneId::Skier) {
            scenery::render_skier(skier, self.skier_progress, area, buf, &mut rng);
        }
        if let Some(quiz) = stage.element(SceneId::Quiz) {
            quiz::render_quiz(
                quiz,
                &self.show.config().quiz.question,
                stage.choices(),
                self.selected,
                self.frame,
                area,
                buf,
                &mut rng,
            );
        }
        if let Some(blackout) = stage.element(SceneId::Blackout) {
            scenery::render_blackout(blackout, area, buf);
        }

        let middle = area.y + area.height / 2;
        if let Some(presents) = stage.element(SceneId::Presents) {
            signage::render_neon(presents, style::NEON, middle.saturating_sub(1), area, buf, &mut rng);
        }
        if let Some(flash) = stage.element(SceneId::AltitudeFlash) {
            signage::render_neon(flash, style::NEON, middle, area, buf, &mut rng);
        }
        if let Some(intro) = stage.element(SceneId::IntroLine) {
            signage::render_intro(intro, area, buf, &mut rng);
        }
        if let Some(container) = stage.element(SceneId::AltitudeContainer) {
            let marks = SceneId::WORDMARKS.map(|id| stage.element(id));
            signage::render_wordmarks(container, marks, area, buf, &mut rng);
        }
        if let Some(info) = stage.element(SceneId::Info) {
            signage::render_info(info, area, buf, &mut rng);
        }
        if let Some(overlay) = stage.element(SceneId::SoundOverlay) {
            signage::render_speaker(overlay, stage.element(SceneId::Speaker), area, buf);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

mod element;
mod measure;

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::config::ShowConfig;

pub use element::{tag, Element, ElementState};
pub use measure::{MonospaceMeasure, TextMeasure};

/// Stylesheet size of the big wordmarks before any autofit
pub const WORDMARK_FONT_PX: f32 = 96.0;

/// Every named element that takes part in the show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    Quiz,
    Background,
    Snow,
    Skier,
    Blackout,
    Presents,
    AltitudeFlash,
    AltitudeContainer,
    Title,
    Date,
    Guest,
    IntroLine,
    Info,
    SoundOverlay,
    Speaker,
}

impl SceneId {
    pub const ALL: [SceneId; 15] = [
        SceneId::Quiz,
        SceneId::Background,
        SceneId::Snow,
        SceneId::Skier,
        SceneId::Blackout,
        SceneId::Presents,
        SceneId::AltitudeFlash,
        SceneId::AltitudeContainer,
        SceneId::Title,
        SceneId::Date,
        SceneId::Guest,
        SceneId::IntroLine,
        SceneId::Info,
        SceneId::SoundOverlay,
        SceneId::Speaker,
    ];

    /// The wordmarks shown inside the altitude container
    pub const WORDMARKS: [SceneId; 3] = [SceneId::Title, SceneId::Date, SceneId::Guest];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneId::Quiz => "quiz",
            SceneId::Background => "bg",
            SceneId::Snow => "snow-wrap",
            SceneId::Skier => "skier",
            SceneId::Blackout => "blackout",
            SceneId::Presents => "presents",
            SceneId::AltitudeFlash => "altitude-flash",
            SceneId::AltitudeContainer => "altitude-container",
            SceneId::Title => "altitude-title",
            SceneId::Date => "altitude-date",
            SceneId::Guest => "altitude-guest",
            SceneId::IntroLine => "intro-line",
            SceneId::Info => "info",
            SceneId::SoundOverlay => "sound-overlay",
            SceneId::Speaker => "speaker-inline",
        }
    }
}

/// One answer control of the quiz
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub element: Element,
    pub correct: bool,
}

/// Everything the show touches, passed around explicitly
#[derive(Debug, Clone)]
pub struct Stage {
    elements: HashMap<SceneId, Element>,
    choices: Vec<Choice>,
    measure: Arc<dyn TextMeasure>,
}

impl Stage {
    /// A stage with every scene element present and the given answers
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let elements = SceneId::ALL
            .iter()
            .map(|id| (*id, Element::new(id.as_str())))
            .collect::<HashMap<_, _>>();

        let quiz = &elements[&SceneId::Quiz];
        quiz.set_opacity(1.0);
        quiz.set_hidden(false);

        for id in SceneId::WORDMARKS.iter().chain([SceneId::AltitudeFlash].iter()) {
            elements[id].set_base_font_px(Some(WORDMARK_FONT_PX));
        }

        let choices = answers
            .into_iter()
            .enumerate()
            .map(|(i, (label, correct))| Choice {
                label: label.into(),
                element: Element::shown(format!("option-{}", i)),
                correct,
            })
            .collect();

        Self {
            elements,
            choices,
            measure: Arc::new(MonospaceMeasure::default()),
        }
    }

    /// Build the stage a config describes: quiz answers and preset texts
    pub fn from_config(config: &ShowConfig) -> Self {
        let stage = Self::new(
            config
                .quiz
                .options
                .iter()
                .map(|o| (o.label.clone(), o.correct)),
        );

        let presets = [
            (SceneId::Presents, &config.texts.presents),
            (SceneId::Title, &config.texts.title),
            (SceneId::IntroLine, &config.intro.text),
        ];
        for (id, text) in presets {
            if let Some(el) = stage.element(id) {
                el.set_text(text.clone());
            }
        }

        stage
    }

    /// Drop an element, as if the host document never had it
    pub fn without(mut self, id: SceneId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn with_measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn element(&self, id: SceneId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }
}

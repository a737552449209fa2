use serde::{Deserialize, Serialize};

use crate::effects::{BlinkTiming, TypedLine};
use crate::stage::{tag, SceneId};

/// A batch of steps started at a fixed offset from the cascade start.
///
/// Steps inside a cue run strictly in order; cues never wait on each
/// other, so two cues at the same offset run side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub at_ms: u64,
    pub steps: Vec<Step>,
}

impl Cue {
    pub fn new(at_ms: u64, steps: Vec<Step>) -> Self {
        Self { at_ms, steps }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Step {
    /// Neon blink, awaited
    Blink {
        target: SceneId,
        #[serde(default)]
        timing: BlinkTiming,
    },
    SetText {
        target: SceneId,
        text: String,
    },
    AddTag {
        target: SceneId,
        tag: String,
    },
    RemoveTag {
        target: SceneId,
        tag: String,
    },
    /// Set the accessibility-hidden flag
    SetHidden {
        target: SceneId,
        hidden: bool,
    },
    Wait {
        ms: u64,
    },
    Autofit {
        target: SceneId,
    },
    /// Show a wordmark: optional text, `show` tag, autofit, blink, then pause
    Wordmark {
        target: SceneId,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        timing: BlinkTiming,
        #[serde(default)]
        pause_ms: u64,
    },
    TypeLines {
        target: SceneId,
        lines: Vec<TypedLine>,
        #[serde(default = "default_cps")]
        cps: f32,
    },
    /// Start the perpetual flash loop; replaces any loop already running
    FlashLoop {
        target: SceneId,
        #[serde(default)]
        texts: Vec<String>,
    },
    /// Fade out then rewind; without `fade_ms` the audio fade-out applies
    StopMusic {
        #[serde(default)]
        fade_ms: Option<u64>,
    },
}

fn default_cps() -> f32 {
    40.0
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Blink { .. } => "blink",
            Step::SetText { .. } => "set_text",
            Step::AddTag { .. } => "add_tag",
            Step::RemoveTag { .. } => "remove_tag",
            Step::SetHidden { .. } => "set_hidden",
            Step::Wait { .. } => "wait",
            Step::Autofit { .. } => "autofit",
            Step::Wordmark { .. } => "wordmark",
            Step::TypeLines { .. } => "type_lines",
            Step::FlashLoop { .. } => "flash_loop",
            Step::StopMusic { .. } => "stop_music",
        }
    }

    pub fn target(&self) -> Option<SceneId> {
        match self {
            Step::Blink { target, .. }
            | Step::SetText { target, .. }
            | Step::AddTag { target, .. }
            | Step::RemoveTag { target, .. }
            | Step::SetHidden { target, .. }
            | Step::Autofit { target }
            | Step::Wordmark { target, .. }
            | Step::TypeLines { target, .. }
            | Step::FlashLoop { target, .. } => Some(*target),
            Step::Wait { .. } | Step::StopMusic { .. } => None,
        }
    }

    /// Longest time this step can hold up its cue, if bounded
    pub fn duration_ms(&self) -> Option<u64> {
        match self {
            Step::Blink { timing, .. } => Some(timing.total_ms()),
            Step::Wait { ms } => Some(*ms),
            Step::Wordmark { timing, pause_ms, .. } => Some(timing.total_ms() + pause_ms),
            Step::StopMusic { fade_ms } => *fade_ms,
            Step::SetText { .. }
            | Step::AddTag { .. }
            | Step::RemoveTag { .. }
            | Step::SetHidden { .. }
            | Step::Autofit { .. }
            | Step::FlashLoop { .. } => Some(0),
            Step::TypeLines { .. } => None,
        }
    }
}

pub const BIG_DATE_TEXT: &str = "SAT · DEC 5";
pub const BIG_GUEST_TEXT: &str = "FT. EMERSON, AMXLIA";
pub const FLASH_TEXT: &str = "ALTITUDE";

/// The reveal: presents sign, big flash, snow, scenery, then the wordmarks
/// and the ambient flash loop over black.
pub fn default_cascade() -> Vec<Cue> {
    let sign = BlinkTiming::new(1100, 500, 900, true);
    let mark = BlinkTiming::new(900, 400, 700, true);
    let glitch_in = BlinkTiming::reveal(900);

    vec![
        Cue::new(400, vec![Step::Blink { target: SceneId::Presents, timing: sign }]),
        Cue::new(
            3400,
            vec![
                Step::SetText { target: SceneId::AltitudeFlash, text: FLASH_TEXT.to_string() },
                Step::Blink { target: SceneId::AltitudeFlash, timing: sign },
            ],
        ),
        Cue::new(6800, vec![Step::Blink { target: SceneId::Snow, timing: glitch_in }]),
        Cue::new(
            6800,
            vec![
                Step::AddTag { target: SceneId::Snow, tag: tag::RUN.to_string() },
                Step::RemoveTag { target: SceneId::Blackout, tag: tag::VISIBLE.to_string() },
            ],
        ),
        Cue::new(9200, vec![Step::Blink { target: SceneId::Background, timing: glitch_in }]),
        Cue::new(9200, vec![Step::Blink { target: SceneId::Skier, timing: glitch_in }]),
        Cue::new(
            11200,
            vec![
                Step::AddTag { target: SceneId::AltitudeContainer, tag: tag::VISIBLE.to_string() },
                Step::SetHidden { target: SceneId::AltitudeContainer, hidden: false },
                Step::Wordmark { target: SceneId::Title, text: None, timing: mark, pause_ms: 2000 },
                Step::Wordmark {
                    target: SceneId::Date,
                    text: Some(BIG_DATE_TEXT.to_string()),
                    timing: mark,
                    pause_ms: 2000,
                },
                Step::Wordmark {
                    target: SceneId::Guest,
                    text: Some(BIG_GUEST_TEXT.to_string()),
                    timing: mark,
                    pause_ms: 2000,
                },
                Step::AddTag { target: SceneId::Blackout, tag: tag::VISIBLE.to_string() },
                Step::Wait { ms: 800 },
                Step::SetText { target: SceneId::AltitudeFlash, text: FLASH_TEXT.to_string() },
                Step::FlashLoop {
                    target: SceneId::AltitudeFlash,
                    texts: vec![FLASH_TEXT.to_string(), BIG_DATE_TEXT.to_string()],
                },
            ],
        ),
    ]
}

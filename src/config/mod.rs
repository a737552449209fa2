mod cue;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::effects::{AutofitOptions, FlashTiming, LineTiming, RangeMs};
use crate::error::{RevealError, Result};

pub use cue::{default_cascade, Cue, Step, BIG_DATE_TEXT, BIG_GUEST_TEXT, FLASH_TEXT};

/// Everything that shapes one run of the show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Seed for the flash loop's random timing; entropy when absent
    pub seed: Option<u64>,
    pub audio: AudioConfig,
    pub quiz: QuizConfig,
    pub texts: SceneTexts,
    pub intro: IntroConfig,
    pub timing: TimingConfig,
    pub flash: FlashTiming,
    pub autofit: AutofitOptions,
    pub cascade: Vec<Cue>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            seed: None,
            audio: AudioConfig::default(),
            quiz: QuizConfig::default(),
            texts: SceneTexts::default(),
            intro: IntroConfig::default(),
            timing: TimingConfig::default(),
            flash: FlashTiming::default(),
            autofit: AutofitOptions::default(),
            cascade: default_cascade(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Track to loop; a missing file means a silent show
    pub path: Option<String>,
    pub volume: f32,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub start_at_ms: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            path: Some("assets/audio/bgm.ogg".to_string()),
            volume: 0.4,
            fade_in_ms: 2000,
            fade_out_ms: 600,
            start_at_ms: 0,
            looping: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub question: String,
    pub options: Vec<QuizOption>,
    /// How long the wrong-answer shake runs before it clears itself
    pub shake_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        let option = |label: &str, correct: bool| QuizOption {
            label: label.to_string(),
            correct,
        };
        Self {
            question: "Where does the last day of class end up?".to_string(),
            options: vec![
                option("The library", false),
                option("At altitude", true),
                option("Back in bed", false),
                option("The parking lot", false),
            ],
            shake_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTexts {
    pub presents: String,
    pub title: String,
}

impl Default for SceneTexts {
    fn default() -> Self {
        Self {
            presents: "SAE PRESENTS".to_string(),
            title: FLASH_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub text: String,
    #[serde(flatten)]
    pub timing: LineTiming,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            text: "We invite you to celebrate the last day of class".to_string(),
            timing: LineTiming::default(),
        }
    }
}

/// Fixed offsets around the cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fade applied to the answers that were not picked
    pub option_fade_ms: u64,
    /// Blackout to invitation line
    pub quiz_hide_delay_ms: u64,
    /// How long the speaker overlay stays up
    pub speaker_ms: u64,
    /// Invitation line end to music start and cascade start
    pub music_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            option_fade_ms: 300,
            quiz_hide_delay_ms: 600,
            speaker_ms: 2000,
            music_delay_ms: 2000,
        }
    }
}

impl ShowConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ShowConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Load `path` if given, otherwise the built-in show
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.quiz.options.is_empty() {
            return Err("quiz needs at least one option".into());
        }

        let correct = self.quiz.options.iter().filter(|o| o.correct).count();
        if correct != 1 {
            return Err(RevealError::ConfigError(format!(
                "quiz needs exactly one correct option, found {}",
                correct
            )));
        }

        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(RevealError::ConfigError(format!(
                "audio volume {} is outside [0, 1]",
                self.audio.volume
            )));
        }

        if !(self.autofit.fraction > 0.0 && self.autofit.fraction <= 1.0) {
            return Err(RevealError::ConfigError(format!(
                "autofit fraction {} is outside (0, 1]",
                self.autofit.fraction
            )));
        }

        let ranges: [(&str, RangeMs); 4] = [
            ("flash.in_ms", self.flash.in_ms),
            ("flash.hold_ms", self.flash.hold_ms),
            ("flash.out_ms", self.flash.out_ms),
            ("flash.pause_ms", self.flash.pause_ms),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(RevealError::ConfigError(format!(
                    "{} has min {} above max {}",
                    name, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::SceneId;

    #[test]
    fn test_default_config_is_valid() {
        let config = ShowConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.quiz.options[1].correct);
        assert_eq!(config.audio.volume, 0.4);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
seed: 11
audio:
  volume: 0.6
  loop: false
intro:
  text: "Dress warm"
  char_delay_ms: 30
"#;
        let config = ShowConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.audio.volume, 0.6);
        assert!(!config.audio.looping);
        assert_eq!(config.audio.fade_in_ms, 2000);
        assert_eq!(config.intro.text, "Dress warm");
        assert_eq!(config.intro.timing.char_delay_ms, 30);
        assert_eq!(config.intro.timing.hold_ms, 2200);
        assert_eq!(config.cascade, default_cascade());
    }

    #[test]
    fn test_cascade_from_yaml() {
        let yaml = r#"
cascade:
  - at_ms: 100
    steps:
      - do: set_text
        target: altitude_flash
        text: "HELLO"
      - do: flash_loop
        target: altitude_flash
"#;
        let config = ShowConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.cascade.len(), 1);
        assert_eq!(config.cascade[0].steps[1].target(), Some(SceneId::AltitudeFlash));
    }

    #[test]
    fn test_two_correct_answers_rejected() {
        let yaml = r#"
quiz:
  options:
    - label: "A"
      correct: true
    - label: "B"
      correct: true
"#;
        let err = ShowConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, RevealError::ConfigError(_)));
    }

    #[test]
    fn test_bad_volume_and_ranges_rejected() {
        let mut config = ShowConfig::default();
        config.audio.volume = 1.5;
        assert!(config.validate().is_err());

        let mut config = ShowConfig::default();
        config.flash.pause_ms = RangeMs::new(900, 100);
        assert!(config.validate().is_err());

        let mut config = ShowConfig::default();
        config.autofit.fraction = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("show.yaml");
        std::fs::write(&path, "seed: 5\n").unwrap();
        let config = ShowConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.seed, Some(5));

        let missing = ShowConfig::load_or_default(Some(&dir.path().join("nope.yaml")));
        assert!(matches!(missing, Err(RevealError::IoError(_))));

        assert_eq!(ShowConfig::load_or_default(None).unwrap(), ShowConfig::default());
    }
}

use std::sync::Arc;
use tokio::time::Duration;

use altitude_reveal::config::{default_cascade, Cue, ShowConfig, Step};
use altitude_reveal::effects::BlinkTiming;
use altitude_reveal::stage::{tag, SceneId, Stage};
use altitude_reveal::util::audio::{MediaChannel, MemoryChannel};
use altitude_reveal::{Selection, Show, ShowPhase, Soundtrack};

fn build(config: ShowConfig, channel: &MemoryChannel) -> Show {
    let stage = Stage::from_config(&config);
    Show::new(stage, config, Soundtrack::new(Arc::new(channel.clone())))
}

fn seeded() -> ShowConfig {
    ShowConfig {
        seed: Some(2024),
        ..ShowConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_wrong_answer_leaves_quiz_open() {
    let channel = MemoryChannel::new();
    let show = build(seeded(), &channel);

    assert_eq!(show.select_choice(0), Selection::Wrong);
    let wrong = &show.stage().choice(0).unwrap().element;
    assert!(wrong.has_tag(tag::WRONG));
    assert!(wrong.has_tag(tag::SHAKE));
    for other in &show.stage().choices()[1..] {
        assert!(!other.element.is_disabled());
        assert!(!other.element.has_tag(tag::WRONG));
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(show.phase(), ShowPhase::Idle);
    assert_eq!(channel.play_calls(), 0);
    assert!(!show.stage().element(SceneId::Blackout).unwrap().has_tag(tag::VISIBLE));
}

#[tokio::test(start_paused = true)]
async fn test_full_reveal_reaches_the_flash_loop() {
    let channel = MemoryChannel::new();
    let show = build(seeded(), &channel);
    let mut phases = show.subscribe();

    assert_eq!(show.select_choice(1), Selection::Correct);
    assert_eq!(show.phase(), ShowPhase::Blackout);
    assert!(show.stage().choices().iter().all(|c| c.element.is_disabled()));

    let mut seen = vec![ShowPhase::Blackout];
    while *seen.last().unwrap() != ShowPhase::Looping {
        phases.changed().await.unwrap();
        let phase = *phases.borrow_and_update();
        if seen.last() != Some(&phase) {
            seen.push(phase);
        }
    }
    assert_eq!(
        seen,
        vec![ShowPhase::Blackout, ShowPhase::Invitation, ShowPhase::Cascade, ShowPhase::Looping]
    );

    assert!(show.is_flash_looping());
    assert!(!channel.is_paused());
    assert_eq!(channel.volume(), 0.4);
    assert!(channel.is_looping());

    let stage = show.stage();
    assert!(stage.element(SceneId::Quiz).unwrap().has_tag(tag::HIDDEN));
    assert!(stage.element(SceneId::Snow).unwrap().has_tag(tag::RUN));
    assert!(stage.element(SceneId::Blackout).unwrap().has_tag(tag::VISIBLE));
    assert!(stage.element(SceneId::Background).unwrap().is_perceivable());
    assert!(stage.element(SceneId::Skier).unwrap().is_perceivable());
    assert_eq!(stage.element(SceneId::Guest).unwrap().text(), "FT. EMERSON, AMXLIA");

    // The loop keeps going on its own
    let cycles = show.flash_cycles();
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(show.flash_cycles() > cycles);

    show.cancel();
    assert!(!show.is_flash_looping());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_playback_does_not_stop_the_show() {
    let channel = MemoryChannel::rejecting();
    let show = build(seeded(), &channel);
    show.select_choice(1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(show.phase(), ShowPhase::Looping);
    assert!(channel.is_paused());
    assert_eq!(channel.volume(), 0.0);
    show.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_missing_elements_are_skipped() {
    let config = seeded();
    let stage = Stage::from_config(&config)
        .without(SceneId::Presents)
        .without(SceneId::Skier)
        .without(SceneId::IntroLine)
        .without(SceneId::AltitudeFlash);
    let show = Show::new(stage, config, Soundtrack::silent());

    assert_eq!(show.select_choice(1), Selection::Correct);
    tokio::time::sleep(Duration::from_secs(60)).await;

    // The flash loop step had nothing to run on
    assert_eq!(show.phase(), ShowPhase::Cascade);
    assert!(!show.is_flash_looping());
    assert!(show.stage().element(SceneId::Background).unwrap().is_perceivable());
    assert_eq!(show.stage().element(SceneId::Date).unwrap().text(), "SAT · DEC 5");
}

#[tokio::test(start_paused = true)]
async fn test_stop_music_step_fades_out() {
    let channel = MemoryChannel::new();
    let mut config = seeded();
    config.intro.timing.hold_ms = 0;
    config.cascade = vec![Cue::new(3000, vec![Step::StopMusic { fade_ms: Some(600) }])];
    let show = build(config, &channel);

    // Music starts at ~6s and is fully up by ~8s; the stop fires at ~9s
    show.select_choice(1);
    tokio::time::sleep(Duration::from_millis(8500)).await;
    assert!(!channel.is_paused());
    assert_eq!(channel.volume(), 0.4);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(channel.is_paused());
    assert_eq!(channel.volume(), 0.0);
    assert_eq!(channel.position_ms(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_bare_stop_music_uses_audio_fade_out() {
    let step: Step = serde_yaml::from_str("do: stop_music\n").unwrap();
    assert_eq!(step, Step::StopMusic { fade_ms: None });

    let channel = MemoryChannel::new();
    let mut config = seeded();
    config.intro.timing.hold_ms = 0;
    config.audio.fade_out_ms = 4000;
    config.cascade = vec![Cue::new(3000, vec![step])];
    let show = build(config, &channel);

    // The stop fires at ~9s and ramps down over the configured 4s
    show.select_choice(1);
    tokio::time::sleep(Duration::from_millis(8500)).await;
    assert_eq!(channel.volume(), 0.4);
    channel.clear_history();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(!channel.is_paused());
    assert!(channel.volume() > 0.0 && channel.volume() < 0.4);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(channel.is_paused());
    assert_eq!(channel.volume(), 0.0);
    let history = channel.volume_history();
    assert!(history.len() > 10);
    assert!(history.windows(2).all(|w| w[1] <= w[0]));
}

#[tokio::test(start_paused = true)]
async fn test_missing_wordmark_keeps_its_time_in_the_cue() {
    let title_timing = BlinkTiming::new(900, 400, 700, true);
    let mut config = seeded();
    config.intro.timing.hold_ms = 0;
    config.cascade = vec![Cue::new(
        0,
        vec![
            Step::Wordmark {
                target: SceneId::Title,
                text: None,
                timing: title_timing,
                pause_ms: 2000,
            },
            Step::Wordmark {
                target: SceneId::Date,
                text: Some("D".to_string()),
                timing: BlinkTiming::default(),
                pause_ms: 0,
            },
        ],
    )];
    let stage = Stage::from_config(&config).without(SceneId::Title);
    let show = Show::new(stage, config, Soundtrack::silent());

    let mut phases = show.subscribe();
    show.select_choice(1);
    while *phases.borrow_and_update() != ShowPhase::Cascade {
        phases.changed().await.unwrap();
    }
    let origin = tokio::time::Instant::now();
    let date = show.stage().element(SceneId::Date).unwrap().clone();

    let gap = Duration::from_millis(title_timing.total_ms() + 2000);
    tokio::time::sleep_until(origin + gap - Duration::from_millis(100)).await;
    assert_ne!(date.text(), "D");

    tokio::time::sleep_until(origin + gap + Duration::from_millis(100)).await;
    assert_eq!(date.text(), "D");
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = ShowConfig::from_yaml(include_str!("../config/show.yaml")).unwrap();
    let defaults = ShowConfig::default();

    assert_eq!(config.audio, defaults.audio);
    assert_eq!(config.quiz, defaults.quiz);
    assert_eq!(config.intro, defaults.intro);
    assert_eq!(config.timing, defaults.timing);
    assert_eq!(config.flash, defaults.flash);
    assert_eq!(config.autofit, defaults.autofit);

    let builtin = default_cascade();
    assert_eq!(&config.cascade[..builtin.len()], &builtin[..]);
    assert!(matches!(
        config.cascade.last().unwrap().steps[0],
        Step::TypeLines { target: SceneId::Info, .. }
    ));
}

//! End-to-end runs over queue and config files

use cadence_playback::{Collaborators, ControllerConfig, PresentationCommand};
use cadence_sim::{load_tracks, LogAnalytics, LogNotifier, Simulation, SimulationOptions, StepKind};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn demo(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demo").join(name)
}

#[test]
fn test_demo_files_run() {
    let config = ControllerConfig::load_from(&demo("cadence.toml")).unwrap();
    let tracks = load_tracks(&demo("queue.json")).unwrap();

    let collaborators = Collaborators::disconnected()
        .with_notifier(Arc::new(LogNotifier::default()))
        .with_analytics(Arc::new(LogAnalytics));
    let options = SimulationOptions {
        tick_seconds: 5.0,
        live_seconds: 60.0,
        ..Default::default()
    };

    let mut simulation = Simulation::new(config, collaborators, options).unwrap();
    let transcript = simulation.run(tracks);

    assert_eq!(transcript.scrobbled(), vec!["al-1-01", "al-1-02"]);
    assert_eq!(transcript.of_kind(StepKind::Stopped).count(), 1);

    // Album mode: both album tracks share one gain, the radio stream has none
    let gains: Vec<f32> = transcript.of_kind(StepKind::Play).map(|s| s.gain).collect();
    assert_eq!(gains[0], gains[1]);
    assert!(gains[0] < 1.0);
    assert_eq!(gains[2], 1.0);
}

#[test]
fn test_config_overrides_title() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "app_title = \"Jukebox\"").unwrap();

    let config = ControllerConfig::load_from(file.path()).unwrap();
    let tracks = load_tracks(&demo("queue.json")).unwrap();

    let mut simulation = Simulation::new(
        config,
        Collaborators::disconnected(),
        SimulationOptions {
            tick_seconds: 10.0,
            live_seconds: 0.0,
            ..Default::default()
        },
    )
    .unwrap();
    let transcript = simulation.run(tracks);

    let first = transcript.commands().next().unwrap();
    assert_eq!(
        first,
        &PresentationCommand::SetTitle("So What - Miles Davis - Jukebox".to_string())
    );
    assert!(transcript
        .commands()
        .any(|c| c == &PresentationCommand::ResetTitle("Jukebox".to_string())));
}

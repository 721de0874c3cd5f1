//! Fairwalk CLI - headless study runner.
//!
//! Drives a [`Study`] with a scripted participant, then persists the export.
//!
//! ```text
//! main() -> load config -> run_study() -> write_export() -> summary
//!                              |
//!                              v
//!                   RunOutcome::Completed | Interrupted
//! ```
//!
//! # Frame Loop
//!
//! Each frame (default 16ms, ~60 FPS):
//!
//! 1. Wait for frame tick (or Ctrl-C)
//! 2. Advance the study by `frame x time_scale` of simulated time
//! 3. Let the scripted participant click, if it is ready
//! 4. Drain and log study events
//! 5. Stop once the study is complete

mod participant;

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fairwalk_config::{FairwalkConfig, RunnerSettings};
use fairwalk_core::{AvatarId, SelectionOutcome, Study, StudyEvent, SystemClock};
use fairwalk_types::Stage;

use participant::ScriptedParticipant;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No writable log file: stderr keeps stdout clean for the summary.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: logs/ next to the config file (~/.fairwalk/logs/fairwalk.log)
    if let Some(config_path) = FairwalkConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("fairwalk.log"));
    }

    // Fallback: ./.fairwalk/logs/fairwalk.log
    candidates.push(PathBuf::from(".fairwalk").join("logs").join("fairwalk.log"));

    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    Completed,
    Interrupted,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = FairwalkConfig::load()
        .context("failed to load configuration")?
        .unwrap_or_default();
    let settings = config
        .study_settings()
        .context("invalid study settings in configuration")?;
    let catalog = config
        .catalog()
        .context("invalid scenario list in configuration")?;
    let runner = config
        .runner_settings()
        .context("invalid runner settings in configuration")?;

    let mut study = Study::new(catalog, settings, Box::new(SystemClock));
    tracing::info!(
        participant = %study.session().participant_id(),
        scenarios = study.session().catalog().len(),
        "Starting study"
    );

    match run_study(&mut study, &runner).await? {
        RunOutcome::Interrupted => {
            eprintln!(
                "Interrupted after {} of {} scenario(s); nothing exported.",
                study.session().choices().len(),
                study.session().catalog().len()
            );
        }
        RunOutcome::Completed => {
            let export = study.export();
            let path = fairwalk_utils::write_export(
                &runner.export_dir,
                &export.participant_id,
                &export,
            )
            .context("failed to write export")?;

            if let Some(name) = export.participant_name() {
                println!("Participant: {name} ({})", export.participant_id);
            }
            for line in export.summary_lines() {
                println!("{line}");
            }
            println!("Export: {}", path.display());
        }
    }

    Ok(())
}

async fn run_study(study: &mut Study, runner: &RunnerSettings) -> Result<RunOutcome> {
    let script = &runner.participant;
    study.register(json!({ "name": script.name }))?;
    study.select_avatar(AvatarId::new(script.avatar.clone()))?;
    study.begin()?;
    log_events(study);

    let mut participant = ScriptedParticipant::new(script.clone());
    let dt = runner.tick();
    let mut frames = tokio::time::interval(runner.frame);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frames.tick() => {}
            signal = &mut ctrl_c => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::warn!("Interrupted by Ctrl-C");
                return Ok(RunOutcome::Interrupted);
            }
        }

        study.tick(dt);

        if let Some(choice) = participant.next_click(&study.view(), study.elapsed()) {
            let outcome = study.select_option_at_anchor(&choice);
            if !matches!(outcome, SelectionOutcome::Accepted { .. }) {
                tracing::warn!(choice = %choice, ?outcome, "Scripted click was not accepted");
            }
        }

        log_events(study);

        if study.stage() == Stage::Complete {
            return Ok(RunOutcome::Completed);
        }
    }
}

fn log_events(study: &mut Study) {
    for event in study.drain_events() {
        match event {
            StudyEvent::ChoiceAccepted { .. }
            | StudyEvent::ScenarioPresented { .. }
            | StudyEvent::Completed { .. } => tracing::info!(event = event.label(), "{event}"),
            _ => tracing::debug!(event = event.label(), "{event}"),
        }
    }
}

//! Resolution of raw config sections into validated settings.
//!
//! Resolution is total over missing fields (defaults fill the gaps) and fails only on
//! values that are present but invalid.

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

use fairwalk_types::{
    CatalogError, GroundPoint, NavigationSettings, ScenarioCatalog, SettingsError, StudySettings,
    TargetSettings, TimingSettings,
};

use crate::{EXPORT_DIR_ENV, FairwalkConfig, expand_env_vars};

const DEFAULT_FRAME: Duration = Duration::from_millis(16);
const DEFAULT_THINK: Duration = Duration::from_millis(1500);
const DEFAULT_NAME: &str = "Participant";
const DEFAULT_AVATAR: &str = "default";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid [[scenarios]]: {0}")]
    Catalog(#[from] CatalogError),
    #[error("`app.frame_ms` must be greater than zero")]
    ZeroFrame,
    #[error("`app.time_scale` must give a non-zero, representable tick (got {0})")]
    TimeScale(f64),
}

/// Who the headless runner pretends to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantScript {
    pub name: String,
    pub avatar: String,
    pub choices: Vec<String>,
    pub think: Duration,
}

impl ParticipantScript {
    /// Scripted option id for the scenario at `index`, if one was configured.
    #[must_use]
    pub fn choice_for(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }
}

impl Default for ParticipantScript {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            choices: Vec::new(),
            think: DEFAULT_THINK,
        }
    }
}

/// Everything the binary needs besides the study itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerSettings {
    pub frame: Duration,
    pub time_scale: f64,
    pub participant: ParticipantScript,
    pub export_dir: PathBuf,
    tick: Duration,
}

impl RunnerSettings {
    /// Simulated time per frame. Never zero.
    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }
}

/// `frame x time_scale`, rejected when it overflows `Duration` or rounds to zero.
fn scaled_tick(frame: Duration, time_scale: f64) -> Result<Duration, ResolveError> {
    if !(time_scale.is_finite() && time_scale > 0.0) {
        return Err(ResolveError::TimeScale(time_scale));
    }
    match Duration::try_from_secs_f64(frame.as_secs_f64() * time_scale) {
        Ok(tick) if !tick.is_zero() => Ok(tick),
        _ => Err(ResolveError::TimeScale(time_scale)),
    }
}

impl FairwalkConfig {
    pub fn study_settings(&self) -> Result<StudySettings, ResolveError> {
        let navigation = match &self.navigation {
            None => NavigationSettings::default(),
            Some(nav) => NavigationSettings::new(
                nav.speed.unwrap_or(NavigationSettings::DEFAULT_SPEED),
                nav.arrival_threshold
                    .unwrap_or(NavigationSettings::DEFAULT_ARRIVAL_THRESHOLD),
                nav.home.map_or(NavigationSettings::DEFAULT_HOME, |[x, z]| {
                    GroundPoint::new(x, z)
                }),
                nav.height.unwrap_or(0.0),
            )?,
        };

        let timing = self.timing.as_ref().map_or_else(TimingSettings::default, |t| {
            TimingSettings {
                dwell: t
                    .dwell_ms
                    .map_or(TimingSettings::DEFAULT_DWELL, Duration::from_millis),
                settle: t
                    .settle_ms
                    .map_or(TimingSettings::DEFAULT_SETTLE, Duration::from_millis),
            }
        });

        let targets = match &self.targets {
            None => TargetSettings::default(),
            Some(raw) => {
                let d = TargetSettings::default();
                TargetSettings::new(
                    raw.standoff.unwrap_or(d.standoff()),
                    raw.path_entrance_z.unwrap_or(d.path_entrance_z()),
                    raw.queue_origin_z.unwrap_or(d.queue_origin_z()),
                    raw.queue_spacing.unwrap_or(d.queue_spacing()),
                    raw.queue_padding.unwrap_or(d.queue_padding()),
                    raw.queue_margin.unwrap_or(d.queue_margin()),
                )?
            }
        };

        Ok(StudySettings {
            navigation,
            timing,
            targets,
        })
    }

    /// The configured scenarios, or the built-in study when none are given.
    pub fn catalog(&self) -> Result<ScenarioCatalog, ResolveError> {
        match &self.scenarios {
            None => Ok(ScenarioCatalog::default_study()),
            Some(scenarios) => Ok(ScenarioCatalog::new(scenarios.clone())?),
        }
    }

    pub fn runner_settings(&self) -> Result<RunnerSettings, ResolveError> {
        let app = self.app.as_ref();
        let frame = match app.and_then(|a| a.frame_ms) {
            Some(0) => return Err(ResolveError::ZeroFrame),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_FRAME,
        };
        let time_scale = app.and_then(|a| a.time_scale).unwrap_or(1.0);
        let tick = scaled_tick(frame, time_scale)?;

        let participant = self.participant.as_ref().map_or_else(ParticipantScript::default, |p| {
            ParticipantScript {
                name: p.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string()),
                avatar: p.avatar.clone().unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
                choices: p.choices.clone(),
                think: p.think_ms.map_or(DEFAULT_THINK, Duration::from_millis),
            }
        });

        let configured = self.export.as_ref().and_then(|e| e.dir.as_deref());
        let export_dir = resolve_export_dir(env::var(EXPORT_DIR_ENV).ok(), configured);

        Ok(RunnerSettings {
            frame,
            time_scale,
            participant,
            export_dir,
            tick,
        })
    }
}

/// `$FAIRWALK_EXPORT_DIR`, then `[export].dir`, then `~/.fairwalk/exports`, then
/// `./.fairwalk/exports`.
fn resolve_export_dir(from_env: Option<String>, configured: Option<&str>) -> PathBuf {
    if let Some(dir) = from_env.filter(|dir| !dir.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = configured {
        return PathBuf::from(expand_env_vars(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".fairwalk").join("exports"))
        .unwrap_or_else(|| PathBuf::from(".fairwalk").join("exports"))
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use fairwalk_types::{GroundPoint, SettingsError, StudySettings};

    use super::{ResolveError, resolve_export_dir};
    use crate::FairwalkConfig;

    fn parse(toml_str: &str) -> FairwalkConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let config = FairwalkConfig::default();
        assert_eq!(config.study_settings().unwrap(), StudySettings::default());
        assert_eq!(config.catalog().unwrap().len(), 8);

        let runner = config.runner_settings().unwrap();
        assert_eq!(runner.frame, Duration::from_millis(16));
        assert_eq!(runner.tick(), Duration::from_millis(16));
        assert_eq!(runner.participant.name, "Participant");
        assert!(runner.participant.choice_for(0).is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
[navigation]
speed = 6.0

[targets]
standoff = 2.0

[timing]
dwell_ms = 500
"#,
        );
        let settings = config.study_settings().unwrap();
        assert_eq!(settings.navigation.speed(), 6.0);
        assert_eq!(settings.navigation.home(), GroundPoint::new(0.0, 8.0));
        assert_eq!(settings.targets.standoff(), 2.0);
        assert_eq!(settings.targets.path_entrance_z(), 3.5);
        assert_eq!(settings.timing.dwell, Duration::from_millis(500));
        assert_eq!(settings.timing.settle, Duration::from_millis(100));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let config = parse("[navigation]\nspeed = -1.0\n");
        assert_eq!(
            config.study_settings(),
            Err(ResolveError::Settings(SettingsError::Speed(-1.0)))
        );

        let config = parse("[targets]\nqueue_spacing = -0.5\n");
        assert!(config.study_settings().is_err());

        let config = parse("[app]\nframe_ms = 0\n");
        assert_eq!(config.runner_settings(), Err(ResolveError::ZeroFrame));

        let config = parse("[app]\ntime_scale = 0.0\n");
        assert!(matches!(
            config.runner_settings(),
            Err(ResolveError::TimeScale(_))
        ));
    }

    #[test]
    fn time_scale_multiplies_tick() {
        let config = parse("[app]\nframe_ms = 20\ntime_scale = 10.0\n");
        let runner = config.runner_settings().unwrap();
        assert_eq!(runner.tick(), Duration::from_millis(200));
    }

    #[test]
    fn time_scale_must_yield_a_usable_tick() {
        for scale in ["1e30", "1e-12", "inf", "nan", "-2.0"] {
            let config = parse(&format!("[app]\ntime_scale = {scale}\n"));
            assert!(
                matches!(config.runner_settings(), Err(ResolveError::TimeScale(_))),
                "time_scale = {scale} should be rejected"
            );
        }

        let config = parse("[app]\nframe_ms = 16\ntime_scale = 1e6\n");
        let runner = config.runner_settings().unwrap();
        let expected = Duration::from_secs(16_000);
        assert!(runner.tick().abs_diff(expected) < Duration::from_micros(1));
    }

    #[test]
    fn scripted_choices_are_indexed_by_scenario() {
        let config = parse(
            r#"
[participant]
choices = ["red", "wide"]
think_ms = 250
"#,
        );
        let runner = config.runner_settings().unwrap();
        assert_eq!(runner.participant.choice_for(1), Some("wide"));
        assert_eq!(runner.participant.think, Duration::from_millis(250));
        assert_eq!(runner.participant.avatar, "default");
    }

    #[test]
    fn duplicate_scenario_ids_fail_resolution() {
        let config = parse(
            r#"
[[scenarios]]
id = 1
question = "a"
type = "crowd-influence"
crowd_sizes = [1, 2]

[[scenarios]]
id = 1
question = "b"
type = "crowd-influence"
crowd_sizes = [3, 4]
"#,
        );
        assert!(matches!(config.catalog(), Err(ResolveError::Catalog(_))));
    }

    #[test]
    fn export_dir_precedence() {
        assert_eq!(
            resolve_export_dir(Some("/from/env".into()), Some("/from/config")),
            PathBuf::from("/from/env")
        );
        assert_eq!(
            resolve_export_dir(Some("  ".into()), Some("/from/config")),
            PathBuf::from("/from/config")
        );
        assert!(resolve_export_dir(None, None).ends_with(".fairwalk/exports"));
    }
}

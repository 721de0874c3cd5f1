//! Resolved study settings shared across crates.
//!
//! These types represent fully validated tuning. Raw TOML structs (with `Option`
//! fields) stay private in `fairwalk-config`, which resolves them into these types at
//! the parse boundary. Holding a value is the proof of its validity.

use std::time::Duration;

use crate::geometry::GroundPoint;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("navigation speed must be a positive finite number (got {0})")]
    Speed(f64),
    #[error("arrival threshold must be a positive finite number (got {0})")]
    ArrivalThreshold(f64),
    #[error("`{field}` must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

fn finite(field: &'static str, value: f64) -> Result<f64, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, SettingsError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        Err(SettingsError::Negative { field, value })
    } else {
        Ok(value)
    }
}

/// Avatar movement tuning.
///
/// Invariant: `speed` and `arrival_threshold` are positive and finite; `home` and
/// `height` are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    speed: f64,
    arrival_threshold: f64,
    home: GroundPoint,
    height: f64,
}

impl NavigationSettings {
    /// Distance units per second (0.05 per frame at 60 Hz).
    pub const DEFAULT_SPEED: f64 = 3.0;
    pub const DEFAULT_ARRIVAL_THRESHOLD: f64 = 0.15;
    pub const DEFAULT_HOME: GroundPoint = GroundPoint::new(0.0, 8.0);

    pub fn new(
        speed: f64,
        arrival_threshold: f64,
        home: GroundPoint,
        height: f64,
    ) -> Result<Self, SettingsError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SettingsError::Speed(speed));
        }
        if !(arrival_threshold.is_finite() && arrival_threshold > 0.0) {
            return Err(SettingsError::ArrivalThreshold(arrival_threshold));
        }
        finite("home.x", home.x)?;
        finite("home.z", home.z)?;
        finite("height", height)?;
        Ok(Self {
            speed,
            arrival_threshold,
            home,
            height,
        })
    }

    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub const fn arrival_threshold(&self) -> f64 {
        self.arrival_threshold
    }

    #[must_use]
    pub const fn home(&self) -> GroundPoint {
        self.home
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            arrival_threshold: Self::DEFAULT_ARRIVAL_THRESHOLD,
            home: Self::DEFAULT_HOME,
            height: 0.0,
        }
    }
}

/// Scheduled delays between navigation legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSettings {
    /// Time spent waiting at the chosen option before walking back.
    pub dwell: Duration,
    /// Delay between returning home and advancing the scenario.
    pub settle: Duration,
}

impl TimingSettings {
    pub const DEFAULT_DWELL: Duration = Duration::from_millis(3000);
    pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            dwell: Self::DEFAULT_DWELL,
            settle: Self::DEFAULT_SETTLE,
        }
    }
}

/// Per-type geometry used to turn a chosen option into a walking destination.
///
/// Invariant: every field is finite; queue spacing, padding and margin are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSettings {
    standoff: f64,
    path_entrance_z: f64,
    queue_origin_z: f64,
    queue_spacing: f64,
    queue_padding: f64,
    queue_margin: f64,
}

impl TargetSettings {
    pub fn new(
        standoff: f64,
        path_entrance_z: f64,
        queue_origin_z: f64,
        queue_spacing: f64,
        queue_padding: f64,
        queue_margin: f64,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            standoff: finite("standoff", standoff)?,
            path_entrance_z: finite("path_entrance_z", path_entrance_z)?,
            queue_origin_z: finite("queue_origin_z", queue_origin_z)?,
            queue_spacing: non_negative("queue_spacing", queue_spacing)?,
            queue_padding: non_negative("queue_padding", queue_padding)?,
            queue_margin: non_negative("queue_margin", queue_margin)?,
        })
    }

    /// Distance kept in front of a stand.
    #[must_use]
    pub const fn standoff(&self) -> f64 {
        self.standoff
    }

    /// Fixed stopping depth at the mouth of a street or winter path.
    #[must_use]
    pub const fn path_entrance_z(&self) -> f64 {
        self.path_entrance_z
    }

    /// Depth of the first person in an attraction queue.
    #[must_use]
    pub const fn queue_origin_z(&self) -> f64 {
        self.queue_origin_z
    }

    /// Depth taken by each pair of queued people.
    #[must_use]
    pub const fn queue_spacing(&self) -> f64 {
        self.queue_spacing
    }

    #[must_use]
    pub const fn queue_padding(&self) -> f64 {
        self.queue_padding
    }

    /// Gap left behind the last person in the queue.
    #[must_use]
    pub const fn queue_margin(&self) -> f64 {
        self.queue_margin
    }
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            standoff: 1.5,
            path_entrance_z: 3.5,
            queue_origin_z: 2.0,
            queue_spacing: 0.7,
            queue_padding: 1.0,
            queue_margin: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StudySettings {
    pub navigation: NavigationSettings,
    pub timing: TimingSettings,
    pub targets: TargetSettings,
}

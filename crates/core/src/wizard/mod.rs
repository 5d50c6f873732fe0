//! Four-stage calculator wizard with per-device progress.

pub mod store;

use crate::domain::units::Fraction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use store::{JsonFileStore, MemoryStore, ProgressStore};

pub const PROGRESS_KEY: &str = "ratecard.progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Foundation,
    Reality,
    Refinements,
    Solution,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Foundation,
        Stage::Reality,
        Stage::Refinements,
        Stage::Solution,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Foundation => "foundation",
            Stage::Reality => "reality",
            Stage::Refinements => "refinements",
            Stage::Solution => "solution",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Foundation => Some(Stage::Reality),
            Stage::Reality => Some(Stage::Refinements),
            Stage::Refinements => Some(Stage::Solution),
            Stage::Solution => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Stage::ALL
            .into_iter()
            .find(|st| st.as_str() == needle)
            .ok_or_else(|| WizardError::UnknownStage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    Locked,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    Locked(Stage),
    UnknownStage(String),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::Locked(stage) => {
                write!(f, "stage {stage} is locked until earlier stages are completed")
            }
            WizardError::UnknownStage(s) => write!(f, "unknown stage {s:?}"),
        }
    }
}

impl std::error::Error for WizardError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current: Stage,
    pub completed: BTreeSet<Stage>,
    pub updated_at: DateTime<Utc>,
}

impl WizardState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current: Stage::Foundation,
            completed: BTreeSet::new(),
            updated_at: now,
        }
    }

    pub fn status(&self, stage: Stage) -> StageStatus {
        if stage == self.current {
            StageStatus::Active
        } else if self.completed.contains(&stage) {
            StageStatus::Completed
        } else {
            StageStatus::Locked
        }
    }

    /// A stage is reachable once every stage before it is completed.
    pub fn is_reachable(&self, stage: Stage) -> bool {
        Stage::ALL
            .into_iter()
            .take_while(|s| *s < stage)
            .all(|s| self.completed.contains(&s))
    }

    pub fn complete_current(&mut self, now: DateTime<Utc>) -> Stage {
        self.completed.insert(self.current);
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        self.updated_at = now;
        self.current
    }

    pub fn go_to(&mut self, stage: Stage, now: DateTime<Utc>) -> Result<(), WizardError> {
        if !self.is_reachable(stage) {
            return Err(WizardError::Locked(stage));
        }
        self.current = stage;
        self.updated_at = now;
        Ok(())
    }

    pub fn progress(&self) -> Fraction {
        Fraction::new(self.completed.len() as f64 / Stage::ALL.len() as f64)
    }

    pub fn statuses(&self) -> [(Stage, StageStatus); 4] {
        Stage::ALL.map(|s| (s, self.status(s)))
    }
}

/// Wizard state bound to a store; every transition is persisted before returning.
pub struct Wizard<S: ProgressStore> {
    store: S,
    state: WizardState,
}

impl<S: ProgressStore> Wizard<S> {
    pub fn open(store: S) -> anyhow::Result<Self> {
        let now = Utc::now();
        let state = match store.get(PROGRESS_KEY)? {
            None => WizardState::new(now),
            Some(raw) => match serde_json::from_str::<WizardState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "stored wizard progress is unreadable; starting over");
                    WizardState::new(now)
                }
            },
        };
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn complete_current(&mut self) -> anyhow::Result<Stage> {
        let finished = self.state.current;
        let mut next = self.state.clone();
        let current = next.complete_current(Utc::now());
        self.save(&next)?;
        self.state = next;
        tracing::info!(%finished, %current, "stage completed");
        Ok(current)
    }

    pub fn go_to(&mut self, stage: Stage) -> anyhow::Result<()> {
        let mut next = self.state.clone();
        next.go_to(stage, Utc::now())?;
        self.save(&next)?;
        self.state = next;
        tracing::info!(%stage, "moved to stage");
        Ok(())
    }

    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.store.remove(PROGRESS_KEY)?;
        self.state = WizardState::new(Utc::now());
        tracing::info!("wizard progress reset");
        Ok(())
    }

    /// In-memory state only changes after the store accepts the write.
    fn save(&self, state: &WizardState) -> anyhow::Result<()> {
        let raw = serde_json::to_string(state)?;
        self.store.set(PROGRESS_KEY, &raw)
    }
}

//! Filter state owned by the graph filter engine

use casegraph_domain::{PersonId, PersonType};
use serde::{Deserialize, Serialize};

/// Default breadth-first radius around a focused person
pub const DEFAULT_DEGREE_LIMIT: usize = 2;

/// Current filter and selection state
///
/// Only [`crate::GraphFilterEngine`] mutates this; everyone else reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Show victims
    pub show_victim: bool,

    /// Show accused people
    pub show_accused: bool,

    /// Show everyone else
    pub show_other: bool,

    /// Minimum risk for non-victims to be shown [0.0, 1.0]
    pub risk_min: f64,

    /// Hop radius around the focused person
    pub degree_limit: usize,

    /// Person the view is centered on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<PersonId>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            show_victim: true,
            show_accused: true,
            show_other: true,
            risk_min: 0.0,
            degree_limit: DEFAULT_DEGREE_LIMIT,
            focused: None,
        }
    }
}

impl FilterState {
    /// Whether a person type passes the type flags
    pub fn type_allowed(&self, person_type: PersonType) -> bool {
        match person_type {
            PersonType::Victim => self.show_victim,
            PersonType::Accused => self.show_accused,
            PersonType::Other => self.show_other,
        }
    }

    /// Type and risk filters combined; victims skip the risk threshold
    pub fn admits(&self, person_type: PersonType, risk: f64) -> bool {
        self.type_allowed(person_type) && (person_type.is_victim() || risk >= self.risk_min)
    }

    /// Apply a partial update
    pub(crate) fn apply(&mut self, update: &FilterUpdate) {
        if let Some(show) = update.show_victim {
            self.show_victim = show;
        }
        if let Some(show) = update.show_accused {
            self.show_accused = show;
        }
        if let Some(show) = update.show_other {
            self.show_other = show;
        }
        if let Some(risk_min) = update.risk_min {
            self.risk_min = clamp_threshold(risk_min);
        }
    }

    /// Re-enable every type flag and drop the focus
    pub(crate) fn reset(&mut self) {
        self.show_victim = true;
        self.show_accused = true;
        self.show_other = true;
        self.focused = None;
    }
}

/// Partial update of the type flags and risk threshold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUpdate {
    /// New victim flag
    #[serde(default)]
    pub show_victim: Option<bool>,
    /// New accused flag
    #[serde(default)]
    pub show_accused: Option<bool>,
    /// New other flag
    #[serde(default)]
    pub show_other: Option<bool>,
    /// New risk threshold
    #[serde(default)]
    pub risk_min: Option<f64>,
}

impl FilterUpdate {
    /// Empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag for one person type
    pub fn show(mut self, person_type: PersonType, visible: bool) -> Self {
        match person_type {
            PersonType::Victim => self.show_victim = Some(visible),
            PersonType::Accused => self.show_accused = Some(visible),
            PersonType::Other => self.show_other = Some(visible),
        }
        self
    }

    /// Set the risk threshold
    pub fn risk_min(mut self, risk_min: f64) -> Self {
        self.risk_min = Some(risk_min);
        self
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.show_victim.is_none()
            && self.show_accused.is_none()
            && self.show_other.is_none()
            && self.risk_min.is_none()
    }
}

pub(crate) fn clamp_threshold(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

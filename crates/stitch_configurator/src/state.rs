//! Customer selections and the configuration wizard
//!
//! [`WalletConfig`] is plain data. It only changes through the input
//! handlers below, each of which is one discrete user action; the renderer
//! reads it once per frame.
//!
//! The wizard has four main steps (gender, base model, parts, stitching)
//! and a review step. A main step auto-advances to the next one only when
//! its completion flips to done while it is the open step, so revisiting a
//! finished step and changing it doesn't yank the customer forward again.

use crate::error::{ConfigError, Result};
use crate::event::InputEvent;
use crate::part::{EnabledParts, PartId};
use crate::view::View;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Only base model currently offered
pub const CLASSIC_BASE_MODEL: &str = "classic_v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }

    pub fn label_key(self) -> String {
        format!("steps.gender.{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            other => Err(ConfigError::UnknownGender(other.to_string())),
        }
    }
}

/// Thread colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stitching {
    White,
    Black,
    Brown,
    Red,
    Tan,
    Creme,
}

impl Stitching {
    pub const ALL: [Stitching; 6] = [
        Stitching::White,
        Stitching::Black,
        Stitching::Brown,
        Stitching::Red,
        Stitching::Tan,
        Stitching::Creme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stitching::White => "white",
            Stitching::Black => "black",
            Stitching::Brown => "brown",
            Stitching::Red => "red",
            Stitching::Tan => "tan",
            Stitching::Creme => "creme",
        }
    }

    /// Display swatch as a CSS hex colour
    pub fn swatch(self) -> &'static str {
        match self {
            Stitching::White => "#f5f5f5",
            Stitching::Black => "#1c1917",
            Stitching::Brown => "#8c5b3f",
            Stitching::Red => "#9e2a2b",
            Stitching::Tan => "#c19a6b",
            Stitching::Creme => "#efe4cf",
        }
    }

    pub fn label_key(self) -> String {
        format!("steps.stitch.{}", self.as_str())
    }
}

impl FromStr for Stitching {
    type Err = ConfigError;

    /// Accepts both `white` and the catalog key `stitch_white`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.strip_prefix("stitch_").unwrap_or(s);
        Stitching::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownStitching(s.to_string()))
    }
}

/// Wizard step, in display order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Gender,
    BaseModel,
    Parts,
    Stitching,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Gender,
        WizardStep::BaseModel,
        WizardStep::Parts,
        WizardStep::Stitching,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step; the review step is last
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Review-step snapshot of a configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub gender: Option<Gender>,
    pub base_model: Option<String>,
    pub parts: Vec<PartId>,
    pub part_count: usize,
    pub stitching: Option<Stitching>,
    pub view: View,
    pub step: WizardStep,
    pub complete: bool,
}

/// The customer's in-progress wallet
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletConfig {
    gender: Option<Gender>,
    base_model: Option<String>,
    enabled_parts: EnabledParts,
    stitching: Option<Stitching>,
    active_view: View,
    wizard_step: WizardStep,
}

type DoneFlags = [bool; 4];

impl WalletConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn base_model(&self) -> Option<&str> {
        self.base_model.as_deref()
    }

    pub fn enabled_parts(&self) -> &EnabledParts {
        &self.enabled_parts
    }

    pub fn stitching(&self) -> Option<Stitching> {
        self.stitching
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn wizard_step(&self) -> WizardStep {
        self.wizard_step
    }

    // ---- Views

    pub fn select_view(&mut self, view: View) {
        debug!(view = %view, "view selected");
        self.active_view = view;
    }

    /// Select a view by its selector string; unknown selectors pick front
    pub fn select_view_named(&mut self, selector: &str) {
        self.select_view(View::parse_or_front(selector));
    }

    // ---- Parts

    /// Tap on a part card; returns the new state of the part
    pub fn toggle_part(&mut self, part: PartId) -> bool {
        self.with_auto_advance(|config| {
            let enabled = config.enabled_parts.toggle(part);
            debug!(part = %part, enabled, "part toggled");
            enabled
        })
    }

    /// Enable a part; returns true if it was previously off
    pub fn enable_part(&mut self, part: PartId) -> bool {
        self.with_auto_advance(|config| {
            let was_enabled = config.enabled_parts.set(part, true);
            debug!(part = %part, "part enabled");
            !was_enabled
        })
    }

    /// Drop a dragged part card on the canvas
    ///
    /// The payload is the part id as plain text. Unknown payloads are
    /// rejected without touching the selection.
    pub fn drop_part(&mut self, payload: &str) -> Result<bool> {
        let part: PartId = payload.trim().parse()?;
        Ok(self.enable_part(part))
    }

    /// Explicit remove; returns true if the part was on
    pub fn remove_part(&mut self, part: PartId) -> bool {
        let was_enabled = self.enabled_parts.set(part, false);
        debug!(part = %part, "part removed");
        was_enabled
    }

    // ---- Other selections

    pub fn set_gender(&mut self, gender: Gender) {
        self.with_auto_advance(|config| config.gender = Some(gender));
    }

    pub fn set_base_model(&mut self, id: &str) -> Result<()> {
        if id != CLASSIC_BASE_MODEL {
            return Err(ConfigError::UnknownBaseModel(id.to_string()));
        }
        self.with_auto_advance(|config| config.base_model = Some(id.to_string()));
        Ok(())
    }

    pub fn set_stitching(&mut self, stitching: Stitching) {
        self.with_auto_advance(|config| config.stitching = Some(stitching));
    }

    // ---- Wizard

    /// Whether a main step's selection is made; the review step is never done
    pub fn step_done(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Gender => self.gender.is_some(),
            WizardStep::BaseModel => self.base_model.is_some(),
            WizardStep::Parts => self.enabled_parts.any_enabled(),
            WizardStep::Stitching => self.stitching.is_some(),
            WizardStep::Review => false,
        }
    }

    pub fn all_main_steps_done(&self) -> bool {
        self.done_flags().iter().all(|done| *done)
    }

    /// Whether a step's panel is expanded
    ///
    /// The stitching panel stays expanded until the review step opens.
    pub fn is_step_open(&self, step: WizardStep) -> bool {
        step == self.wizard_step
            || (step == WizardStep::Stitching && self.wizard_step != WizardStep::Review)
    }

    /// Open a step by hand
    ///
    /// Any earlier or completed step can be opened, as can the first step
    /// that still needs input. The review step requires all main steps.
    pub fn go_to_step(&mut self, step: WizardStep) -> Result<()> {
        if step == WizardStep::Review && !self.all_main_steps_done() {
            return Err(ConfigError::Incomplete);
        }
        if step > self.wizard_step && !self.step_done(step) {
            let frontier = WizardStep::ALL[..step.index()]
                .iter()
                .all(|earlier| self.step_done(*earlier));
            if !frontier {
                return Err(ConfigError::StepLocked(step));
            }
        }
        debug!(step = step.index(), "wizard step opened");
        self.wizard_step = step;
        Ok(())
    }

    /// "Review order": move to the review step
    pub fn confirm_selection(&mut self) -> Result<()> {
        self.go_to_step(WizardStep::Review)
    }

    /// "Edit" from the review step: reopen the parts step
    pub fn edit_selection(&mut self) {
        debug!("editing selection");
        self.wizard_step = WizardStep::Parts;
    }

    /// Return to the initial empty state
    pub fn reset_all(&mut self) {
        debug!("configuration reset");
        *self = Self::default();
    }

    pub fn summary(&self) -> ConfigSummary {
        let parts = self.enabled_parts.enabled_list().to_vec();
        ConfigSummary {
            gender: self.gender,
            base_model: self.base_model.clone(),
            part_count: parts.len(),
            parts,
            stitching: self.stitching,
            view: self.active_view,
            step: self.wizard_step,
            complete: self.all_main_steps_done(),
        }
    }

    /// Dispatch an input event to its handler
    pub fn apply(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::SelectView(view) => self.select_view(view),
            InputEvent::TogglePart(part) => {
                self.toggle_part(part);
            }
            InputEvent::DropPart(payload) => {
                self.drop_part(&payload)?;
            }
            InputEvent::RemovePart(part) => {
                self.remove_part(part);
            }
            InputEvent::SetGender(gender) => self.set_gender(gender),
            InputEvent::SetBaseModel(id) => self.set_base_model(&id)?,
            InputEvent::SetStitching(stitching) => self.set_stitching(stitching),
            InputEvent::GoToStep(step) => self.go_to_step(step)?,
            InputEvent::Confirm => self.confirm_selection()?,
            InputEvent::Edit => self.edit_selection(),
            InputEvent::Reset => self.reset_all(),
        }
        Ok(())
    }

    fn done_flags(&self) -> DoneFlags {
        [
            self.step_done(WizardStep::Gender),
            self.step_done(WizardStep::BaseModel),
            self.step_done(WizardStep::Parts),
            self.step_done(WizardStep::Stitching),
        ]
    }

    fn with_auto_advance<R>(&mut self, mutate: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.done_flags();
        let result = mutate(self);
        let after = self.done_flags();

        // The stitching step never auto-advances; review needs an explicit confirm
        for step in [WizardStep::Gender, WizardStep::BaseModel, WizardStep::Parts] {
            let i = step.index();
            if !before[i] && after[i] && self.wizard_step == step {
                if let Some(next) = step.next() {
                    debug!(from = i, to = next.index(), "wizard auto-advanced");
                    self.wizard_step = next;
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let config = WalletConfig::new();
        assert_eq!(config.gender(), None);
        assert_eq!(config.base_model(), None);
        assert_eq!(config.stitching(), None);
        assert_eq!(config.active_view(), View::Front);
        assert_eq!(config.wizard_step(), WizardStep::Gender);
        assert!(config.enabled_parts().enabled_list().is_empty());
    }

    #[test]
    fn test_auto_advance_through_main_steps() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Women);
        assert_eq!(config.wizard_step(), WizardStep::BaseModel);
        config.set_base_model(CLASSIC_BASE_MODEL).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Parts);
        config.toggle_part(PartId::CardHolder2);
        assert_eq!(config.wizard_step(), WizardStep::Stitching);
        config.set_stitching(Stitching::Brown);
        assert_eq!(config.wizard_step(), WizardStep::Stitching);
        assert!(config.all_main_steps_done());
    }

    #[test]
    fn test_no_auto_advance_when_revisiting_done_step() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Men);
        config.go_to_step(WizardStep::Gender).unwrap();

        // Already done, so changing it doesn't flip the flag
        config.set_gender(Gender::Women);
        assert_eq!(config.wizard_step(), WizardStep::Gender);
    }

    #[test]
    fn test_no_auto_advance_from_other_step() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Men);
        config.go_to_step(WizardStep::Gender).unwrap();

        // Parts done while gender is open: stays on gender
        config.enable_part(PartId::MoneyPocket);
        assert_eq!(config.wizard_step(), WizardStep::Gender);
    }

    #[test]
    fn test_back_to_earlier_step() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Men);
        config.set_base_model(CLASSIC_BASE_MODEL).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Parts);

        config.go_to_step(WizardStep::Gender).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Gender);
        config.go_to_step(WizardStep::Gender).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Gender);
    }

    #[test]
    fn test_forward_to_completed_step() {
        let mut config = WalletConfig::new();
        config.enable_part(PartId::CardHolder1);
        assert!(config.step_done(WizardStep::Parts));
        assert_eq!(config.wizard_step(), WizardStep::Gender);

        assert_eq!(config.go_to_step(WizardStep::Parts), Ok(()));
        assert_eq!(config.wizard_step(), WizardStep::Parts);

        // Earlier steps stay reachable even though they were skipped
        config.go_to_step(WizardStep::BaseModel).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::BaseModel);
    }

    #[test]
    fn test_forward_to_next_open_step() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Women);
        config.go_to_step(WizardStep::Gender).unwrap();

        // Base model isn't done but everything before it is
        config.go_to_step(WizardStep::BaseModel).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::BaseModel);
    }

    #[test]
    fn test_forward_to_unreached_step_is_locked() {
        let mut config = WalletConfig::new();
        assert_eq!(
            config.go_to_step(WizardStep::BaseModel),
            Err(ConfigError::StepLocked(WizardStep::BaseModel))
        );
        assert_eq!(
            config.go_to_step(WizardStep::Stitching),
            Err(ConfigError::StepLocked(WizardStep::Stitching))
        );
        assert_eq!(config.wizard_step(), WizardStep::Gender);

        config.set_stitching(Stitching::Black);
        config.go_to_step(WizardStep::Stitching).unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Stitching);
    }

    #[test]
    fn test_review_needs_all_main_steps() {
        let mut config = WalletConfig::new();
        assert_eq!(config.confirm_selection(), Err(ConfigError::Incomplete));

        config.set_gender(Gender::Men);
        config.set_base_model(CLASSIC_BASE_MODEL).unwrap();
        config.enable_part(PartId::CardHolder1);
        assert_eq!(
            config.go_to_step(WizardStep::Review),
            Err(ConfigError::Incomplete)
        );
        assert_eq!(config.wizard_step(), WizardStep::Stitching);
    }

    #[test]
    fn test_confirm_and_edit() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Men);
        config.set_base_model(CLASSIC_BASE_MODEL).unwrap();
        config.enable_part(PartId::CardHolder1);
        config.set_stitching(Stitching::White);

        config.confirm_selection().unwrap();
        assert_eq!(config.wizard_step(), WizardStep::Review);
        assert!(!config.is_step_open(WizardStep::Stitching));

        config.edit_selection();
        assert_eq!(config.wizard_step(), WizardStep::Parts);
        assert!(config.is_step_open(WizardStep::Parts));
        assert!(config.is_step_open(WizardStep::Stitching));
        assert!(!config.is_step_open(WizardStep::Gender));
    }

    #[test]
    fn test_unknown_base_model() {
        let mut config = WalletConfig::new();
        assert_eq!(
            config.set_base_model("classic_v2"),
            Err(ConfigError::UnknownBaseModel("classic_v2".to_string()))
        );
        assert_eq!(config.base_model(), None);
    }

    #[test]
    fn test_drop_part_payloads() {
        let mut config = WalletConfig::new();
        assert_eq!(config.drop_part("CARD_HOLDER_4"), Ok(true));
        assert_eq!(config.drop_part("CARD_HOLDER_4"), Ok(false));
        assert!(config.drop_part("BACK_PANEL").is_err());
        assert!(config.drop_part("").is_err());
        assert_eq!(config.enabled_parts().enabled_count(), 1);
    }

    #[test]
    fn test_remove_part() {
        let mut config = WalletConfig::new();
        config.enable_part(PartId::MoneyPocket);
        assert!(config.remove_part(PartId::MoneyPocket));
        assert!(!config.remove_part(PartId::MoneyPocket));
        assert!(!config.enabled_parts().is_enabled(PartId::MoneyPocket));
    }

    #[test]
    fn test_stitching_keys() {
        assert_eq!("stitch_red".parse::<Stitching>(), Ok(Stitching::Red));
        assert_eq!("creme".parse::<Stitching>(), Ok(Stitching::Creme));
        assert!("green".parse::<Stitching>().is_err());
        assert_eq!(Stitching::White.swatch(), "#f5f5f5");
        assert_eq!(Stitching::White.label_key(), "steps.stitch.white");
        assert_eq!(Gender::Men.label_key(), "steps.gender.men");
    }

    #[test]
    fn test_summary() {
        let mut config = WalletConfig::new();
        config.set_gender(Gender::Women);
        config.enable_part(PartId::MoneyPocket);
        config.enable_part(PartId::CardHolder1);
        config.select_view(View::Spin);

        let summary = config.summary();
        assert_eq!(summary.parts, vec![PartId::CardHolder1, PartId::MoneyPocket]);
        assert_eq!(summary.part_count, 2);
        assert!(!summary.complete);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["gender"], "women");
        assert_eq!(json["view"], "360");
        assert_eq!(json["parts"][0], "CARD_HOLDER_1");
    }
}

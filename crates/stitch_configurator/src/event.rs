//! Discrete user input events
//!
//! Events have a one-line text form used by scripted sessions and the CLI:
//!
//! | text                 | event                         |
//! |----------------------|-------------------------------|
//! | `view back`          | [`InputEvent::SelectView`]    |
//! | `toggle MONEY_POCKET`| [`InputEvent::TogglePart`]    |
//! | `drop CARD_HOLDER_2` | [`InputEvent::DropPart`]      |
//! | `remove CARD_HOLDER_2`| [`InputEvent::RemovePart`]   |
//! | `gender women`       | [`InputEvent::SetGender`]     |
//! | `base classic_v1`    | [`InputEvent::SetBaseModel`]  |
//! | `stitch brown`       | [`InputEvent::SetStitching`]  |
//! | `step 2`             | [`InputEvent::GoToStep`]      |
//! | `confirm`, `edit`, `reset` | the matching action     |

use crate::error::ConfigError;
use crate::part::PartId;
use crate::state::{Gender, Stitching, WizardStep};
use crate::view::View;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    SelectView(View),
    TogglePart(PartId),
    /// Raw drag-and-drop payload, validated when applied
    DropPart(String),
    RemovePart(PartId),
    SetGender(Gender),
    SetBaseModel(String),
    SetStitching(Stitching),
    GoToStep(WizardStep),
    Confirm,
    Edit,
    Reset,
}

impl FromStr for InputEvent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (line, None),
        };
        let invalid = || ConfigError::InvalidEvent(line.to_string());

        let event = match (verb, arg) {
            // Unknown selectors still fall back to front
            ("view", Some(selector)) => InputEvent::SelectView(View::parse_or_front(selector)),
            ("toggle", Some(part)) => InputEvent::TogglePart(part.parse()?),
            ("drop", Some(payload)) => InputEvent::DropPart(payload.to_string()),
            ("remove", Some(part)) => InputEvent::RemovePart(part.parse()?),
            ("gender", Some(gender)) => InputEvent::SetGender(gender.parse()?),
            ("base", Some(id)) => InputEvent::SetBaseModel(id.to_string()),
            ("stitch", Some(colour)) => InputEvent::SetStitching(colour.parse()?),
            ("step", Some(index)) => {
                let step = index
                    .parse::<usize>()
                    .ok()
                    .and_then(WizardStep::from_index)
                    .ok_or_else(invalid)?;
                InputEvent::GoToStep(step)
            }
            ("confirm", None) => InputEvent::Confirm,
            ("edit", None) => InputEvent::Edit,
            ("reset", None) => InputEvent::Reset,
            _ => return Err(invalid()),
        };
        Ok(event)
    }
}

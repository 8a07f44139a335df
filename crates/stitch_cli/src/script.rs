//! Scripted input for `stitch simulate`
//!
//! A script is a `;`-separated list of input events and `wait N` pauses,
//! e.g. `drop CARD_HOLDER_1; wait 30; view 360; wait 120`.

use anyhow::{Context, Result};
use stitch_configurator::InputEvent;

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptStep {
    /// Apply an event before the next frame
    Event(InputEvent),
    /// Render this many frames
    Wait(u32),
}

pub fn parse(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(';')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(frames) = line.strip_prefix("wait ") {
                let frames = frames
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid frame count in '{line}'"))?;
                Ok(ScriptStep::Wait(frames))
            } else {
                let event = line
                    .parse()
                    .with_context(|| format!("invalid script step '{line}'"))?;
                Ok(ScriptStep::Event(event))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_configurator::{PartId, View};

    #[test]
    fn test_parse_script() {
        let steps = parse("drop CARD_HOLDER_1; wait 30;; view 360 ;wait 5").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Event(InputEvent::DropPart("CARD_HOLDER_1".to_string())),
                ScriptStep::Wait(30),
                ScriptStep::Event(InputEvent::SelectView(View::Spin)),
                ScriptStep::Wait(5),
            ]
        );
        assert_eq!(
            parse("toggle MONEY_POCKET").unwrap(),
            vec![ScriptStep::Event(InputEvent::TogglePart(PartId::MoneyPocket))]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("wait soon").is_err());
        assert!(parse("fly away").is_err());
        assert!(parse("").unwrap().is_empty());
    }
}

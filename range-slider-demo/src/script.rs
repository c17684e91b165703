//! Pointer scripts: whitespace separated steps such as `down:16 move:120 up:120`.
//!
//! `action@pointer:x` addresses a pointer other than `0`; `cancel` aborts the
//! gesture.

use std::{collections::BTreeMap, fmt};

use anyhow::{Context, Result, bail};
use range_slider_core::{PointerEvent, RangeSlider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub action: Action,
    pub pointer: u64,
    pub x: f32,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.action {
            Action::Down => "down",
            Action::Move => "move",
            Action::Up => "up",
            Action::Cancel => return f.write_str("cancel"),
        };
        if self.pointer == 0 {
            write!(f, "{name}:{}", self.x)
        } else {
            write!(f, "{name}@{}:{}", self.pointer, self.x)
        }
    }
}

pub fn parse(script: &str) -> Result<Vec<Step>> {
    script.split_whitespace().map(parse_step).collect()
}

fn parse_step(token: &str) -> Result<Step> {
    if token == "cancel" {
        return Ok(Step {
            action: Action::Cancel,
            pointer: 0,
            x: 0.0,
        });
    }

    let (head, x) = token
        .split_once(':')
        .with_context(|| format!("step `{token}` is missing its `:x` coordinate"))?;
    let (name, pointer) = match head.split_once('@') {
        Some((name, pointer)) => (
            name,
            pointer
                .parse::<u64>()
                .with_context(|| format!("invalid pointer id in `{token}`"))?,
        ),
        None => (head, 0),
    };
    let action = match name {
        "down" => Action::Down,
        "move" => Action::Move,
        "up" => Action::Up,
        other => bail!("unknown action `{other}` in `{token}`"),
    };
    let x = x
        .parse::<f32>()
        .with_context(|| format!("invalid coordinate in `{token}`"))?;
    if !x.is_finite() {
        bail!("coordinate in `{token}` must be finite");
    }
    Ok(Step { action, pointer, x })
}

/// Turns script steps into controller calls, tracking which pointers are down.
#[derive(Debug, Default)]
pub struct Player {
    down: BTreeMap<u64, f32>,
}

impl Player {
    /// Applies one step. Returns whether the slider claimed it.
    pub fn apply(&mut self, slider: &mut RangeSlider, step: Step) -> bool {
        let event = PointerEvent::new(step.pointer, step.x);
        match step.action {
            Action::Down => {
                let first = self.down.is_empty();
                self.down.insert(step.pointer, step.x);
                if first {
                    slider.on_pointer_down(event)
                } else {
                    slider.on_secondary_pointer_down(event)
                }
            }
            Action::Move => {
                if let Some(x) = self.down.get_mut(&step.pointer) {
                    *x = step.x;
                }
                slider.on_pointer_move(event)
            }
            Action::Up => {
                self.down.remove(&step.pointer);
                match self.down.iter().next() {
                    Some((&pointer, &x)) => {
                        slider.on_secondary_pointer_up(event, PointerEvent::new(pointer, x))
                    }
                    None => slider.on_pointer_up(event),
                }
            }
            Action::Cancel => {
                self.down.clear();
                slider.on_pointer_cancel()
            }
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive side services injected into the application root.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::debug;

/// A question asked before a destructive operation.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub title: String,
    pub description: String,
}

impl Confirmation {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Confirm {
    fn confirm(&self, request: &Confirmation) -> bool;
}

/// Asks on stderr and reads a y/N answer from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, request: &Confirmation) -> bool {
        let mut stderr = io::stderr();
        let _ = write!(
            stderr,
            "{}\n{}\nProceed? [y/N] ",
            request.title, request.description
        );
        let _ = stderr.flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Answers every question with a fixed value (`--yes`, tests).
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, request: &Confirmation) -> bool {
        debug!(title = %request.title, answer = self.0, "confirmation answered without prompt");
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Login,
}

/// Short audible cue. No-op when there is nothing to play it on.
pub trait Chime {
    fn play(&self, sound: Sound, volume: f32);
}

pub struct NoopChime;

impl Chime for NoopChime {
    fn play(&self, _sound: Sound, _volume: f32) {}
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self, sound: Sound, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        debug!(?sound, volume, "ringing terminal bell");
        let mut stderr = io::stderr();
        let _ = stderr.write_all(b"\x07");
        let _ = stderr.flush();
    }
}

/// Picks the bell when stderr is a terminal and the silent chime otherwise.
pub fn detect_chime() -> Box<dyn Chime> {
    if io::stderr().is_terminal() {
        Box::new(TerminalBell)
    } else {
        Box::new(NoopChime)
    }
}

//! Keyboard commands understood by the animation.

/// An action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// `r`: pause/resume, or leave single-step mode and resume.
    ToggleRun,
    /// `s`: advance exactly one frame, then pause.
    SingleStep,
    /// `+`: tilt the view further.
    TiltUp,
    /// `-`: tilt the view back.
    TiltDown,
    /// Up arrow: double the time step.
    SpeedUp,
    /// Down arrow: halve the time step.
    SlowDown,
    /// Escape.
    Quit,
}

/// What the caller should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

impl KeyCommand {
    /// Map a typed character to its command.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' | 'R' => Some(Self::ToggleRun),
            's' | 'S' => Some(Self::SingleStep),
            '+' => Some(Self::TiltUp),
            '-' => Some(Self::TiltDown),
            '\u{1b}' => Some(Self::Quit),
            _ => None,
        }
    }

    /// Map a named key (`"Up"`, `"ArrowDown"`, `"Escape"`, ...) or a single character.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Up" | "ArrowUp" => Some(Self::SpeedUp),
            "Down" | "ArrowDown" => Some(Self::SlowDown),
            "Esc" | "Escape" => Some(Self::Quit),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => None,
                }
            }
        }
    }
}

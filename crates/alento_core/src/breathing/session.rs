//! Breathing session state machine.
//!
//! The session accumulates active time through `advance` and derives
//! everything else from it: breath phase, circle scale, countdown, and
//! the encouragement overlay. Pausing stops the accumulation, so every
//! derived value freezes with it and resumes where it left off.

use std::time::Duration;

use log::info;
use uuid::Uuid;

const PHASE_SECONDS: u64 = 4;
const ENCOURAGEMENT_DELAY_SECONDS: u64 = 8;
const ENCOURAGEMENT_FADE_SECONDS: f64 = 1.0;
const SCALE_MIN: f64 = 1.0;
const SCALE_MAX: f64 = 1.3;

/// Overlay shown once a session has been active for eight seconds.
pub const ENCOURAGEMENT_TEXT: &str = "Ótimo trabalho! Continue respirando fundo.";
/// Copy for the finished screen.
pub const FINISHED_TITLE: &str = "Parabéns!";
pub const FINISHED_SUBTITLE: &str = "Exercício de respiração concluído.";
/// Circle label while paused.
pub const PAUSED_LABEL: &str = "Pausado";

/// Session length offered on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationChoice {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    Unlimited,
}

impl DurationChoice {
    /// Every choice, in the order the setup screen lists them.
    pub fn all() -> [DurationChoice; 4] {
        [
            DurationChoice::OneMinute,
            DurationChoice::ThreeMinutes,
            DurationChoice::FiveMinutes,
            DurationChoice::Unlimited,
        ]
    }

    /// Total seconds, or `None` for an unlimited session.
    pub fn seconds(self) -> Option<u64> {
        match self {
            DurationChoice::OneMinute => Some(60),
            DurationChoice::ThreeMinutes => Some(180),
            DurationChoice::FiveMinutes => Some(300),
            DurationChoice::Unlimited => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationChoice::OneMinute => "1 Min",
            DurationChoice::ThreeMinutes => "3 Min",
            DurationChoice::FiveMinutes => "5 Min",
            DurationChoice::Unlimited => "Sem Limite",
        }
    }

    /// Inverse of `seconds`; unknown totals yield `None`.
    pub fn from_seconds(seconds: Option<u64>) -> Option<DurationChoice> {
        match seconds {
            Some(60) => Some(DurationChoice::OneMinute),
            Some(180) => Some(DurationChoice::ThreeMinutes),
            Some(300) => Some(DurationChoice::FiveMinutes),
            None => Some(DurationChoice::Unlimited),
            Some(_) => None,
        }
    }
}

/// Four-second halves of the breath cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Exhale,
}

impl BreathPhase {
    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inspire pelo nariz",
            BreathPhase::Exhale => "Expire devagar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Setup,
    Running,
    Paused,
    Finished,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::Setup => "setup",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Finished => "finished",
        }
    }
}

/// Single-clock breathing session.
///
/// `advance` is the only place time enters; callers feed it wall-clock
/// deltas while the session runs. Every visual is a pure function of the
/// accumulated active time, which keeps pause and resume exact.
pub struct BreathingSession {
    id: Uuid,
    state: SessionState,
    choice: Option<DurationChoice>,
    active: Duration,
}

impl BreathingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Setup,
            choice: None,
            active: Duration::ZERO,
        }
    }

    /// Picks a duration on the setup screen; ignored once running.
    pub fn select_duration(&mut self, choice: DurationChoice) {
        if self.state == SessionState::Setup {
            self.choice = Some(choice);
        }
    }

    pub fn can_start(&self) -> bool {
        self.state == SessionState::Setup && self.choice.is_some()
    }

    /// Starts the session; returns whether it actually started.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Setup {
            return false;
        }
        let Some(choice) = self.choice else {
            return false;
        };
        self.id = Uuid::new_v4();
        self.active = Duration::ZERO;
        self.state = SessionState::Running;
        info!(
            "event=breathing_start module=breathing status=ok session={} duration={}",
            self.id,
            choice.label()
        );
        true
    }

    /// Feeds elapsed wall-clock time into the session.
    ///
    /// Only a running session accumulates; a finite session that reaches
    /// its total is clamped there and finishes.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state != SessionState::Running {
            return;
        }
        self.active += elapsed;

        if let Some(total) = self.choice.and_then(DurationChoice::seconds) {
            let target = Duration::from_secs(total);
            if self.active >= target {
                self.active = target;
                self.state = SessionState::Finished;
                info!(
                    "event=breathing_finish module=breathing status=ok session={} active_s={}",
                    self.id,
                    self.active.as_secs()
                );
            }
        }
    }

    /// Flips between running and paused; a no-op elsewhere.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                info!(
                    "event=breathing_pause module=breathing status=ok session={} active_s={}",
                    self.id,
                    self.active.as_secs()
                );
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                info!(
                    "event=breathing_resume module=breathing status=ok session={}",
                    self.id
                );
            }
            SessionState::Setup | SessionState::Finished => {}
        }
    }

    /// Abandons a running or paused session and returns to setup.
    ///
    /// Clears the duration choice as well, so the next session starts
    /// from a clean setup screen.
    pub fn cancel(&mut self) {
        if !matches!(self.state, SessionState::Running | SessionState::Paused) {
            return;
        }
        info!(
            "event=breathing_cancel module=breathing status=ok session={} active_s={}",
            self.id,
            self.active.as_secs()
        );
        self.reset();
    }

    /// Leaves the finished screen and returns to setup.
    pub fn acknowledge_finished(&mut self) {
        if self.state == SessionState::Finished {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.state = SessionState::Setup;
        self.choice = None;
        self.active = Duration::ZERO;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn duration(&self) -> Option<DurationChoice> {
        self.choice
    }

    pub fn session_id(&self) -> Uuid {
        self.id
    }

    /// Current breath phase; flips every four seconds of active time.
    pub fn phase(&self) -> BreathPhase {
        if (self.active.as_secs() / PHASE_SECONDS) % 2 == 0 {
            BreathPhase::Inhale
        } else {
            BreathPhase::Exhale
        }
    }

    /// Seconds left, or `None` while no finite duration is in play.
    pub fn remaining_seconds(&self) -> Option<u64> {
        let total = self.choice.and_then(DurationChoice::seconds)?;
        Some(total.saturating_sub(self.active.as_secs()))
    }

    /// Circle scale, sweeping 1.0 to 1.3 over each four-second half.
    pub fn scale(&self) -> f64 {
        let position = self.active.as_secs_f64() % (2 * PHASE_SECONDS) as f64;
        let range = SCALE_MAX - SCALE_MIN;
        if position < PHASE_SECONDS as f64 {
            SCALE_MIN + range * (position / PHASE_SECONDS as f64)
        } else {
            SCALE_MAX - range * ((position - PHASE_SECONDS as f64) / PHASE_SECONDS as f64)
        }
    }

    /// Whether the encouragement overlay is visible.
    ///
    /// Shows once eight seconds of active time accumulated and stays for
    /// the rest of the session; paused time does not count.
    pub fn show_encouragement(&self) -> bool {
        self.active.as_secs() >= ENCOURAGEMENT_DELAY_SECONDS
    }

    /// Overlay opacity, fading in over one second after it appears.
    pub fn encouragement_opacity(&self) -> f64 {
        let active = self.active.as_secs_f64();
        let delay = ENCOURAGEMENT_DELAY_SECONDS as f64;
        if active < delay {
            0.0
        } else {
            ((active - delay) / ENCOURAGEMENT_FADE_SECONDS).clamp(0.0, 1.0)
        }
    }

    /// Text inside the circle: the pause label or the phase instruction.
    pub fn circle_label(&self) -> &'static str {
        if self.state == SessionState::Paused {
            PAUSED_LABEL
        } else {
            self.phase().instruction()
        }
    }
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a countdown as `MM:SS`.
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::{format_remaining, DurationChoice};

    #[test]
    fn format_remaining_pads_both_fields() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59), "00:59");
        assert_eq!(format_remaining(60), "01:00");
        assert_eq!(format_remaining(300), "05:00");
    }

    #[test]
    fn duration_choices_round_trip_through_seconds() {
        for choice in DurationChoice::all() {
            assert_eq!(DurationChoice::from_seconds(choice.seconds()), Some(choice));
        }
        assert_eq!(DurationChoice::from_seconds(Some(42)), None);
    }
}

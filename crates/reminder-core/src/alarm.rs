//! Alarm Dialog State
//!
//! `ringing -> pending(choice) -> closed(outcome)`, with a failed callback
//! returning to `ringing` and keeping the error for display.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::medication::MedicationId;

/// Snooze buttons offered by the dialog, in minutes
pub const SNOOZE_CHOICES: [u32; 3] = [5, 15, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmChoice {
    Taken,
    Snooze(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    Taken,
    Snoozed(u32),
    Dismissed,
}

impl From<AlarmChoice> for AlarmOutcome {
    fn from(choice: AlarmChoice) -> Self {
        match choice {
            AlarmChoice::Taken => AlarmOutcome::Taken,
            AlarmChoice::Snooze(minutes) => AlarmOutcome::Snoozed(minutes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmPhase {
    Ringing,
    /// Callback in flight; actions are disabled
    Pending(AlarmChoice),
    Closed(AlarmOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmSession {
    medication_id: MedicationId,
    started_at: DateTime<Utc>,
    phase: AlarmPhase,
    muted: bool,
    error: Option<String>,
}

impl AlarmSession {
    pub fn new(medication_id: MedicationId, started_at: DateTime<Utc>) -> Self {
        Self {
            medication_id,
            started_at,
            phase: AlarmPhase::Ringing,
            muted: false,
            error: None,
        }
    }

    pub fn medication_id(&self) -> &str {
        &self.medication_id
    }

    pub fn phase(&self) -> AlarmPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, AlarmPhase::Closed(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, AlarmPhase::Pending(_))
    }

    /// Whether the looping sound should be playing
    pub fn is_ringing(&self) -> bool {
        self.phase == AlarmPhase::Ringing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Flip mute; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.started_at).num_seconds()).unwrap_or(0)
    }

    pub fn elapsed_label(&self, now: DateTime<Utc>) -> String {
        format_elapsed(self.elapsed_secs(now))
    }

    /// Start a taken/snooze action. The caller runs its callback and then
    /// reports the result through [`settle`](Self::settle).
    pub fn begin(&mut self, choice: AlarmChoice) -> CoreResult<()> {
        match self.phase {
            AlarmPhase::Ringing => {
                self.phase = AlarmPhase::Pending(choice);
                self.error = None;
                Ok(())
            }
            AlarmPhase::Pending(_) => Err(CoreError::AlarmBusy),
            AlarmPhase::Closed(_) => Err(CoreError::AlarmClosed),
        }
    }

    /// Report the callback result. Success closes the dialog; failure keeps
    /// it open with the message.
    pub fn settle(&mut self, result: Result<(), String>) -> Option<AlarmOutcome> {
        let AlarmPhase::Pending(choice) = self.phase else {
            return None;
        };
        match result {
            Ok(()) => {
                let outcome = AlarmOutcome::from(choice);
                self.phase = AlarmPhase::Closed(outcome);
                Some(outcome)
            }
            Err(message) => {
                self.phase = AlarmPhase::Ringing;
                self.error = Some(message);
                None
            }
        }
    }

    /// Close without recording anything. Not allowed while a callback is
    /// in flight.
    pub fn dismiss(&mut self) -> CoreResult<AlarmOutcome> {
        match self.phase {
            AlarmPhase::Ringing => {
                self.phase = AlarmPhase::Closed(AlarmOutcome::Dismissed);
                Ok(AlarmOutcome::Dismissed)
            }
            AlarmPhase::Pending(_) => Err(CoreError::AlarmBusy),
            AlarmPhase::Closed(_) => Err(CoreError::AlarmClosed),
        }
    }
}

/// `MM:SS`
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

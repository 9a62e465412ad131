use crate::data_structures::{Resource, ResourceRegistry};
use crate::error::SessionError;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Recording,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::NotStarted => "not started",
            SessionState::Recording => "recording",
            SessionState::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// A single timed recording over a snapshot of resources.
///
/// The state machine is `NotStarted -> Recording -> Stopped`, with
/// `Stopped` terminal. Time-dependent operations take the current
/// timestamp explicitly in their `_at` form; the plain forms sample
/// `Utc::now()`. The elapsed cost is recomputed from the start timestamp
/// on every call, so repeated polling cannot accumulate drift.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    resources: Vec<Resource>,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
}

impl RecordingSession {
    pub fn new(registry: &ResourceRegistry) -> Self {
        Self {
            resources: registry.resources().to_vec(),
            state: SessionState::NotStarted,
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn total_hourly_rate(&self) -> f64 {
        self.resources
            .iter()
            .map(|resource| resource.cost().hourly_rate())
            .sum()
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.start_at(Utc::now())
    }

    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        self.started_at = Some(now);
        self.state = SessionState::Recording;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.stop_at(Utc::now())
    }

    pub fn stop_at(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != SessionState::Recording {
            return Err(SessionError::InvalidState {
                operation: "stop",
                state: self.state,
            });
        }

        self.stopped_at = Some(now);
        self.state = SessionState::Stopped;
        Ok(())
    }

    pub fn elapsed(&self) -> Result<Duration, SessionError> {
        self.elapsed_at(Utc::now())
    }

    /// Wall-clock span covered so far: up to `now` while recording, frozen
    /// at the stop timestamp afterwards.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Result<Duration, SessionError> {
        self.recorded_span("elapsed", now)
    }

    pub fn elapsed_cost(&self) -> Result<f64, SessionError> {
        self.elapsed_cost_at(Utc::now())
    }

    /// Money burned so far: total hourly rate times the elapsed hours.
    pub fn elapsed_cost_at(&self, now: DateTime<Utc>) -> Result<f64, SessionError> {
        let span = self.recorded_span("elapsed_cost", now)?;
        Ok(self.total_hourly_rate() * hours_in(span))
    }

    fn recorded_span(
        &self,
        operation: &'static str,
        now: DateTime<Utc>,
    ) -> Result<Duration, SessionError> {
        match (self.state, self.started_at, self.stopped_at) {
            (SessionState::Recording, Some(started), _) => Ok(now - started),
            (SessionState::Stopped, Some(started), Some(stopped)) => Ok(stopped - started),
            (state, _, _) => Err(SessionError::InvalidState { operation, state }),
        }
    }
}

impl fmt::Display for RecordingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.started_at, self.stopped_at) {
            (Some(started), Some(stopped)) => {
                let span = stopped - started;
                let total_seconds = span.num_seconds().max(0);
                write!(
                    f,
                    "Recorded {}:{:02}:{:02} over {} resource(s) at ${:.2}/h: ${:.2} burned",
                    total_seconds / 3600,
                    (total_seconds % 3600) / 60,
                    total_seconds % 60,
                    self.resources.len(),
                    self.total_hourly_rate(),
                    self.total_hourly_rate() * hours_in(span),
                )
            }
            _ => write!(
                f,
                "Recording session ({}) over {} resource(s) at ${:.2}/h",
                self.state,
                self.resources.len(),
                self.total_hourly_rate(),
            ),
        }
    }
}

fn hours_in(span: Duration) -> f64 {
    span.num_milliseconds() as f64 / 3_600_000.0
}

use super::file::CandidateFile;
use super::progress::ProgressSimulator;
use super::response::{SubmissionError, UploadReceipt};
use crate::common::upload::{validate, FileInfo, Rejection, UploadConstraint};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UploadState {
    Empty,
    Validating,
    Selected,
    Uploading,
    Paused,
    Completed,
    Failed,
}

impl UploadState {
    /// A submission is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(self, UploadState::Uploading | UploadState::Paused)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("An upload is already in progress")]
    Busy,
    #[error("No file selected")]
    NoFile,
    #[error("Cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: UploadState,
    },
    #[error("Upload session has shut down")]
    Closed,
}

/// What observers of a session see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: UploadState,
    pub file: Option<FileInfo>,
    pub progress: f64,
    pub result_url: Option<String>,
    pub error: Option<String>,
}

/// Lifecycle of one file input, from selection to a stored resource URL.
///
/// Pure and synchronous: the caller performs the submission and feeds ticks
/// and results back in. Every submission gets a new attempt number, and ticks
/// or results carrying an older number are ignored.
#[derive(Debug, Clone)]
pub struct UploadSession {
    constraint: UploadConstraint,
    state: UploadState,
    file: Option<CandidateFile>,
    simulator: ProgressSimulator,
    progress: f64,
    result_url: Option<String>,
    error: Option<String>,
    attempt: u64,
}

impl UploadSession {
    pub fn new(constraint: UploadConstraint) -> Self {
        Self {
            constraint,
            state: UploadState::Empty,
            file: None,
            simulator: ProgressSimulator::default(),
            progress: 0.0,
            result_url: None,
            error: None,
            attempt: 0,
        }
    }

    pub fn constraint(&self) -> &UploadConstraint {
        &self.constraint
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            file: self.file.as_ref().map(|f| f.info.clone()),
            progress: self.progress,
            result_url: self.result_url.clone(),
            error: self.error.clone(),
        }
    }

    fn reset_progress(&mut self) {
        self.simulator = ProgressSimulator::default();
        self.progress = 0.0;
    }

    fn clear(&mut self) {
        self.state = UploadState::Empty;
        self.file = None;
        self.result_url = None;
        self.error = None;
        self.reset_progress();
        self.attempt += 1;
    }

    /// Validates and keeps the file. A rejected file leaves the session empty,
    /// with the reason as its error.
    pub fn select(&mut self, file: CandidateFile) -> Result<(), SessionError> {
        if self.state.is_in_flight() {
            return Err(SessionError::Busy);
        }

        self.state = UploadState::Validating;
        self.result_url = None;
        self.error = None;
        self.reset_progress();

        match validate(&file.info, &self.constraint) {
            Ok(()) => {
                self.file = Some(file);
                self.state = UploadState::Selected;
                Ok(())
            }
            Err(rejection) => {
                self.file = None;
                self.state = UploadState::Empty;
                self.error = Some(rejection.to_string());
                Err(rejection.into())
            }
        }
    }

    /// Starts a new attempt and hands back what to send. A failed upload can be
    /// submitted again; nothing is retried on its own.
    pub fn begin_submit(&mut self) -> Result<(u64, CandidateFile), SessionError> {
        match self.state {
            UploadState::Selected | UploadState::Failed => {}
            UploadState::Uploading | UploadState::Paused => return Err(SessionError::Busy),
            state => {
                return Err(SessionError::InvalidTransition {
                    action: "submit",
                    state,
                })
            }
        }
        let file = self.file.clone().ok_or(SessionError::NoFile)?;

        self.attempt += 1;
        self.state = UploadState::Uploading;
        self.error = None;
        self.result_url = None;
        self.reset_progress();
        Ok((self.attempt, file))
    }

    /// Pausing only freezes the simulated progress; the request keeps going.
    pub fn toggle_pause(&mut self) -> Result<UploadState, SessionError> {
        self.state = match self.state {
            UploadState::Uploading => UploadState::Paused,
            UploadState::Paused => {
                self.simulator = ProgressSimulator::starting_at(self.progress);
                UploadState::Uploading
            }
            state => {
                return Err(SessionError::InvalidTransition {
                    action: "pause",
                    state,
                })
            }
        };
        Ok(self.state)
    }

    /// Advances the simulated progress. Returns whether the tick was applied.
    pub fn tick(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt || self.state != UploadState::Uploading {
            return false;
        }
        if let Some(next) = self.simulator.next() {
            self.progress = next;
        }
        true
    }

    /// Applies the outcome of a submission. Returns the resource URL when this
    /// attempt completed the upload.
    pub fn finish(
        &mut self,
        attempt: u64,
        outcome: Result<UploadReceipt, SubmissionError>,
    ) -> Option<String> {
        if attempt != self.attempt || !self.state.is_in_flight() {
            return None;
        }

        match outcome {
            Ok(receipt) => {
                self.state = UploadState::Completed;
                self.progress = 100.0;
                self.result_url = Some(receipt.url.clone());
                Some(receipt.url)
            }
            Err(err) => {
                self.state = UploadState::Failed;
                self.reset_progress();
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Drops the outstanding submission and the file. Anything the server
    /// already stored stays there.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if !self.state.is_in_flight() {
            return Err(SessionError::InvalidTransition {
                action: "cancel",
                state: self.state,
            });
        }
        self.clear();
        Ok(())
    }

    pub fn remove_file(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn session() -> UploadSession {
        UploadSession::new(UploadConstraint::new(1000).with_allowed_types(["video/mp4"]))
    }

    fn clip(size: usize) -> CandidateFile {
        CandidateFile::from_bytes("clip.mp4", "video/mp4", Bytes::from(vec![0u8; size]))
    }

    fn receipt(url: &str) -> UploadReceipt {
        UploadReceipt {
            url: url.to_string(),
            filename: None,
            size: None,
        }
    }

    fn uploading() -> (UploadSession, u64) {
        let mut s = session();
        s.select(clip(10)).unwrap();
        let (attempt, _) = s.begin_submit().unwrap();
        (s, attempt)
    }

    #[test]
    fn valid_selection() {
        let mut s = session();
        s.select(clip(10)).unwrap();
        assert_eq!(s.state(), UploadState::Selected);
        assert_eq!(s.file().map(CandidateFile::name), Some("clip.mp4"));
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn rejected_selection_leaves_the_session_empty() {
        let mut s = session();
        let err = s.select(clip(1500)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File size exceeds the maximum allowed size (1000 Bytes)"
        );
        assert_eq!(s.state(), UploadState::Empty);
        assert!(s.file().is_none());
        assert_eq!(s.error(), Some(err.to_string().as_str()));

        let png = CandidateFile::from_bytes("p.png", "image/png", Bytes::from_static(b"p"));
        assert!(matches!(
            s.select(png),
            Err(SessionError::Rejected(Rejection::UnsupportedType { .. }))
        ));
    }

    #[test]
    fn selecting_the_same_file_twice_only_revalidates() {
        let mut s = session();
        s.select(clip(10)).unwrap();
        let attempt = s.attempt();
        s.select(clip(10)).unwrap();
        assert_eq!(s.state(), UploadState::Selected);
        assert_eq!(s.attempt(), attempt);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.file(), Some(&clip(10)));
    }

    #[test]
    fn a_new_selection_clears_the_previous_result() {
        let (mut s, attempt) = uploading();
        s.finish(attempt, Ok(receipt("/uploads/movies/a.mp4")));
        assert_eq!(s.state(), UploadState::Completed);

        s.select(clip(20)).unwrap();
        assert_eq!(s.state(), UploadState::Selected);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.result_url(), None);
    }

    #[test]
    fn cannot_select_or_submit_while_uploading() {
        let (mut s, _) = uploading();
        assert_eq!(s.select(clip(5)), Err(SessionError::Busy));
        assert!(matches!(s.begin_submit(), Err(SessionError::Busy)));
        s.toggle_pause().unwrap();
        assert_eq!(s.select(clip(5)), Err(SessionError::Busy));
    }

    #[test]
    fn submit_needs_a_selected_file() {
        let mut s = session();
        assert!(matches!(
            s.begin_submit(),
            Err(SessionError::InvalidTransition { action: "submit", state: UploadState::Empty })
        ));
    }

    #[test]
    fn progress_rises_and_stays_below_completion() {
        let (mut s, attempt) = uploading();
        let mut last = s.progress();
        for _ in 0..200 {
            assert!(s.tick(attempt));
            assert!(s.progress() >= last);
            assert!(s.progress() <= 99.0);
            last = s.progress();
        }
        assert_eq!(s.progress(), 99.0);
    }

    #[test]
    fn completion_sets_exactly_one_hundred() {
        let (mut s, attempt) = uploading();
        s.tick(attempt);
        let url = s.finish(attempt, Ok(receipt("/x/y.mp4")));
        assert_eq!(url.as_deref(), Some("/x/y.mp4"));
        assert_eq!(s.state(), UploadState::Completed);
        assert_eq!(s.progress(), 100.0);
        assert_eq!(s.result_url(), Some("/x/y.mp4"));
        assert_eq!(s.error(), None);
        assert!(!s.tick(attempt));
    }

    #[test]
    fn failure_keeps_the_file_for_a_manual_retry() {
        let (mut s, attempt) = uploading();
        s.tick(attempt);
        assert_eq!(s.finish(attempt, Err(SubmissionError::MissingUrl)), None);
        assert_eq!(s.state(), UploadState::Failed);
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.error(), Some("No URL returned from server"));
        assert_eq!(s.result_url(), None);

        let (retry, _) = s.begin_submit().unwrap();
        assert_eq!(retry, attempt + 1);
        assert_eq!(s.state(), UploadState::Uploading);
        assert_eq!(s.error(), None);
    }

    #[test]
    fn pause_freezes_progress_and_resume_continues() {
        let (mut s, attempt) = uploading();
        s.tick(attempt);
        s.tick(attempt);
        assert_eq!(s.toggle_pause(), Ok(UploadState::Paused));
        assert!(!s.tick(attempt));
        assert_eq!(s.progress(), 10.0);

        assert_eq!(s.toggle_pause(), Ok(UploadState::Uploading));
        s.tick(attempt);
        assert_eq!(s.progress(), 15.0);
    }

    #[test]
    fn responses_arriving_while_paused_still_apply() {
        let (mut s, attempt) = uploading();
        s.toggle_pause().unwrap();
        s.finish(attempt, Ok(receipt("/x/y.mp4")));
        assert_eq!(s.state(), UploadState::Completed);
    }

    #[test]
    fn cancel_discards_late_results() {
        let (mut s, attempt) = uploading();
        s.tick(attempt);
        s.cancel().unwrap();
        assert_eq!(s.state(), UploadState::Empty);
        assert_eq!(s.progress(), 0.0);
        assert!(s.file().is_none());

        assert_eq!(s.finish(attempt, Ok(receipt("/x/late.mp4"))), None);
        assert_eq!(s.state(), UploadState::Empty);
        assert_eq!(s.result_url(), None);
        assert!(!s.tick(attempt));
    }

    #[test]
    fn stale_attempts_do_not_touch_a_retry() {
        let (mut s, first) = uploading();
        s.finish(first, Err(SubmissionError::InvalidFormat));
        let (second, _) = s.begin_submit().unwrap();

        assert_eq!(s.finish(first, Ok(receipt("/x/old.mp4"))), None);
        assert_eq!(s.state(), UploadState::Uploading);
        assert_eq!(s.finish(second, Ok(receipt("/x/new.mp4"))).as_deref(), Some("/x/new.mp4"));
    }

    #[test]
    fn cancel_only_applies_to_running_uploads() {
        let mut s = session();
        s.select(clip(10)).unwrap();
        assert!(s.cancel().is_err());
        assert_eq!(s.state(), UploadState::Selected);
    }

    #[test]
    fn remove_file_always_empties() {
        let (mut s, attempt) = uploading();
        s.remove_file();
        assert_eq!(s.state(), UploadState::Empty);
        assert_eq!(s.finish(attempt, Ok(receipt("/x/y.mp4"))), None);

        s.select(clip(10)).unwrap();
        s.remove_file();
        assert_eq!(s.snapshot().file, None);
    }

    #[test]
    fn pause_is_only_for_running_uploads() {
        let mut s = session();
        assert!(matches!(
            s.toggle_pause(),
            Err(SessionError::InvalidTransition { action: "pause", .. })
        ));
    }
}

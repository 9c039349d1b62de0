use super::file::CandidateFile;
use super::progress::Ticker;
use super::response::{interpret, SubmissionError, SubmissionResponse};
use super::session::{SessionError, SessionSnapshot, UploadSession, UploadState};
use super::submitter::Submitter;
use crate::common::upload::UploadConstraint;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

const COMMAND_BUFFER: usize = 16;

/// Receives the resource URL once an upload completes.
pub type CompletionCallback = Box<dyn FnMut(String) + Send>;

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub endpoint: Url,
    pub constraint: UploadConstraint,
    /// No limit when unset.
    pub timeout: Option<Duration>,
}

impl UploadOptions {
    pub fn new(endpoint: Url, constraint: UploadConstraint) -> Self {
        Self {
            endpoint,
            constraint,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

enum Command {
    Select(CandidateFile, Reply<()>),
    Submit(Reply<()>),
    TogglePause(Reply<UploadState>),
    Cancel(Reply<()>),
    RemoveFile(Reply<()>),
}

struct InFlight {
    attempt: u64,
    task: JoinHandle<Result<SubmissionResponse, SubmissionError>>,
}

enum Event {
    Command(Command),
    Tick(u64),
    Settled(u64, Result<SubmissionResponse, SubmissionError>),
}

/// Owns one session together with its ticker and outstanding submission.
struct UploadDriver {
    session: UploadSession,
    submitter: Arc<dyn Submitter>,
    endpoint: Url,
    timeout: Option<Duration>,
    on_complete: Option<CompletionCallback>,
    ticker: Option<Ticker>,
    in_flight: Option<InFlight>,
    snapshots: watch::Sender<SessionSnapshot>,
}

async fn next_tick(ticker: &mut Option<Ticker>) -> u64 {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => future::pending().await,
    }
}

async fn settle(
    in_flight: &mut Option<InFlight>,
) -> (u64, Result<SubmissionResponse, SubmissionError>) {
    let Some(flight) = in_flight.as_mut() else {
        return future::pending().await;
    };

    let result = match (&mut flight.task).await {
        Ok(result) => result,
        Err(e) => Err(SubmissionError::Transport(format!("Upload task failed: {}", e))),
    };
    let attempt = flight.attempt;
    *in_flight = None;
    (attempt, result)
}

impl UploadDriver {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Event::Command(command),
                    None => break,
                },
                attempt = next_tick(&mut self.ticker) => Event::Tick(attempt),
                (attempt, result) = settle(&mut self.in_flight) => Event::Settled(attempt, result),
            };

            match event {
                Event::Command(command) => self.handle(command),
                Event::Tick(attempt) => {
                    if self.session.tick(attempt) {
                        self.publish();
                    }
                }
                Event::Settled(attempt, result) => {
                    self.on_settled(attempt, result);
                    self.publish();
                }
            }
        }

        self.abort_in_flight();
        debug!("Upload session closed");
    }

    /// Publishes the new state before replying, so callers observe their own change.
    fn handle(&mut self, command: Command) {
        match command {
            Command::Select(file, reply) => {
                let result = self.session.select(file);
                self.publish();
                let _ = reply.send(result);
            }
            Command::Submit(reply) => {
                let result = self.submit();
                self.publish();
                let _ = reply.send(result);
            }
            Command::TogglePause(reply) => {
                let result = self.session.toggle_pause();
                self.publish();
                let _ = reply.send(result);
            }
            Command::Cancel(reply) => {
                let result = self.session.cancel();
                if result.is_ok() {
                    self.abort_in_flight();
                    info!("Upload cancelled");
                }
                self.publish();
                let _ = reply.send(result);
            }
            Command::RemoveFile(reply) => {
                self.session.remove_file();
                self.abort_in_flight();
                self.publish();
                let _ = reply.send(Ok(()));
            }
        }
    }

    fn publish(&mut self) {
        self.sync_ticker();
        self.snapshots.send_replace(self.session.snapshot());
    }

    fn submit(&mut self) -> Result<(), SessionError> {
        let (attempt, file) = self.session.begin_submit()?;
        self.abort_in_flight();

        let submitter = Arc::clone(&self.submitter);
        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        info!(attempt, file = file.name(), size = file.size(), "Upload started");

        let task = tokio::spawn(async move {
            let submission = submitter.submit(&endpoint, &file);
            match timeout {
                Some(limit) => tokio::time::timeout(limit, submission)
                    .await
                    .unwrap_or(Err(SubmissionError::TimedOut(limit))),
                None => submission.await,
            }
        });

        self.in_flight = Some(InFlight { attempt, task });
        Ok(())
    }

    fn on_settled(&mut self, attempt: u64, result: Result<SubmissionResponse, SubmissionError>) {
        let outcome = result.and_then(|response| interpret(&response));
        if let Err(e) = &outcome {
            warn!(attempt, "Upload failed: {}", e);
        }

        if let Some(url) = self.session.finish(attempt, outcome) {
            info!(attempt, %url, "Upload completed");
            if let Some(callback) = self.on_complete.as_mut() {
                callback(url);
            }
        }
    }

    /// Only an uploading session ticks, and always on a ticker of the current attempt.
    fn sync_ticker(&mut self) {
        let attempt = self.session.attempt();
        if self.session.state() == UploadState::Uploading {
            if self.ticker.as_ref().map(Ticker::attempt) != Some(attempt) {
                self.ticker = Some(Ticker::start(attempt));
            }
        } else {
            self.ticker = None;
        }
    }

    /// Local only: the server may still store what it already received.
    fn abort_in_flight(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            flight.task.abort();
        }
    }
}

/// Controls a running upload session. Cheap to clone; the session stops once
/// every handle is dropped.
#[derive(Clone)]
pub struct UploadHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl UploadHandle {
    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(command(tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    pub async fn select(&self, file: CandidateFile) -> Result<(), SessionError> {
        self.request(|reply| Command::Select(file, reply)).await
    }

    pub async fn submit(&self) -> Result<(), SessionError> {
        self.request(Command::Submit).await
    }

    pub async fn toggle_pause(&self) -> Result<UploadState, SessionError> {
        self.request(Command::TogglePause).await
    }

    pub async fn cancel(&self) -> Result<(), SessionError> {
        self.request(Command::Cancel).await
    }

    pub async fn remove_file(&self) -> Result<(), SessionError> {
        self.request(Command::RemoveFile).await
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits until no submission is outstanding.
    pub async fn wait_until_settled(&self) -> SessionSnapshot {
        let mut snapshots = self.snapshots.clone();
        let settled = match snapshots.wait_for(|s| !s.state.is_in_flight()).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }
}

/// Starts the task that owns a new upload session.
pub fn spawn_upload_session(
    submitter: Arc<dyn Submitter>,
    options: UploadOptions,
    on_complete: Option<CompletionCallback>,
) -> UploadHandle {
    let session = UploadSession::new(options.constraint);
    let (snapshots, snapshot_rx) = watch::channel(session.snapshot());
    let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);

    let driver = UploadDriver {
        session,
        submitter,
        endpoint: options.endpoint,
        timeout: options.timeout,
        on_complete,
        ticker: None,
        in_flight: None,
        snapshots,
    };
    tokio::spawn(driver.run(command_rx));

    UploadHandle {
        commands,
        snapshots: snapshot_rx,
    }
}

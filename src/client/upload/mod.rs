//! Client-side upload flow: a file is selected and validated, then submitted
//! to the upload endpoint while a simulated progress value advances.

pub mod driver;
pub mod file;
pub mod progress;
pub mod response;
pub mod session;
pub mod submitter;

pub use driver::{spawn_upload_session, CompletionCallback, UploadHandle, UploadOptions};
pub use file::{CandidateFile, FileSource};
pub use response::{SubmissionError, SubmissionResponse, UploadReceipt};
pub use session::{SessionError, SessionSnapshot, UploadSession, UploadState};
pub use submitter::{HttpSubmitter, Submitter};

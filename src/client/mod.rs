//! Back-office client: talks to the HTTP API, drives upload sessions and
//! submits record forms.

pub mod api;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod upload;

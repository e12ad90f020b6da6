//! Test doubles and common utilities for dispatcher contract tests
//!
//! This module provides a transport double that records requests
//! instead of sending them.

#![allow(dead_code)]

use clap::{ArgMatches, Command};
use invdns_core::error::{Error, Result};
use invdns_core::traits::{ApiRequest, ApiResponse, Transport};
use invdns_core::{ClientConfig, Registry, record_commands};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the recording transport answers with
#[derive(Clone)]
pub enum Reply {
    /// 2xx with a body
    Ok(u16, String),
    /// Non-2xx status
    Status(u16, String),
    /// Connection failure
    Refused,
}

/// A Transport that records every request it is asked to send
pub struct RecordingTransport {
    /// Call counter for send()
    send_call_count: Arc<AtomicUsize>,
    /// Requests in the order they were sent
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    /// Canned reply
    reply: Reply,
}

impl RecordingTransport {
    /// Answer every request with `201` and a small JSON body
    pub fn new() -> Self {
        Self::replying(Reply::Ok(201, r#"{"pk": 1}"#.to_string()))
    }

    pub fn replying(reply: Reply) -> Self {
        Self {
            send_call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    /// Get the number of times send() was called
    pub fn send_call_count(&self) -> usize {
        self.send_call_count.load(Ordering::SeqCst)
    }

    /// Get the recorded requests
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.send_call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            Reply::Ok(status, body) => Ok(ApiResponse::new(*status, body.clone())),
            Reply::Status(status, body) => Err(Error::http(*status, body.clone())),
            Reply::Refused => Err(Error::transport("connection refused")),
        }
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// Root command with every record subcommand
pub fn root_command(registry: &Registry) -> Command {
    Command::new("invdns").subcommands(record_commands(registry))
}

/// Parse a full command line (without the program name)
pub fn parse(registry: &Registry, args: &[&str]) -> ArgMatches {
    root_command(registry)
        .try_get_matches_from(std::iter::once("invdns").chain(args.iter().copied()))
        .expect("command line parses")
}

/// Helper to create a config pointing at a fake remote
pub fn test_config() -> ClientConfig {
    ClientConfig::new("https://inventory.test").with_credentials("tester", "secret")
}

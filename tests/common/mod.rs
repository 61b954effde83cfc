#![allow(dead_code)]

use async_trait::async_trait;
use scene_picker::{AnalyzeResponse, ClientError, Frame, SceneBackend};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const FAKE_ZIP: &[u8] = b"PK\x03\x04fake-archive";

/// Scripted reply for the next analysis request
pub enum Reply {
    Frames(Vec<Frame>),
    Failure(String),
    Offline,
}

/// In-memory backend that records every request it receives
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Reply>>,
    download_status: Option<u16>,
    pub analyze_calls: Mutex<Vec<String>>,
    pub download_calls: Mutex<Vec<Vec<Frame>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn failing_downloads(mut self, status: u16) -> Self {
        self.download_status = Some(status);
        self
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.lock().unwrap().len()
    }

    pub fn download_count(&self) -> usize {
        self.download_calls.lock().unwrap().len()
    }

    pub fn last_download(&self) -> Option<Vec<Frame>> {
        self.download_calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SceneBackend for FakeBackend {
    async fn analyze_frames(&self, url: &str) -> scene_picker::Result<AnalyzeResponse> {
        self.analyze_calls.lock().unwrap().push(url.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Frames(frames)) => Ok(AnalyzeResponse::ok(frames)),
            Some(Reply::Failure(message)) => Ok(AnalyzeResponse::failed(message)),
            Some(Reply::Offline) | None => Err(ClientError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "backend offline",
            ))),
        }
    }

    async fn download_frames(&self, frames: &[Frame]) -> scene_picker::Result<Vec<u8>> {
        self.download_calls.lock().unwrap().push(frames.to_vec());

        match self.download_status {
            Some(status) => Err(ClientError::Export { status }),
            None => Ok(FAKE_ZIP.to_vec()),
        }
    }
}

/// The two-frame analysis result used across tests
pub fn two_frames() -> Vec<Frame> {
    vec![Frame::new("AAAA", 0.4), Frame::new("BBBB", 12.9)]
}

pub fn frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame::new(format!("F{}", i), i as f64 * 3.3))
        .collect()
}

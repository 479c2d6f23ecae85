use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use fetch_save::download::Payload;
use fetch_save::http::{Body, RequestOptions, Transport, TransportResponse};
use fetch_save::save::HandleId;
use fetch_save::{DownloaderBuilder, Error, FileDownloader, Navigator, ProgressCallback, Result, SaveSurface};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use reqwest::StatusCode;

pub const TEST_REMOTE_URL: &str = "https://cdn.example.com/x.pdf";

/// Routes library logs to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

// === Transport ===

/// Transport serving a canned response and recording requested addresses.
#[derive(Clone)]
pub struct FakeTransport {
    status: StatusCode,
    content: Vec<u8>,
    chunk_size: usize,
    declare_length: bool,
    streaming: bool,
    fail_connect: bool,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    /// A 200 response streaming `content` in `chunk_size` chunks with a Content-Length.
    pub fn ok(content: Vec<u8>, chunk_size: usize) -> Self {
        Self {
            status: StatusCode::OK,
            content,
            chunk_size,
            declare_length: true,
            streaming: true,
            fail_connect: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An empty response with the given status.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::ok(Vec::new(), 1)
        }
    }

    /// A transport whose connection always fails.
    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::ok(Vec::new(), 1)
        }
    }

    pub fn without_content_length(mut self) -> Self {
        self.declare_length = false;
        self
    }

    pub fn buffered(mut self) -> Self {
        self.streaming = false;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, address: &str, _options: &RequestOptions) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(address.to_string());
        if self.fail_connect {
            return Err(Error::Transport("connection refused".into()));
        }

        let mut headers = HeaderMap::new();
        if self.declare_length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(self.content.len() as u64));
        }

        let body = if self.streaming {
            let chunks: Vec<Result<Bytes>> = self
                .content
                .chunks(self.chunk_size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();
            Body::from_chunks(chunks)
        } else {
            Body::from_bytes(self.content.clone())
        };

        Ok(TransportResponse::new(self.status, headers, body))
    }
}

// === Save surface ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveEvent {
    Created(String),
    Presented(String, String),
    Released(String),
}

/// Save surface keeping everything in memory.
#[derive(Clone, Default)]
pub struct RecordingSaveSurface {
    fail_present: bool,
    events: Arc<Mutex<Vec<SaveEvent>>>,
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    next_id: Arc<Mutex<u32>>,
    staged: Arc<Mutex<Vec<(HandleId, Vec<u8>)>>>,
}

impl RecordingSaveSurface {
    pub fn failing() -> Self {
        Self {
            fail_present: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<SaveEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn presented_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SaveEvent::Presented(..)))
            .count()
    }
}

impl SaveSurface for RecordingSaveSurface {
    fn create_handle(&self, payload: &Payload) -> Result<HandleId> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = HandleId::new(format!("blob:{}", *next_id));
        self.staged
            .lock()
            .unwrap()
            .push((id.clone(), payload.as_bytes().to_vec()));
        self.events
            .lock()
            .unwrap()
            .push(SaveEvent::Created(id.to_string()));
        Ok(id)
    }

    fn present_save(&self, handle: &HandleId, suggested_name: &str) -> Result<()> {
        self.events.lock().unwrap().push(SaveEvent::Presented(
            handle.to_string(),
            suggested_name.to_string(),
        ));
        if self.fail_present {
            return Err(Error::Save("save dialog unavailable".into()));
        }
        let staged = self.staged.lock().unwrap();
        let (_, data) = staged
            .iter()
            .find(|(id, _)| id == handle)
            .ok_or_else(|| Error::Save("unknown handle".into()))?;
        self.saved
            .lock()
            .unwrap()
            .push((suggested_name.to_string(), data.clone()));
        Ok(())
    }

    fn release_handle(&self, handle: &HandleId) {
        self.staged.lock().unwrap().retain(|(id, _)| id != handle);
        self.events
            .lock()
            .unwrap()
            .push(SaveEvent::Released(handle.to_string()));
    }
}

// === Navigator ===

/// Navigator recording every address it is asked to open.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    fail: bool,
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&self, address: &str) -> Result<()> {
        self.opened.lock().unwrap().push(address.to_string());
        if self.fail {
            Err(Error::Navigation("popup blocked".into()))
        } else {
            Ok(())
        }
    }
}

// === Progress ===

/// Creates a progress callback recording every signal.
pub fn progress_recorder() -> (ProgressCallback, Arc<Mutex<Vec<(u64, Option<u64>)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback: ProgressCallback = Arc::new(move |loaded, total| {
        sink.lock().unwrap().push((loaded, total));
    });
    (callback, seen)
}

// === Downloader ===

/// Creates a downloader wired with the given fakes.
pub fn create_test_downloader(
    transport: &FakeTransport,
    surface: &RecordingSaveSurface,
    navigator: &RecordingNavigator,
) -> FileDownloader {
    DownloaderBuilder::new()
        .transport(transport.clone())
        .save_surface(surface.clone())
        .navigator(navigator.clone())
        .build()
        .expect("Failed to build downloader")
}

/// Asserts that every created handle was released.
pub fn assert_handles_released(surface: &RecordingSaveSurface) {
    let events = surface.events();
    let created = events
        .iter()
        .filter(|e| matches!(e, SaveEvent::Created(_)))
        .count();
    let released = events
        .iter()
        .filter(|e| matches!(e, SaveEvent::Released(_)))
        .count();
    assert_eq!(created, released, "Unreleased save handles: {:?}", events);
}

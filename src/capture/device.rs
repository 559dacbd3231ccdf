use async_trait::async_trait;
use bytes::Bytes;

use super::{CaptureError, CaptureResult};

/// Container preferences, best first.
pub const PREFERRED_MIME_TYPES: &[&str] = &[
    "video/mp4;codecs=h264,aac",
    "video/mp4",
    "video/webm;codecs=vp9,opus",
    "video/webm;codecs=vp8,opus",
    "video/webm;codecs=h264,opus",
    "video/webm",
];

pub fn choose_mime_type(supported: impl Fn(&str) -> bool) -> Option<&'static str> {
    PREFERRED_MIME_TYPES.iter().copied().find(|m| supported(m))
}

/// A finished recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMedia {
    pub data: Bytes,
    pub mime_type: String,
}

impl RecordedMedia {
    pub fn extension(&self) -> &'static str {
        if self.mime_type.contains("mp4") {
            "mp4"
        } else {
            "webm"
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Live camera/microphone access.
#[async_trait]
pub trait StreamHandle: Send {
    fn supports(&self, mime_type: &str) -> bool;

    fn start_recording(&mut self, mime_type: Option<&str>) -> CaptureResult<()>;

    async fn stop_recording(&mut self) -> CaptureResult<RecordedMedia>;

    /// Stop every track. Called exactly once, from `MediaStream`'s drop.
    fn release(&mut self);
}

/// Owns the acquired stream and releases it when dropped, whichever way
/// the flow ends.
pub struct MediaStream {
    handle: Box<dyn StreamHandle>,
    recording: bool,
}

impl MediaStream {
    pub fn new(handle: Box<dyn StreamHandle>) -> Self {
        Self {
            handle,
            recording: false,
        }
    }

    pub fn start_recording(&mut self) -> CaptureResult<()> {
        if self.recording {
            return Ok(());
        }
        let handle = &self.handle;
        let mime = choose_mime_type(|m| handle.supports(m));
        self.handle.start_recording(mime)?;
        self.recording = true;
        Ok(())
    }

    pub async fn stop_recording(&mut self) -> CaptureResult<RecordedMedia> {
        if !self.recording {
            return Err(CaptureError::Device("recorder is not running".to_string()));
        }
        self.recording = false;
        self.handle.stop_recording().await
    }
}

impl Drop for MediaStream {
    fn drop(&mut self) {
        self.handle.release();
    }
}

#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Ask for camera and microphone. A refusal is `PermissionDenied`.
    async fn acquire(&self) -> CaptureResult<MediaStream>;
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::fake::FakeDevice;
    use super::*;

    #[test]
    fn mime_choice_follows_preference_order() {
        assert_eq!(choose_mime_type(|_| true), Some("video/mp4;codecs=h264,aac"));
        // recorders that only know the bare container still get mp4
        assert_eq!(choose_mime_type(|m| m == "video/mp4"), Some("video/mp4"));
        assert_eq!(
            choose_mime_type(|m| m.starts_with("video/webm;codecs=h264")),
            Some("video/webm;codecs=h264,opus")
        );
        assert_eq!(
            choose_mime_type(|m| m == "video/webm"),
            Some("video/webm")
        );
        assert_eq!(choose_mime_type(|_| false), None);
    }

    #[test]
    fn extension_tracks_container() {
        let mp4 = RecordedMedia {
            data: Bytes::new(),
            mime_type: "video/mp4;codecs=avc1".into(),
        };
        let webm = RecordedMedia {
            data: Bytes::new(),
            mime_type: "video/webm".into(),
        };
        assert_eq!(mp4.extension(), "mp4");
        assert_eq!(webm.extension(), "webm");
    }

    #[tokio::test]
    async fn dropping_the_stream_releases_the_device() {
        let device = FakeDevice::new(0);
        let mut stream = device.acquire().await.unwrap();
        stream.start_recording().unwrap();
        let media = stream.stop_recording().await.unwrap();
        assert_eq!(media.mime_type, "video/webm;codecs=vp9,opus");
        assert!(stream.stop_recording().await.is_err());

        assert_eq!(device.counters.released.load(Ordering::SeqCst), 0);
        drop(stream);
        assert_eq!(device.counters.released.load(Ordering::SeqCst), 1);
    }
}

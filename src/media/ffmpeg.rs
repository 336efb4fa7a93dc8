use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::foundation::error::{LentiqError, LentiqResult};
use crate::media::decoder::{MediaDecoder, MediaInfo, SeekOutcome};
use crate::media::inbox::FrameInbox;

/// Decoder adapter backed by the system `ffmpeg`/`ffprobe` tools.
///
/// Metadata comes from `ffprobe` JSON. Frames are decoded on a worker thread,
/// one request per seek, so [`MediaDecoder::wait_seek`] is a bounded
/// `recv_timeout` rather than an open-ended block. The most recent frame
/// delivered by the worker is the "currently visible" frame; a frame that
/// lands after its seek timed out is absorbed on a later wait, never lost.
pub struct FfmpegDecoder {
    source_path: PathBuf,
    info: Option<MediaInfo>,
    worker: Option<Worker>,
    inbox: Option<FrameInbox>,
}

struct Worker {
    requests: mpsc::Sender<f64>,
    handle: JoinHandle<()>,
}

impl FfmpegDecoder {
    /// Create a decoder for the given source file. No work happens until
    /// [`MediaDecoder::probe`].
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            info: None,
            worker: None,
            inbox: None,
        }
    }
}

impl MediaDecoder for FfmpegDecoder {
    fn probe(&mut self) -> LentiqResult<MediaInfo> {
        let info = probe_media(&self.source_path)?;
        self.info = Some(info);

        let (req_tx, req_rx) = mpsc::channel::<f64>();
        let (res_tx, res_rx) = mpsc::channel::<LentiqResult<Option<Vec<u8>>>>();
        let path = self.source_path.clone();
        let (width, height) = (info.width, info.height);
        let handle = std::thread::spawn(move || {
            while let Ok(time_secs) = req_rx.recv() {
                let result = decode_frame_rgba8(&path, width, height, time_secs);
                if res_tx.send(result).is_err() {
                    break;
                }
            }
        });
        self.worker = Some(Worker {
            requests: req_tx,
            handle,
        });
        self.inbox = Some(FrameInbox::new(res_rx));
        Ok(info)
    }

    fn begin_seek(&mut self, time_secs: f64) -> LentiqResult<()> {
        let worker = self.worker.as_ref().ok_or_else(|| {
            LentiqError::validation("begin_seek requires a successful probe first")
        })?;
        worker
            .requests
            .send(time_secs)
            .map_err(|_| LentiqError::frame_extraction("decoder worker is gone"))?;
        if let Some(inbox) = self.inbox.as_mut() {
            inbox.mark_requested();
        }
        Ok(())
    }

    fn wait_seek(&mut self, timeout: Duration) -> SeekOutcome {
        match self.inbox.as_mut() {
            Some(inbox) => inbox.wait(timeout),
            None => SeekOutcome::Completed,
        }
    }

    fn current_frame_rgba8(&mut self) -> LentiqResult<Option<Vec<u8>>> {
        match self.inbox.as_mut() {
            Some(inbox) => inbox.current_frame(),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        self.inbox = None;
        if let Some(worker) = self.worker.take() {
            drop(worker.requests);
            let _ = worker.handle.join();
        }
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        self.release();
    }
}

/// Probe source metadata through `ffprobe`.
fn probe_media(source_path: &Path) -> LentiqResult<MediaInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| LentiqError::media_load(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(LentiqError::media_load(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| LentiqError::media_load(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| LentiqError::media_load("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| LentiqError::media_load("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| LentiqError::media_load("missing video height from ffprobe"))?;
    let duration_secs = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.parse::<f64>().ok());

    Ok(MediaInfo {
        width,
        height,
        duration_secs,
    })
}

/// Decode one RGBA frame at `time_secs` via `ffmpeg`.
///
/// `Ok(None)` means the run succeeded but produced no frame, which is what
/// `-ss` past the last video packet does when the container reports a longer
/// duration than the video stream. Only nonzero exits and truncated nonzero
/// reads are faults.
fn decode_frame_rgba8(
    source_path: &Path,
    width: u32,
    height: u32,
    time_secs: f64,
) -> LentiqResult<Option<Vec<u8>>> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{time_secs:.9}")])
        .arg("-i")
        .arg(source_path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| LentiqError::media_load(format!("failed to run ffmpeg for decode: {e}")))?;

    if !out.status.success() {
        return Err(LentiqError::media_load(format!(
            "ffmpeg frame decode failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let expected_len = width as usize * height as usize * 4;
    if expected_len == 0 {
        return Err(LentiqError::media_load(
            "decoded frame size is zero (invalid source dimensions)",
        ));
    }
    if out.stdout.is_empty() {
        return Ok(None);
    }
    if out.stdout.len() < expected_len {
        return Err(LentiqError::media_load(format!(
            "decoded frame has invalid size: got {} bytes, expected {expected_len}",
            out.stdout.len()
        )));
    }

    Ok(Some(out.stdout[..expected_len].to_vec()))
}

// No unit tests here: these functions shell out to `ffprobe`/`ffmpeg` and are
// validated by the gated integration test in `tests/media_ffmpeg.rs`. The
// request/result bookkeeping is tested through `FrameInbox`.

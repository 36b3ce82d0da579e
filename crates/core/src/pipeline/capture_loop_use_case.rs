use std::time::Instant;

use crate::capture::domain::capture_error::CaptureError;
use crate::capture::domain::frame_display::FrameDisplay;
use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::face_annotator::FaceAnnotator;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::release_guard::ReleaseGuard;
use crate::shared::constants::{KEY_POLL_MS, QUIT_KEY};

/// Lifecycle of a capture session.
///
/// `Idle → Opening → Streaming → Closed`; `Closed` is also reached directly
/// from `Opening` when the device cannot be acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Opening,
    Streaming,
    Closed,
}

/// Why a session that streamed successfully stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExitReason {
    QuitKey,
    ReadFailure(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopReport {
    pub frames_displayed: usize,
    pub exit_reason: ExitReason,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopOptions {
    pub detect_eyes: bool,
    pub quit_key: char,
    pub key_poll_ms: i32,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            detect_eyes: false,
            quit_key: QUIT_KEY,
            key_poll_ms: KEY_POLL_MS,
        }
    }
}

/// Live capture pipeline: read → annotate → show → poll quit key.
pub struct CaptureLoopUseCase {
    source: Box<dyn FrameSource>,
    display: Box<dyn FrameDisplay>,
    annotator: FaceAnnotator,
    options: LoopOptions,
    logger: Box<dyn PipelineLogger>,
    state: CaptureState,
}

impl CaptureLoopUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        display: Box<dyn FrameDisplay>,
        annotator: FaceAnnotator,
        options: LoopOptions,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            display,
            annotator,
            options,
            logger,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Runs one capture session until the quit key, a read failure, or an error.
    ///
    /// The source is released and the display closed on every path.
    pub fn execute(&mut self) -> Result<LoopReport, CaptureError> {
        let result = {
            let mut session = Session {
                guard: ReleaseGuard::new(&mut *self.source, &mut *self.display),
                annotator: &mut self.annotator,
                logger: &mut *self.logger,
                options: &self.options,
                state: &mut self.state,
            };
            session.run()
        };
        transition(&mut self.state, CaptureState::Closed);
        self.logger.summary();
        result
    }
}

/// Borrowed view of the use case for the duration of one session.
struct Session<'a> {
    guard: ReleaseGuard<'a>,
    annotator: &'a mut FaceAnnotator,
    logger: &'a mut dyn PipelineLogger,
    options: &'a LoopOptions,
    state: &'a mut CaptureState,
}

impl Session<'_> {
    fn run(&mut self) -> Result<LoopReport, CaptureError> {
        transition(self.state, CaptureState::Opening);
        let info = self
            .guard
            .source
            .open()
            .map_err(|e| CaptureError::CameraUnavailable {
                device: self.guard.source.device(),
                source: e,
            })?;
        self.logger.info(&format!("Opened {info}"));
        transition(self.state, CaptureState::Streaming);

        let mut frames_displayed = 0;
        loop {
            let start = Instant::now();
            let mut frame = match self.guard.source.read() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("Could not read frame: {e}");
                    return Ok(LoopReport {
                        frames_displayed,
                        exit_reason: ExitReason::ReadFailure(e.to_string()),
                    });
                }
            };
            self.logger.timing("capture", elapsed_ms(start));

            let start = Instant::now();
            let annotation = self
                .annotator
                .annotate(&mut frame, self.options.detect_eyes)
                .map_err(CaptureError::Detection)?;
            self.logger.timing("detect", elapsed_ms(start));
            self.logger.metric("faces", annotation.face_count() as f64);
            if self.options.detect_eyes {
                self.logger.metric("eyes", annotation.eye_count() as f64);
            }

            let start = Instant::now();
            self.guard
                .display
                .show(&frame)
                .map_err(CaptureError::Display)?;
            self.logger.timing("display", elapsed_ms(start));
            frames_displayed += 1;
            self.logger.frame_displayed(frames_displayed);

            let key = self
                .guard
                .display
                .poll_key(self.options.key_poll_ms)
                .map_err(CaptureError::Display)?;
            if key.is_some_and(|k| is_key(k, self.options.quit_key)) {
                log::info!("Quit key pressed after {frames_displayed} frames");
                return Ok(LoopReport {
                    frames_displayed,
                    exit_reason: ExitReason::QuitKey,
                });
            }
        }
    }
}

fn transition(state: &mut CaptureState, next: CaptureState) {
    log::debug!("Capture state: {state:?} -> {next:?}");
    *state = next;
}

/// Compares the low byte of a raw key code, which some backends pad with
/// modifier bits.
fn is_key(code: i32, key: char) -> bool {
    (code & 0xFF) == key as i32
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

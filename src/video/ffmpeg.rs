//! FFmpeg-backed frame source.
//!
//! Opens a container with libavformat, decodes its best video stream with
//! libavcodec and converts every frame to packed RGB24 with libswscale.
//! Decoding is synchronous: each [`FrameSource::next_frame`] call reads
//! packets until the decoder produces a frame.

use std::path::{Path, PathBuf};

use ffmpeg_next::format::{context::Input, Pixel};
use ffmpeg_next::software::scaling::{self, Flags};
use ffmpeg_next::util::frame::video::Video;
use image::RgbImage;

use crate::error::VideoError;

use super::{FrameSource, VideoFrame, VideoMetadata};

/// Decoder for video files.
pub struct FfmpegDecoder {
    path: PathBuf,
    input: Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: scaling::Context,
    stream_index: usize,
    /// Seconds per PTS unit
    time_base: f64,
    metadata: VideoMetadata,
    next_index: u64,
    eof_sent: bool,
    done: bool,
}

impl std::fmt::Debug for FfmpegDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegDecoder")
            .field("path", &self.path)
            .field("metadata", &self.metadata)
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

/// Initialize FFmpeg once per process and silence its stderr logging,
/// which would otherwise scribble over the TUI.
fn init_ffmpeg() -> Result<(), VideoError> {
    ffmpeg_next::init()?;
    ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Quiet);
    Ok(())
}

impl FfmpegDecoder {
    /// Open a video file and prepare its best video stream for decoding.
    pub fn open(path: &Path) -> Result<Self, VideoError> {
        if !path.exists() {
            return Err(VideoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        init_ffmpeg()?;

        let input = ffmpeg_next::format::input(path)?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| VideoError::NoVideoStream {
                path: path.to_path_buf(),
            })?;

        let stream_index = stream.index();
        let codec_id = stream.parameters().id();
        let context = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video().map_err(|e| match e {
            ffmpeg_next::Error::DecoderNotFound => {
                VideoError::UnsupportedCodec(format!("{:?}", codec_id))
            }
            other => VideoError::Ffmpeg(other),
        })?;

        let fps = rational_to_f64(stream.avg_frame_rate())
            .or_else(|| rational_to_f64(stream.rate()))
            .ok_or(VideoError::InvalidFrameRate(0.0))?;

        let time_base = rational_to_f64(stream.time_base()).unwrap_or(0.0);

        let duration = if input.duration() > 0 {
            input.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
        } else {
            0.0
        };

        let frame_count = match stream.frames() {
            n if n > 0 => n as u64,
            _ => (duration * fps).round() as u64,
        };

        let (width, height) = (decoder.width(), decoder.height());
        let scaler = scaling::Context::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            Flags::BILINEAR,
        )?;

        let metadata = VideoMetadata {
            width,
            height,
            fps,
            duration,
            frame_count,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
        };

        tracing::debug!(
            path = %path.display(),
            width,
            height,
            fps,
            duration,
            frame_count,
            codec = %metadata.codec,
            "opened video"
        );

        Ok(Self {
            path: path.to_path_buf(),
            input,
            decoder,
            scaler,
            stream_index,
            time_base,
            metadata,
            next_index: 0,
            eof_sent: false,
            done: false,
        })
    }

    /// Take a decoded frame from the decoder, if one is ready.
    fn receive(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        let mut decoded = Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            // EAGAIN (needs more input) or EOF
            return Ok(None);
        }

        let mut rgb = Video::empty();
        self.scaler
            .run(&decoded, &mut rgb)
            .map_err(|e| VideoError::Decode(format!("scaling failed: {}", e)))?;
        let image = extract_rgb(&rgb)?;

        let index = self.next_index;
        self.next_index += 1;
        let timestamp = match decoded.timestamp() {
            Some(pts) if self.time_base > 0.0 => pts as f64 * self.time_base,
            _ => self.metadata.frame_time(index),
        };
        tracing::trace!(index, timestamp, "decoded frame");

        Ok(Some(VideoFrame::new(index, timestamp, image)))
    }
}

impl FrameSource for FfmpegDecoder {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, VideoError> {
        if self.done {
            return Ok(None);
        }

        loop {
            if let Some(frame) = self.receive()? {
                return Ok(Some(frame));
            }
            if self.eof_sent {
                self.done = true;
                return Ok(None);
            }

            let packet = self
                .input
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));
            match packet {
                Some((index, packet)) if index == self.stream_index => {
                    self.decoder
                        .send_packet(&packet)
                        .map_err(|e| VideoError::Decode(format!("packet rejected: {}", e)))?;
                }
                Some(_) => continue,
                None => {
                    // drain frames still buffered in the decoder
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
            }
        }
    }
}

fn rational_to_f64(r: ffmpeg_next::Rational) -> Option<f64> {
    if r.numerator() > 0 && r.denominator() > 0 {
        Some(f64::from(r.numerator()) / f64::from(r.denominator()))
    } else {
        None
    }
}

/// Copy an RGB24 frame into a tightly packed image, dropping row padding.
fn extract_rgb(frame: &Video) -> Result<RgbImage, VideoError> {
    let (width, height) = (frame.width(), frame.height());
    let data = frame.data(0);
    let stride = frame.stride(0);
    let row_len = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        let row = data
            .get(start..start + row_len)
            .ok_or_else(|| VideoError::Decode("frame row out of bounds".to_string()))?;
        pixels.extend_from_slice(row);
    }

    RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| VideoError::Decode("frame buffer size mismatch".to_string()))
}

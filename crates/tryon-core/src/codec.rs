//! Conversions between uploaded image bytes, pixel buffers and the base64
//! JPEG text the remote service exchanges.

use std::io::Cursor;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use crate::error::{Result, TryOnError};

/// JPEG quality used for outgoing payloads.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Decodes any supported image container into an 8-bit RGB buffer.
pub fn decode(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(TryOnError::Decode("empty image data".into()));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| TryOnError::Decode(e.to_string()))?;

    Ok(img.to_rgb8())
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    if img.width() == 0 || img.height() == 0 {
        return Err(TryOnError::Encode(format!(
            "cannot encode {}x{} image",
            img.width(),
            img.height()
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .encode_image(img)
        .map_err(|e| TryOnError::Encode(e.to_string()))?;

    Ok(buf.into_inner())
}

pub fn encode_to_payload(img: &RgbImage) -> Result<String> {
    encode_to_payload_with_quality(img, DEFAULT_JPEG_QUALITY)
}

pub fn encode_to_payload_with_quality(img: &RgbImage, quality: u8) -> Result<String> {
    let jpeg = encode_jpeg(img, quality)?;
    Ok(BASE64.encode(jpeg))
}

/// Inverse of [`encode_to_payload`]. Accepts an optional `data:` URI prefix
/// and embedded whitespace.
pub fn decode_payload(payload: &str) -> Result<RgbImage> {
    let trimmed = payload.trim();
    let data = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| TryOnError::Decode(format!("invalid base64 payload: {e}")))?;

    decode(&bytes)
}

/// Runs CPU-bound image work on the blocking pool so the async runtime keeps
/// serving other runs. A panicked task is reported through `on_panic`.
pub(crate) async fn offload<T, F>(work: F, on_panic: fn(String) -> TryOnError) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| on_panic(format!("image task panicked: {e}")))?
}

/// [`decode`] on the blocking pool.
pub async fn decode_async<B>(bytes: B) -> Result<RgbImage>
where
    B: AsRef<[u8]> + Send + 'static,
{
    offload(move || decode(bytes.as_ref()), TryOnError::Decode).await
}

/// [`encode_to_payload`] on the blocking pool.
pub async fn encode_to_payload_async(img: RgbImage) -> Result<String> {
    offload(move || encode_to_payload(&img), TryOnError::Encode).await
}

/// Swaps the first and third channel of every pixel (RGB <-> BGR).
///
/// The remote returns its result in the opposite channel order from the one
/// it expects on input, so this runs on the final image only.
pub fn swap_channels(img: &mut RgbImage) {
    for pixel in img.pixels_mut() {
        pixel.0.swap(0, 2);
    }
}

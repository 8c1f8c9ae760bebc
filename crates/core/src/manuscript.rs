// Manuscript image preparation
//
// Images above the size limit are scaled down in steps until the encoded
// result fits. Anything that cannot be decoded or shrunk is passed on as-is.

use crate::types::ManuscriptImage;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Largest image returned without resizing (1 MiB)
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

const RESIZE_FACTOR: f64 = 0.8;
const MAX_RESIZE_ATTEMPTS: u32 = 5;
const JPEG_QUALITY: u8 = 85;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
const DEFAULT_FILENAME: &str = "manuscript.jpg";

/// Outcome of [`shrink_to_limit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shrunk {
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, which differs from the input after a JPEG re-encode
    pub mime_type: String,
    pub was_resized: bool,
}

/// Pick the MIME type to report for a downloaded image
pub fn normalize_mime(content_type: Option<&str>) -> String {
    let essence = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if essence.starts_with("image/") {
        essence
    } else {
        DEFAULT_MIME_TYPE.to_string()
    }
}

/// Last path component of `url`, or a generic name when it has no extension
pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(name) if name.contains('.') => name.to_string(),
        _ => DEFAULT_FILENAME.to_string(),
    }
}

fn output_format(mime_type: &str) -> ImageFormat {
    match mime_type {
        "image/png" => ImageFormat::Png,
        "image/webp" => ImageFormat::WebP,
        _ => ImageFormat::Jpeg,
    }
}

fn format_mime(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::WebP => "image/webp",
        _ => DEFAULT_MIME_TYPE,
    }
}

fn encode(image: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))?;
        }
        ImageFormat::WebP => {
            let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
            rgba.write_to(&mut Cursor::new(&mut buffer), format)?;
        }
        _ => image.write_to(&mut Cursor::new(&mut buffer), format)?,
    }
    Ok(buffer)
}

fn try_shrink(bytes: &[u8], mime_type: &str, limit: usize) -> image::ImageResult<Option<Vec<u8>>> {
    let original = image::load_from_memory(bytes)?;
    let format = output_format(mime_type);
    let mut factor = RESIZE_FACTOR;

    for attempt in 1..=MAX_RESIZE_ATTEMPTS {
        let width = ((f64::from(original.width()) * factor) as u32).max(1);
        let height = ((f64::from(original.height()) * factor) as u32).max(1);

        let resized = original.resize_exact(width, height, FilterType::Lanczos3);
        let encoded = encode(&resized, format)?;

        tracing::debug!(
            attempt,
            width,
            height,
            size = encoded.len(),
            "Resized manuscript image"
        );

        if encoded.len() <= limit {
            return Ok(Some(encoded));
        }
        factor *= RESIZE_FACTOR;
    }

    Ok(None)
}

/// Scale an image down until its encoding is at most `limit` bytes
pub fn shrink_to_limit(bytes: Vec<u8>, mime_type: &str, limit: usize) -> Shrunk {
    let unchanged = |bytes| Shrunk {
        bytes,
        mime_type: mime_type.to_string(),
        was_resized: false,
    };

    if bytes.len() <= limit {
        return unchanged(bytes);
    }

    match try_shrink(&bytes, mime_type, limit) {
        Ok(Some(resized)) => Shrunk {
            bytes: resized,
            mime_type: format_mime(output_format(mime_type)).to_string(),
            was_resized: true,
        },
        Ok(None) => {
            tracing::warn!(
                limit,
                attempts = MAX_RESIZE_ATTEMPTS,
                "Could not shrink image below limit, returning original"
            );
            unchanged(bytes)
        }
        Err(e) => {
            tracing::error!(error = %e, "Image resize failed, returning original");
            unchanged(bytes)
        }
    }
}

/// Format a byte count with thousands separators
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl ManuscriptImage {
    pub fn new(
        source_url: &str,
        title: Option<&str>,
        original_size: usize,
        shrunk: Shrunk,
    ) -> Self {
        let filename = filename_from_url(source_url);
        let size = shrunk.bytes.len();

        let mut title = match title {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => format!("Manuscript: {}", filename),
        };
        if shrunk.was_resized {
            title.push_str(&format!(
                " (resized from {} to {} bytes)",
                group_thousands(original_size),
                group_thousands(size)
            ));
        }

        Self {
            image_data: base64::engine::general_purpose::STANDARD.encode(&shrunk.bytes),
            mime_type: shrunk.mime_type,
            size,
            original_size,
            was_resized: shrunk.was_resized,
            filename,
            title,
            source_url: source_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn noisy_png(side: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(side, side, |x, y| {
            let mut h = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
            h ^= h >> 13;
            h = h.wrapping_mul(0x5bd1_e995);
            h ^= h >> 15;
            Rgb([h as u8, (h >> 8) as u8, (h >> 16) as u8])
        });
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_small_image_untouched() {
        let bytes = vec![1, 2, 3];
        let shrunk = shrink_to_limit(bytes.clone(), "image/png", MAX_IMAGE_BYTES);
        assert_eq!(shrunk.bytes, bytes);
        assert!(!shrunk.was_resized);
    }

    #[test]
    fn test_large_image_is_shrunk() {
        let png = noisy_png(256);
        let limit = png.len() * 3 / 4;

        let shrunk = shrink_to_limit(png.clone(), "image/png", limit);

        assert!(shrunk.was_resized);
        assert!(shrunk.bytes.len() <= limit);
        let decoded = image::load_from_memory(&shrunk.bytes).unwrap();
        assert!(decoded.width() < 256);
    }

    #[test]
    fn test_jpeg_output_for_unknown_mime() {
        let png = noisy_png(128);
        let limit = png.len() - 1;

        let shrunk = shrink_to_limit(png, "image/tiff", limit);

        assert!(shrunk.was_resized);
        assert_eq!(image::guess_format(&shrunk.bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(shrunk.mime_type, "image/jpeg");
    }

    #[test]
    fn test_resized_gif_is_labelled_jpeg() {
        let png = noisy_png(300);
        let mut gif = Vec::new();
        image::load_from_memory(&png)
            .unwrap()
            .write_to(&mut Cursor::new(&mut gif), ImageFormat::Gif)
            .unwrap();
        let limit = gif.len() / 2;

        let shrunk = shrink_to_limit(gif.clone(), "image/gif", limit);
        assert!(shrunk.was_resized);

        let image = ManuscriptImage::new("https://example.org/leaf.gif", None, gif.len(), shrunk);
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&image.image_data)
            .unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_unresized_image_keeps_mime() {
        let shrunk = shrink_to_limit(vec![1, 2, 3], "image/gif", MAX_IMAGE_BYTES);
        assert_eq!(shrunk.mime_type, "image/gif");

        let png = noisy_png(128);
        let shrunk = shrink_to_limit(png.clone(), "image/png", png.len() - 1);
        assert!(shrunk.was_resized);
        assert_eq!(shrunk.mime_type, "image/png");
    }

    #[test]
    fn test_undecodable_image_returned_as_is() {
        let garbage = vec![0u8; 64];
        let shrunk = shrink_to_limit(garbage.clone(), "image/jpeg", 16);
        assert_eq!(shrunk.bytes, garbage);
        assert!(!shrunk.was_resized);
    }

    #[test]
    fn test_normalize_mime() {
        assert_eq!(normalize_mime(Some("image/png")), "image/png");
        assert_eq!(normalize_mime(Some("image/webp; q=1")), "image/webp");
        assert_eq!(normalize_mime(Some("text/html")), "image/jpeg");
        assert_eq!(normalize_mime(None), "image/jpeg");
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://manuscripts.sefaria.org/vatican/ebr_30_014v.jpg"),
            "ebr_30_014v.jpg"
        );
        assert_eq!(filename_from_url("https://example.org/images/"), "manuscript.jpg");
        assert_eq!(filename_from_url("https://example.org/iiif/full"), "manuscript.jpg");
        assert_eq!(filename_from_url("https://example.org/a/b.png?size=2"), "b.png");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1048576), "1,048,576");
    }

    #[test]
    fn test_manuscript_image_title() {
        let shrunk = Shrunk {
            bytes: vec![0; 2000],
            mime_type: "image/jpeg".to_string(),
            was_resized: true,
        };
        let image = ManuscriptImage::new(
            "https://example.org/leaf.jpg",
            None,
            1_500_000,
            shrunk,
        );

        assert_eq!(image.filename, "leaf.jpg");
        assert_eq!(
            image.title,
            "Manuscript: leaf.jpg (resized from 1,500,000 to 2,000 bytes)"
        );
        assert_eq!(image.size, 2000);
        assert!(!image.image_data.is_empty());
    }
}

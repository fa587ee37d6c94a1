use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, TextureHandle, TextureId, Vec2};

use crate::pending::{self, Pending};

/// Largest remote image body accepted.
const MAX_REMOTE_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

/// A loaded texture and its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub texture: TextureId,
    pub size: Vec2,
}

/// What a call to [`ImageSlot::poll`] observed.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    Idle,
    Loaded,
    Failed(String),
}

/// An image that loads in the background and becomes a texture once.
pub enum ImageSlot {
    Empty,
    Loading {
        name: String,
        job: Pending<Result<ColorImage>>,
    },
    Ready(TextureHandle),
    Failed(String),
}

impl std::fmt::Debug for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Loading { name, .. } => write!(f, "Loading({name})"),
            Self::Ready(handle) => write!(f, "Ready({:?})", handle.id()),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
        }
    }
}

impl ImageSlot {
    /// Start loading `source`, a file path or an `http(s)://` URL.
    pub fn load(ctx: &egui::Context, source: &str) -> Self {
        let name = source.to_string();
        let owned = name.clone();
        tracing::debug!("loading image {name}");
        let job = pending::spawn(Some(ctx.clone()), move || decode_image(&read_source(&owned)?));
        Self::Loading { name, job }
    }

    /// Advance a loading slot. Returns [`SlotEvent::Loaded`] or
    /// [`SlotEvent::Failed`] exactly once per image.
    pub fn poll(&mut self, ctx: &egui::Context) -> SlotEvent {
        let Self::Loading { name, job } = self else {
            return SlotEvent::Idle;
        };
        let Some(result) = job.try_take() else {
            if job.is_done() {
                let msg = format!("loading {name} was interrupted");
                *self = Self::Failed(msg.clone());
                return SlotEvent::Failed(msg);
            }
            return SlotEvent::Idle;
        };
        match result {
            Ok(image) => {
                let handle = ctx.load_texture(name.as_str(), image, egui::TextureOptions::LINEAR);
                tracing::debug!("loaded image {name} {:?}", handle.size());
                *self = Self::Ready(handle);
                SlotEvent::Loaded
            }
            Err(e) => {
                let msg = format!("{e:#}");
                tracing::warn!("{msg}");
                *self = Self::Failed(msg.clone());
                SlotEvent::Failed(msg)
            }
        }
    }

    pub fn backdrop(&self) -> Option<Backdrop> {
        match self {
            Self::Ready(handle) => Some(Backdrop {
                texture: handle.id(),
                size: handle.size_vec2(),
            }),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read raw image bytes from disk or over HTTP.
pub fn read_source(source: &str) -> Result<Vec<u8>> {
    if is_remote(source) {
        let mut response =
            ureq::get(source).call().with_context(|| format!("Failed to fetch {source}"))?;
        response
            .body_mut()
            .with_config()
            .limit(MAX_REMOTE_IMAGE_BYTES)
            .read_to_vec()
            .with_context(|| format!("Failed to read body of {source}"))
    } else {
        std::fs::read(Path::new(source)).with_context(|| format!("Failed to read {source}"))
    }
}

/// Decode an encoded image into an egui color image.
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage> {
    let image = image::load_from_memory(bytes)
        .context("Failed to decode image")?
        .into_rgba8();
    let (w, h) = image.dimensions();
    Ok(ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        image.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_keeps_dimensions() {
        let image = decode_image(&png_bytes(7, 3)).unwrap();
        assert_eq!(image.size, [7, 3]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_source("definitely/not/here.jpg").unwrap_err();
        assert!(format!("{err:#}").contains("definitely/not/here.jpg"));
    }

    #[test]
    fn urls_are_remote() {
        assert!(is_remote("https://example.org/map.jpg"));
        assert!(!is_remote("./campus_map.jpg"));
    }
}

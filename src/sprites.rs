//! Arena sprites: download an image URL and keep a small thumbnail in memory.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use reqwest::Client;
use tracing::{debug, warn};

const THUMB_W: u32 = 48;
const THUMB_H: u32 = 48;

/// Alpha below this is drawn as empty background.
const ALPHA_CUTOFF: u8 = 128;

/// Compact RGBA thumbnail stored in the in-memory cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteThumb {
    pub w: u32,
    pub h: u32,
    /// RGBA pixels in row-major order (len = w*h*4)
    pub pixels: Vec<u8>,
}

/// A rendered cell colour, `None` for transparent pixels.
pub type Pixel = Option<(u8, u8, u8)>;

impl SpriteThumb {
    fn from_image(img: &RgbaImage) -> Self {
        let small = image::imageops::resize(img, THUMB_W, THUMB_H, FilterType::Lanczos3);
        Self {
            w: small.width(),
            h: small.height(),
            pixels: small.into_raw(),
        }
    }

    fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.w, self.h, self.pixels.clone())
    }

    /// Pixel rows sized `w` x `h`, resampled from the thumbnail when needed.
    pub fn rows(&self, w: u32, h: u32) -> Vec<Vec<Pixel>> {
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let Some(thumb) = self.to_image() else {
            return Vec::new();
        };
        let img = if thumb.width() == w && thumb.height() == h {
            thumb
        } else {
            image::imageops::resize(&thumb, w, h, FilterType::Triangle)
        };

        (0..img.height())
            .map(|y| {
                (0..img.width())
                    .map(|x| {
                        let p = img.get_pixel(x, y);
                        if p[3] < ALPHA_CUTOFF {
                            None
                        } else {
                            Some((p[0], p[1], p[2]))
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Decode any image format the `image` crate understands into a thumbnail.
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteThumb> {
    let img = image::load_from_memory(bytes).context("Failed to decode sprite")?;
    Ok(SpriteThumb::from_image(&img.to_rgba8()))
}

pub async fn fetch_sprite(client: &Client, url: &str) -> Result<SpriteThumb> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;
    if !resp.status().is_success() {
        anyhow::bail!("sprite request failed: {}", resp.status());
    }
    let bytes = resp.bytes().await.context("Failed to read sprite body")?;
    decode_sprite(&bytes)
}

/// Sprites by image URL, shared between the UI and download tasks.
#[derive(Debug, Clone, Default)]
pub struct SpriteCache {
    inner: Arc<Mutex<CacheState>>,
}

#[derive(Debug, Default)]
struct CacheState {
    ready: HashMap<String, SpriteThumb>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl SpriteCache {
    pub fn get(&self, url: &str) -> Option<SpriteThumb> {
        self.inner.lock().ok()?.ready.get(url).cloned()
    }

    /// Mark `url` as requested; true if the caller should start a download.
    pub fn claim(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        let Ok(mut state) = self.inner.lock() else {
            return false;
        };
        if state.ready.contains_key(url) || state.failed.contains(url) {
            return false;
        }
        state.pending.insert(url.to_string())
    }

    pub fn insert(&self, url: &str, thumb: SpriteThumb) {
        if let Ok(mut state) = self.inner.lock() {
            state.pending.remove(url);
            state.ready.insert(url.to_string(), thumb);
        }
    }

    pub fn mark_failed(&self, url: &str) {
        if let Ok(mut state) = self.inner.lock() {
            state.pending.remove(url);
            state.failed.insert(url.to_string());
        }
    }

    /// Download `url` in the background unless it is cached or in flight.
    pub fn request(&self, client: &Client, url: &str) {
        if !self.claim(url) {
            return;
        }
        let cache = self.clone();
        let client = client.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            match fetch_sprite(&client, &url).await {
                Ok(thumb) => {
                    debug!(%url, "sprite cached");
                    cache.insert(&url, thumb);
                }
                Err(e) => {
                    warn!(%url, "sprite unavailable: {:#}", e);
                    cache.mark_failed(&url);
                }
            }
        });
    }
}

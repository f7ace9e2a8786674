use std::future::Future;
use std::sync::Arc;

use futures_util::stream::{FuturesOrdered, StreamExt};
use textlift_core::{InputItem, PreviewImage, SelectionGeneration};
use textlift_logging::lift_debug;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub const DEFAULT_PREVIEW_MAX_SIDE: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Longest side of a thumbnail, in pixels.
    pub max_side: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_side: DEFAULT_PREVIEW_MAX_SIDE,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("preview task failed: {0}")]
    Task(String),
}

pub trait PreviewSink: Send + Sync {
    fn preview_ready(&self, generation: SelectionGeneration, preview: PreviewImage);
}

/// Decode one item into an RGBA thumbnail, keeping the aspect ratio.
/// Images already within `max_side` are not upscaled.
pub fn decode_preview(
    item: &InputItem,
    settings: PreviewSettings,
) -> Result<PreviewImage, PreviewError> {
    let max_side = settings.max_side.max(1);
    let decoded = image::load_from_memory(&item.bytes)?;
    let decoded = if decoded.width() > max_side || decoded.height() > max_side {
        decoded.thumbnail(max_side, max_side)
    } else {
        decoded
    };
    let thumbnail = decoded.to_rgba8();
    Ok(PreviewImage {
        name: item.name.clone(),
        width: thumbnail.width(),
        height: thumbnail.height(),
        rgba: thumbnail.into_raw().into(),
    })
}

/// Decode all items concurrently. Items that fail to decode are skipped;
/// the rest keep selection order.
pub async fn render_previews(items: Vec<InputItem>, settings: PreviewSettings) -> Vec<PreviewImage> {
    let mut decodes = preview_stream(items, settings);
    let mut previews = Vec::new();
    while let Some(decoded) = decodes.next().await {
        previews.extend(decoded);
    }
    previews
}

/// Fire-and-forget variant: each preview is handed to `sink` as soon as it
/// and every earlier item are done.
pub fn spawn_previews(
    runtime: &Handle,
    generation: SelectionGeneration,
    items: Vec<InputItem>,
    settings: PreviewSettings,
    sink: Arc<dyn PreviewSink>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        let mut decodes = preview_stream(items, settings);
        while let Some(decoded) = decodes.next().await {
            if let Some(preview) = decoded {
                sink.preview_ready(generation, preview);
            }
        }
    })
}

fn preview_stream(
    items: Vec<InputItem>,
    settings: PreviewSettings,
) -> FuturesOrdered<impl Future<Output = Option<PreviewImage>>> {
    items
        .into_iter()
        .map(|item| decode_in_background(item, settings))
        .collect()
}

async fn decode_in_background(item: InputItem, settings: PreviewSettings) -> Option<PreviewImage> {
    let name = item.name.clone();
    let result = tokio::task::spawn_blocking(move || decode_preview(&item, settings))
        .await
        .map_err(|err| PreviewError::Task(err.to_string()))
        .and_then(|decoded| decoded);
    match result {
        Ok(preview) => Some(preview),
        Err(err) => {
            lift_debug!("Preview skipped for {}: {}", name, err);
            None
        }
    }
}

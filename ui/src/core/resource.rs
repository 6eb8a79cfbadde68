//! Displayable image handles.
//!
//! Visualizations arrive as raw bytes and are turned into something an `img`
//! tag can point at. In the browser that is an object URL, which must be
//! revoked once nothing shows it any more; native webviews get a data URL.
//! [`ImageResource`] ties that release to `Drop`, so replacing or clearing an
//! artifact in the session is enough to free it.

use std::{cell::Cell, fmt, rc::Rc};

use api::ImagePayload;
use base64::Engine as _;

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// Encodes bytes as a `data:` URL.
pub fn data_url(bytes: &[u8], mime: &str) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// The image the user picked, plus an inline preview that stays valid for the
/// lifetime of the page (it is also embedded into exported reports).
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub payload: ImagePayload,
    pub preview: String,
}

impl UploadedImage {
    /// `None` for empty files.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        let payload = ImagePayload::new(file_name, bytes);
        let preview = data_url(&payload.bytes, &payload.mime);
        Some(Self { payload, preview })
    }

    pub fn file_name(&self) -> &str {
        &self.payload.file_name
    }
}

/// Shared handle to a displayable URL; the URL is released with the last clone.
#[derive(Clone)]
pub struct ImageResource {
    inner: Rc<ResourceUrl>,
}

struct ResourceUrl {
    url: String,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    revoke: bool,
}

impl ImageResource {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, String> {
        if bytes.is_empty() {
            return Err("empty image".into());
        }
        let (url, revoke) = platform_url(bytes, mime)?;
        LIVE.with(|live| live.set(live.get() + 1));
        Ok(Self {
            inner: Rc::new(ResourceUrl { url, revoke }),
        })
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Resources created on this thread that have not been released yet.
    pub fn live_count() -> usize {
        LIVE.with(Cell::get)
    }
}

impl PartialEq for ImageResource {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.inner.url.chars().take(32).collect();
        f.debug_struct("ImageResource")
            .field("url", &preview)
            .finish()
    }
}

impl Drop for ResourceUrl {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.revoke {
                web_sys::Url::revoke_object_url(&self.url).ok();
            }
        }
        LIVE.with(|live| live.set(live.get().saturating_sub(1)));
    }
}

#[cfg(target_arch = "wasm32")]
fn platform_url(bytes: &[u8], mime: &str) -> Result<(String, bool), String> {
    use web_sys::{Blob, BlobPropertyBag, Url};

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let mut opts = BlobPropertyBag::new();
    opts.type_(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(|_| "Failed to create blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create object URL".to_string())?;
    Ok((url, true))
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_url(bytes: &[u8], mime: &str) -> Result<(String, bool), String> {
    Ok((data_url(bytes, mime), false))
}

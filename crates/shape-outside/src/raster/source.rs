//! Image fetching and decoding for raster shapes.

use crate::error::{Result, ShapeError};
use crate::geom::Size;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;
use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::PathBuf;

/// Asynchronous byte source for shape images, keyed by URL.
pub trait ImageSource {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<u8>>>;
}

/// Resolves URLs as paths relative to a base directory.
///
/// Each fetch reads the file on its own thread, so the returned future never
/// blocks the executor polling it.
#[derive(Clone, Debug, Default)]
pub struct FileImageSource {
    base: PathBuf,
}

impl FileImageSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ImageSource for FileImageSource {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<u8>>> {
        let path = self.base.join(url);
        let url = url.to_owned();
        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            // The receiver may have been dropped; nothing to report then.
            let _ = tx.send(std::fs::read(&path));
        });
        async move {
            let read = rx.await.unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Interrupted, "image reader thread exited"))
            });
            read.map_err(|source| ShapeError::ImageFetch { url, source })
        }
        .boxed()
    }
}

/// Decode `bytes` and resample to the reference box size (rounded to whole pixels).
pub fn decode_rgba(bytes: &[u8], box_size: Size) -> Result<RgbaImage> {
    let (w, h) = (box_size.width.round(), box_size.height.round());
    if !(w >= 1.0 && h >= 1.0) {
        return Err(ShapeError::InvalidParams(format!(
            "shape image needs a non-empty reference box, got {}x{}",
            box_size.width, box_size.height
        )));
    }
    let (w, h) = (w as u32, h as u32);
    let img = image::load_from_memory(bytes)?.to_rgba8();
    if img.dimensions() == (w, h) {
        return Ok(img);
    }
    Ok(image::imageops::resize(&img, w, h, FilterType::Triangle))
}

//! Loading of image sources

use crate::codec;
use crate::error::Error;
use crate::error::Result;

use futures::future;
use futures::future::FutureExt;
use futures::future::LocalBoxFuture;

use std::path::PathBuf;

/// Fetches the encoded bytes of an image source
///
/// Loading may suspend; everything runs on a single thread, so the
///   returned future need not be `Send`.
pub trait ResourceLoader {
    /// Load the encoded bytes behind `source`
    fn load(&self, source: &str) -> LocalBoxFuture<'static, Result<Vec<u8>>>;
}

impl<'a, L> ResourceLoader for &'a L where L: ResourceLoader + ?Sized {
    fn load(&self, source: &str) -> LocalBoxFuture<'static, Result<Vec<u8>>> {
        (**self).load(source)
    }
}

/// Loader for `data:` URLs and files on disk
///
/// Relative paths are resolved against `base`, if set.
#[derive(Debug,Default,Clone)]
pub struct DefaultLoader {
    pub base: Option<PathBuf>,
}

impl DefaultLoader {
    /// Loader resolving relative paths against the current directory
    pub fn new() -> Self {
        Self::default()
    }
    /// Loader resolving relative paths against `base`
    pub fn with_base<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: Some(base.into()) }
    }
    /// Load synchronously
    pub fn load_now(&self, source: &str) -> Result<Vec<u8>> {
        if codec::is_data_url(source) {
            return codec::parse_data_url(source);
        }
        let path = match &self.base {
            Some(base) => base.join(source),
            None => PathBuf::from(source),
        };
        std::fs::read(&path).map_err(|e| Error::Load {
            source_ref: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl ResourceLoader for DefaultLoader {
    fn load(&self, source: &str) -> LocalBoxFuture<'static, Result<Vec<u8>>> {
        future::ready(self.load_now(source)).boxed_local()
    }
}

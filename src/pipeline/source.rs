//! Interface to the external text-extraction engine.

use crate::error::{Error, Result};
use crate::layout::{Fragment, PageFragments};

use super::chunk_stream::{ChunkStream, ChunkStreamBuilder};

/// Anything that can hand over positioned fragments page by page.
///
/// Implementations wrap a real extraction engine. Page numbers are
/// 1-indexed and the total is known before any page is requested.
pub trait FragmentSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Fragments of one page, in engine order.
    fn page_fragments(&self, page_number: u32) -> Result<Vec<Fragment>>;
}

/// Pull every page from `source` into an ordered stream.
pub fn read_source<S: FragmentSource + ?Sized>(source: &S) -> Result<ChunkStream> {
    let total = source.page_count();
    let mut builder = ChunkStreamBuilder::new(total);
    for n in 1..=total {
        let fragments = source.page_fragments(n)?;
        builder.add_page(PageFragments::new(n, fragments))?;
    }
    builder.finish()
}

/// A fragment source backed by pages already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<Fragment>>,
}

impl MemorySource {
    /// Create a source from pages in page order.
    pub fn new(pages: Vec<Vec<Fragment>>) -> Self {
        Self { pages }
    }

    /// Load pages from a JSON array of arrays of `{text, x, y}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl FragmentSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_fragments(&self, page_number: u32) -> Result<Vec<Fragment>> {
        page_number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or_else(|| Error::Source {
                page: page_number,
                message: "no such page".to_string(),
            })
    }
}

//! Page-ordered chunk stream assembly.
//!
//! Pages may be extracted concurrently and finish in any order. The builder
//! buffers each page as it arrives and only yields a stream once every page
//! is present, so chunks from page N always precede chunks from page N + 1.

use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

use crate::error::{Error, Result};
use crate::layout::{Fragment, PageFragments};

use super::line_join::assemble_page_text;

/// Buffers per-page fragments until the whole document is available.
#[derive(Debug)]
pub struct ChunkStreamBuilder {
    total_pages: u32,
    pages: BTreeMap<u32, Vec<Fragment>>,
}

impl ChunkStreamBuilder {
    /// Create a builder expecting `total_pages` pages numbered from 1.
    pub fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            pages: BTreeMap::new(),
        }
    }

    /// Record the fragments of one page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PageOutOfRange`] for a page outside `1..=total_pages`
    /// and [`Error::DuplicatePage`] if the page was already delivered.
    pub fn add_page(&mut self, page: PageFragments) -> Result<()> {
        let n = page.page_number;
        if n == 0 || n > self.total_pages {
            return Err(Error::PageOutOfRange {
                page: n,
                total: self.total_pages,
            });
        }
        if self.pages.contains_key(&n) {
            return Err(Error::DuplicatePage(n));
        }

        log::debug!(
            "Page {} arrived with {} fragments ({}/{})",
            n,
            page.fragments.len(),
            self.pages.len() + 1,
            self.total_pages
        );
        self.pages.insert(n, page.fragments);
        Ok(())
    }

    /// Pages received so far and the total expected.
    pub fn progress(&self) -> (u32, u32) {
        (self.pages.len() as u32, self.total_pages)
    }

    /// True once every page has been delivered.
    pub fn is_complete(&self) -> bool {
        self.pages.len() as u32 == self.total_pages
    }

    /// Produce the ordered stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompletePages`] if any page is still missing.
    pub fn finish(self) -> Result<ChunkStream> {
        if !self.is_complete() {
            let (received, total) = self.progress();
            return Err(Error::IncompletePages { received, total });
        }
        // BTreeMap iterates in ascending page order.
        Ok(ChunkStream {
            pages: self.pages.into_values().collect(),
        })
    }

    /// Drain a channel of pages until the document is complete.
    ///
    /// Extraction workers send [`PageFragments`] in whatever order they
    /// finish. Blocks until every page has arrived.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompletePages`] if all senders hang up early, or
    /// any error from [`add_page`](Self::add_page).
    pub fn collect_from(total_pages: u32, receiver: Receiver<PageFragments>) -> Result<ChunkStream> {
        let mut builder = Self::new(total_pages);
        while !builder.is_complete() {
            match receiver.recv() {
                Ok(page) => builder.add_page(page)?,
                Err(_) => {
                    let (received, total) = builder.progress();
                    log::warn!("Fragment channel closed after {}/{} pages", received, total);
                    return Err(Error::IncompletePages { received, total });
                },
            }
        }
        builder.finish()
    }
}

/// A whole document's fragments in page order.
#[derive(Debug, Clone, Default)]
pub struct ChunkStream {
    pages: Vec<Vec<Fragment>>,
}

impl ChunkStream {
    /// Build a stream directly from chunk strings, all on one page.
    pub fn from_chunks<S: AsRef<str>>(chunks: &[S]) -> Self {
        Self {
            pages: vec![PageFragments::from_lines(1, chunks).fragments],
        }
    }

    /// Number of pages in the stream.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Raw chunks in reading order: one per fragment, unmodified.
    pub fn chunks(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flatten().map(|f| f.text.as_str())
    }

    /// Assembled page text, pages concatenated in order.
    pub fn text(&self) -> String {
        self.pages.iter().map(|p| assemble_page_text(p)).collect()
    }
}

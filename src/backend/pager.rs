use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use super::page::{Page, PAGE_SIZE};

/// Upper bound on resident page slots. One past this index is fatal, per the design's off-by-one
/// fix to the original source's `page_num > TABLE_MAX_PAGES` bounds check.
pub const TABLE_MAX_PAGES: usize = 100;

#[derive(Error, Debug)]
pub enum PagerError {
    #[error("could not open database file: {0}")]
    Open(#[source] std::io::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("db file is not a whole number of pages ({length} bytes). corrupt file.")]
    CorruptFile { length: u64 },
    #[error("page number {0} out of range (max {TABLE_MAX_PAGES})")]
    PageNumberOutOfRange(u32),
    #[error("tried to flush unresident page {0}")]
    FlushUnresidentPage(u32),
}

/// Owns the backing file and the in-memory page cache; the sole subsystem that performs I/O.
pub struct Pager {
    file: File,
    file_length: u64,
    num_pages: u32,
    pages: Box<[Option<Box<Page>>; TABLE_MAX_PAGES]>,
}

impl Pager {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagerError> {
        let mut open_options = OpenOptions::new();
        open_options.read(true).write(true).create(true);
        #[cfg(unix)]
        open_options.mode(0o600);
        let mut file = open_options.open(path).map_err(PagerError::Open)?;

        let file_length = file.seek(SeekFrom::End(0))?;
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(PagerError::CorruptFile { length: file_length });
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        debug!(file_length, num_pages, "opened pager");

        const NONE_PAGE: Option<Box<Page>> = None;
        Ok(Self {
            file,
            file_length,
            num_pages,
            pages: Box::new([NONE_PAGE; TABLE_MAX_PAGES]),
        })
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Returns the buffer for page `n`, loading it from disk on first demand.
    ///
    /// A short read at EOF is permitted; the remainder of a newly allocated buffer stays zeroed.
    #[instrument(skip(self), level = "trace")]
    pub fn get_page(&mut self, n: u32) -> Result<&mut Page, PagerError> {
        if n as usize >= TABLE_MAX_PAGES {
            return Err(PagerError::PageNumberOutOfRange(n));
        }

        if self.pages[n as usize].is_none() {
            trace!(page = n, "cache miss, loading from disk");
            let mut buf = Box::new([0u8; PAGE_SIZE]);
            let num_pages_on_disk = self.file_length.div_ceil(PAGE_SIZE as u64);
            if (n as u64) < num_pages_on_disk {
                self.file.seek(SeekFrom::Start(n as u64 * PAGE_SIZE as u64))?;
                read_partial(&mut self.file, &mut buf[..])?;
            }
            self.pages[n as usize] = Some(buf);
            if n >= self.num_pages {
                self.num_pages = n + 1;
            }
        }

        Ok(self.pages[n as usize].as_mut().unwrap())
    }

    /// Writes the resident buffer for page `n` back to disk. The slot must be occupied.
    #[instrument(skip(self), level = "trace")]
    pub fn flush(&mut self, n: u32) -> Result<(), PagerError> {
        let page = self.pages[n as usize]
            .as_deref()
            .ok_or(PagerError::FlushUnresidentPage(n))?;
        self.file.seek(SeekFrom::Start(n as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page)?;
        Ok(())
    }

    /// Flushes every occupied slot, then releases its buffer and closes the file handle.
    #[instrument(skip(self))]
    pub fn close(mut self) -> Result<(), PagerError> {
        for n in 0..self.num_pages {
            if self.pages[n as usize].is_some() {
                self.flush(n)?;
                self.pages[n as usize] = None;
            }
        }
        self.file.flush()?;
        debug!(num_pages = self.num_pages, "pager closed");
        Ok(())
    }
}

/// Reads up to `buf.len()` bytes, leaving any unfilled tail untouched rather than erroring at
/// EOF (mirrors `Read::read`'s short-read contract instead of `read_exact`'s all-or-nothing one).
fn read_partial(file: &mut File, buf: &mut [u8]) -> std::io::Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(())
}

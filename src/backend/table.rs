use std::path::Path;

use thiserror::Error;
use tracing::instrument;

use super::page::{self, initialize_as_leaf, PageError};
use super::pager::{Pager, PagerError};

/// Index of the root page. Always 0 in the current single-leaf design; kept as a named constant
/// so a future multi-page tree only has to change how it is computed, not every call site.
pub const ROOT_PAGE_NUM: u32 = 0;

#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Pager(#[from] PagerError),
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Binds a [`Pager`] to a root page index, materializing an empty leaf root on a new file.
pub struct Table {
    pub(super) pager: Pager,
    pub root_page_num: u32,
}

impl Table {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let mut pager = Pager::open(path)?;

        if pager.num_pages() == 0 {
            let root = pager.get_page(ROOT_PAGE_NUM)?;
            initialize_as_leaf(root);
        }

        Ok(Self {
            pager,
            root_page_num: ROOT_PAGE_NUM,
        })
    }

    /// Number of occupied cells in the root leaf, for the executor's table-full precheck.
    pub fn root_num_cells(&mut self) -> Result<u32, TableError> {
        let root = self.pager.get_page(self.root_page_num)?;
        Ok(page::num_cells(root))
    }

    /// Prints the root leaf in the `.btree` meta-command's format.
    pub fn print_root_leaf(&mut self) -> Result<(), TableError> {
        let root = self.pager.get_page(self.root_page_num)?;
        page::print_leaf_node(root);
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn close(self) -> Result<(), TableError> {
        self.pager.close()?;
        Ok(())
    }
}

use thiserror::Error;

use super::page::{self, PageError};
use super::pager::PagerError;
use super::row::Row;
use super::table::Table;

#[derive(Error, Debug)]
pub enum CursorError {
    #[error(transparent)]
    Pager(#[from] PagerError),
}

/// A transient position within a table's single leaf page.
///
/// Cursors borrow the table mutably for their entire lifetime and are never persisted: every
/// statement execution constructs one, uses it, and lets it drop.
pub struct Cursor<'t> {
    table: &'t mut Table,
    pub page_num: u32,
    pub cell_num: u32,
    pub end_of_table: bool,
}

impl<'t> Cursor<'t> {
    /// Positions at the first row, or past the end immediately if the table is empty.
    pub fn table_start(table: &'t mut Table) -> Result<Self, CursorError> {
        let page_num = table.root_page_num;
        let end_of_table = {
            let page = table.pager.get_page(page_num)?;
            page::num_cells(page) == 0
        };
        Ok(Cursor {
            table,
            page_num,
            cell_num: 0,
            end_of_table,
        })
    }

    /// Positions one past the last row, ready for an append via [`Cursor::insert`].
    pub fn table_end(table: &'t mut Table) -> Result<Self, CursorError> {
        let page_num = table.root_page_num;
        let cell_num = {
            let page = table.pager.get_page(page_num)?;
            page::num_cells(page)
        };
        Ok(Cursor {
            table,
            page_num,
            cell_num,
            end_of_table: true,
        })
    }

    /// Deserializes the row the cursor currently points at.
    pub fn value(&mut self) -> Row {
        let page = self
            .table
            .pager
            .get_page(self.page_num)
            .expect("cursor page is always resident");
        page::row_at(page, self.cell_num)
    }

    /// Moves to the next cell, marking the table exhausted once the last cell is passed.
    pub fn advance(&mut self) {
        self.cell_num += 1;
        let page = self
            .table
            .pager
            .get_page(self.page_num)
            .expect("cursor page is always resident");
        if self.cell_num >= page::num_cells(page) {
            self.end_of_table = true;
        }
    }

    /// Inserts `row` under `key` at the cursor's current cell, shifting later cells right.
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<(), PageError> {
        let page = self
            .table
            .pager
            .get_page(self.page_num)
            .expect("cursor page is always resident");
        page::insert_at(page, self.cell_num, key, row)
    }
}

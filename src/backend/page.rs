use thiserror::Error;
use tracing::instrument;

use super::row::{Row, ROW_SIZE};

/// Fixed size of every page in the database file; the unit of I/O and caching.
pub const PAGE_SIZE: usize = 4096;

/*
 * Common Node Header Layout
 *
 * Every node stores a few bytes of metadata at the start of its page: the node's type, whether
 * it is the tree's root, and a pointer to its parent (unused while the tree is a single leaf).
 */
const NODE_TYPE_SIZE: usize = 1;
const NODE_TYPE_OFFSET: usize = 0;
const IS_ROOT_SIZE: usize = 1;
const IS_ROOT_OFFSET: usize = NODE_TYPE_SIZE;
const PARENT_POINTER_SIZE: usize = 4;
const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

/*
 * Leaf Node Header Layout
 *
 * In addition to the common header, a leaf stores the number of cells it currently holds.
 */
const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

/*
 * Leaf Node Body Layout
 *
 * The body is an array of cells: a 4-byte key (the row's id) followed by the serialized row.
 */
const LEAF_NODE_KEY_SIZE: usize = 4;
const LEAF_NODE_KEY_OFFSET: usize = 0;
const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Discriminator byte at [`NODE_TYPE_OFFSET`]. Only `Leaf` is presently instantiated; `Interior`
/// is reserved for the leaf-splitting extension point noted in the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    Leaf = 0,
    Interior = 1,
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error("leaf page is full ({LEAF_NODE_MAX_CELLS} cells)")]
    Full,
    #[error("cell index {0} out of range (num_cells = {1})")]
    CellIndexOutOfRange(u32, u32),
}

/// A 4 KiB byte region, interpreted as a B-tree leaf: header followed by a cell array.
///
/// This is a thin accessor layer, not an owning type — every function here borrows a page
/// buffer owned by the [`super::pager::Pager`] for the duration of one operation.
pub type Page = [u8; PAGE_SIZE];

/// Zeroes `node_type`/`is_root`/`parent_ptr` are already correct for a freshly zeroed page; this
/// only has to set `num_cells` to 0 and mark the node as a leaf and (for the lone root) as root.
#[instrument(skip(page), level = "trace")]
pub fn initialize_as_leaf(page: &mut Page) {
    page[NODE_TYPE_OFFSET] = NodeType::Leaf as u8;
    page[IS_ROOT_OFFSET] = 1;
    write_u32(page, PARENT_POINTER_OFFSET, 0);
    write_num_cells(page, 0);
}

pub fn node_type(page: &Page) -> NodeType {
    match page[NODE_TYPE_OFFSET] {
        0 => NodeType::Leaf,
        _ => NodeType::Interior,
    }
}

pub fn num_cells(page: &Page) -> u32 {
    read_u32(page, LEAF_NODE_NUM_CELLS_OFFSET)
}

fn write_num_cells(page: &mut Page, value: u32) {
    write_u32(page, LEAF_NODE_NUM_CELLS_OFFSET, value);
}

/// Byte region of a single cell: 4-byte key followed by the 291-byte serialized row.
pub fn cell(page: &Page, cell_num: u32) -> &[u8] {
    let offset = cell_offset(cell_num);
    &page[offset..offset + LEAF_NODE_CELL_SIZE]
}

pub fn key(page: &Page, cell_num: u32) -> u32 {
    let offset = cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET;
    read_u32(page, offset)
}

fn write_key(page: &mut Page, cell_num: u32, key: u32) {
    let offset = cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET;
    write_u32(page, offset, key);
}

/// Byte region of a cell's value: the cell minus its key prefix, exactly [`ROW_SIZE`] bytes.
pub fn value(page: &Page, cell_num: u32) -> &[u8; ROW_SIZE] {
    let offset = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
    page[offset..offset + ROW_SIZE].try_into().unwrap()
}

pub fn row_at(page: &Page, cell_num: u32) -> Row {
    Row::deserialize(value(page, cell_num))
}

/// Shifts cells `[cell_num, num_cells)` rightward by one cell, writes `key`/`row` at `cell_num`,
/// and increments `num_cells`.
///
/// Preconditions: `num_cells(page) < LEAF_NODE_MAX_CELLS` and `cell_num <= num_cells(page)`. The
/// first is the leaf-split extension point (unimplemented, see design notes) and is surfaced as
/// [`PageError::Full`] rather than violated; the second is an internal invariant every caller in
/// this crate upholds by construction (cursor positions never exceed `num_cells`).
#[instrument(skip(page, row), level = "trace")]
pub fn insert_at(page: &mut Page, cell_num: u32, row_key: u32, row: &Row) -> Result<(), PageError> {
    let n = num_cells(page);
    if n as usize >= LEAF_NODE_MAX_CELLS {
        return Err(PageError::Full);
    }
    if cell_num > n {
        return Err(PageError::CellIndexOutOfRange(cell_num, n));
    }

    for i in (cell_num..n).rev() {
        let (from, to) = (cell_offset(i), cell_offset(i + 1));
        let mut buf = [0u8; LEAF_NODE_CELL_SIZE];
        buf.copy_from_slice(&page[from..from + LEAF_NODE_CELL_SIZE]);
        page[to..to + LEAF_NODE_CELL_SIZE].copy_from_slice(&buf);
    }

    write_key(page, cell_num, row_key);
    let value_offset = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
    let mut row_bytes = [0u8; ROW_SIZE];
    row.serialize(&mut row_bytes);
    page[value_offset..value_offset + ROW_SIZE].copy_from_slice(&row_bytes);

    write_num_cells(page, n + 1);
    Ok(())
}

fn cell_offset(cell_num: u32) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE
}

fn read_u32(page: &Page, offset: usize) -> u32 {
    u32::from_ne_bytes(page[offset..offset + 4].try_into().unwrap())
}

fn write_u32(page: &mut Page, offset: usize, value: u32) {
    page[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
}

/// Prints the root leaf in the format consumed by the `.btree` meta-command:
/// `leaf (size N)` followed by one `  - i : key` line per cell, in storage order.
pub fn print_leaf_node(page: &Page) {
    let n = num_cells(page);
    println!("leaf (size {})", n);
    for i in 0..n {
        println!("  - {} : {}", i, key(page, i));
    }
}

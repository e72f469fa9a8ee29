//! Pre-rendered decimal strings for small array indices.
//!
//! Array elements are named "0", "1", "2", ... and building large arrays would otherwise render
//! the same integers over and over. The table is built on first use and never changes afterwards,
//! so shared reads need no locking.

use once_cell::sync::OnceCell;

/// Number of cached entries. Indices `0..NUM_STRS_SIZE` are covered.
pub const NUM_STRS_SIZE: usize = 1024;

static NUM_STRS: OnceCell<NumStrs> = OnceCell::new();

#[derive(Debug)]
pub struct NumStrs {
    strs: Box<[Box<str>]>,
}

impl NumStrs {
    /// Render the full table.
    pub fn build() -> NumStrs {
        let strs = (0..NUM_STRS_SIZE)
            .map(|i| i.to_string().into_boxed_str())
            .collect();
        NumStrs { strs }
    }

    /// The process-wide table, built on the first call.
    pub fn global() -> &'static NumStrs {
        NUM_STRS.get_or_init(NumStrs::build)
    }

    /// True once the process-wide table has been fully built. Never goes back to false.
    pub fn is_ready() -> bool {
        NUM_STRS.get().is_some()
    }

    /// The decimal rendering of `i`, or `None` if `i` is outside the table.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.strs.get(i).map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.strs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strs.is_empty()
    }
}

/// Cached decimal string for `i`, if `i` is small enough to be cached.
pub fn num_str(i: usize) -> Option<&'static str> {
    NumStrs::global().get(i)
}

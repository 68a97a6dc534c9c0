//! Lazy iterator utilities for fx.
//!
//! The centerpiece is [`window`]: incremental key-based windowing of a sorted,
//! possibly unbounded stream ([`WindowDiffs`], [`Windows`]). The other modules
//! are small adapters in the same functional style:
//!
//! - **`slice`**: leading/trailing slices (`take_first`, `drop_last`, ...)
//! - **`uniq`**: adjacent or global duplicate suppression
//! - **`sliding`**: count-based sliding windows
//! - **`merge`**: k-way merge of sorted inputs
//! - **`sample`**: strided, hash-based and reservoir sampling, shuffling
//! - **`throttle`**: keep items spaced by a minimum key delay
//! - **`group`**: grouping with semigroups, bags, frequency filters
//! - **`peek`**, **`iterate`**, **`remap`**: lookahead, unfolding, index remapping
//!
//! Nothing here spawns threads or performs IO. Every adapter advances only
//! when its consumer pulls.

pub mod group;
pub mod iterate;
pub mod merge;
pub mod peek;
pub mod prefix;
pub mod remap;
pub mod sample;
pub mod slice;
pub mod sliding;
pub mod throttle;
pub mod uniq;
pub mod window;

pub use group::{
    CountSemigroup, ListSemigroup, Semigroup, SetSemigroup, SumSemigroup, bag,
    filter_by_min_freq, group_by, item_indices, max_by_key_first,
};
pub use iterate::{Iterate, iterate};
pub use merge::{MergeMany, merge_many};
pub use peek::{concat, peek};
pub use prefix::{count, count_while};
pub use remap::remap;
pub use sample::{
    EveryNth, HashSample, SampleError, every_nth, hash_sample, reservoir_sample, shuffle,
};
pub use slice::{DropLast, drop_first, drop_last, nth_or, take_first, take_last};
pub use sliding::{Sliding, sliding};
pub use throttle::{Throttle, ThrottleThreads, throttle, throttle_threads};
pub use uniq::{Uniq, UniqMode, uniq};
pub use window::{SortedIterExt, WindowDiffs, Windows, window_diffs, windows};

pub use fx_types::{
    DiffRecord, SlidingSpec, SlidingSpecError, WindowKey, WindowSnapshot, WindowSpec,
    WindowSpecError,
};

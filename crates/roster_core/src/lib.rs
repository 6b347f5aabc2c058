//! Roster core: birth-year partitioning of a user record set and the
//! single-record edit session that mutates it.

pub mod partition;
pub mod session;
pub mod source;

pub use partition::{
    birth_time_millis, birth_year, parse_birth_date, partition, DerivedViews, Partitioner,
    ViewSide, DEFAULT_SPLIT_YEAR,
};
pub use session::{ApplyOutcome, EditError, EditSession, EditState, RosterController};
pub use source::{
    load_once, HttpUserSource, LoadOutcome, LoadState, StaticUserSource, UserSource,
    DEFAULT_SOURCE_URL,
};

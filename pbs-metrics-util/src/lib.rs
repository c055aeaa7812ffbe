//! Helper engines for the [`pbs_metrics`] recording contract.
//!
//! - [`MultiEngine`] fans every event out to several engines, for running more than one backend side
//!   by side.
//! - [`DebuggingEngine`] keeps every series in memory and exposes them through snapshots, for tests
//!   of pipeline code and for local debugging.
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

pub mod debugging;
pub use self::debugging::{DebugValue, DebuggingEngine, EventKind, Snapshot, Snapshotter};

mod fanout;
pub use self::fanout::{MultiEngine, MultiEngineBuilder};

//! # lumpr-io
//!
//! Text files around a LUMPREM run: results tables coming out of it,
//! `lr2series` input files converting them for MODFLOW 6, and the MF6
//! time-series files `lr2series` produces.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `results` | [`read_results`], [`ResultTable`] |
//! | `join` | [`join_results`], [`CombinedResults`] |
//! | `bridge` | [`BridgeFile`] |
//! | `mf6_ts` | [`read_mf6_time_series`] |

mod bridge;
mod error;
mod join;
mod mf6_ts;
mod results;
mod validate;

pub use bridge::{BridgeFile, Mf6Method, ReadColumn, WriteSeries};
pub use error::IoError;
pub use join::{CombinedResults, ModelResults, join_results};
pub use mf6_ts::{Mf6TimeSeries, read_mf6_time_series};
pub use results::{DEFAULT_FOOTER_LINES, ResultTable, ResultsConfig, read_results};

//! # lumpr-model
//!
//! In-memory LUMPREM parameter sets.
//!
//! A [`ModelConfig`] holds one model's storage, delay, flow and
//! elevation-transform parameters together with its data-file references and
//! an optional [`SecondBucket`]. Configs are assembled through
//! [`ModelConfigBuilder`], which applies LUMPREM defaults and validates every
//! parameter in one pass.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | `ModelConfig`, its builder and exported parameter values |
//! | `bucket` | Second-bucket overrides and resolution |
//! | `file_ref` | File name or code/parameter data references |
//! | `field` | Named deck fields for templating |
//! | `number` | Float rendering for LUMPREM text files |
//! | `error` | Error types |

mod bucket;
mod config;
mod error;
mod field;
mod file_ref;
mod number;
mod validate;

pub use bucket::SecondBucket;
pub use config::{MAX_MODEL_NAME_LEN, ModelConfig, ModelConfigBuilder, ParamValue};
pub use error::ModelError;
pub use field::Field;
pub use file_ref::FileRef;
pub use number::fmt_float;

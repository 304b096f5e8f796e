//! # lumpr-deck
//!
//! Writes the fixed-layout text files LUMPREM and LUMPREP read.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["ModelConfig"] --> D["render_deck()"]
//!     B["OutputSchedule"] --> D
//!     C["DeckOptions"] --> D
//!     D --> E["lr_name.in"]
//!     D -->|"TemplateSpec"| F["lr_name.tpl"]
//!     E -->|"read_output_days()"| B
//!     G["RecurrenceEvent list"] -->|"write_irrigation_file()"| H["irrigation file"]
//!     I["LumprepInput"] -->|"write_lumprep()"| J["lumprep.in"]
//! ```
//!
//! ## Deck layout
//!
//! Eight sections, each introduced by a `*` marker line: earth properties,
//! volume to elevation, topographic surface, initial conditions, solution
//! parameters, timing information, data filenames and (optionally) output
//! time series. On a field line every value except the last is left-aligned
//! in four columns. Second-bucket values that are not configured are written
//! as empty tokens, never as zero.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `writer` | Deck and template rendering and writing |
//! | `options` | Buffers, solver controls and deck options |
//! | `template` | PEST template tokens |
//! | `format` | Line layout and format versions |
//! | `output_series` | Output time-series section |
//! | `reader` | Timing-section reader |
//! | `irrigation` | Irrigation schedule files |
//! | `lumprep` | LUMPREP input files |
//! | `error` | Error types |

mod error;
mod format;
mod irrigation;
mod lumprep;
mod options;
mod output_series;
mod reader;
mod template;
mod writer;

pub use error::DeckError;
pub use format::{FormatVersion, VALUES_PER_LINE};
pub use irrigation::{render_irrigation, write_irrigation_file};
pub use lumprep::{LumprepInput, NdayOut, render_lumprep, write_lumprep};
pub use options::{Buffers, DeckOptions, SolverOptions};
pub use output_series::{OutputSeries, SERIES_DATETIME_FORMAT, SeriesColumns, SeriesDescriptor};
pub use reader::read_output_days;
pub use template::{DEFAULT_DELIMITER, TemplateSpec, template_label};
pub use writer::{DeckFiles, RenderedDeck, render_deck, write_deck};

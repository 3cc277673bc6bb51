pub mod aggregate;
pub mod calculator;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod table;

pub use aggregate::{aggregate_bales, BaleAggregate};
pub use calculator::{quality_index, QualityInputs};
pub use error::{PipelineError, Result};
pub use export::write_spreadsheet;
pub use pipeline::{process_log, process_log_file, PipelineOutput};
pub use table::{aggregate_table, OUTPUT_COLUMNS};

pub use hvilog_parser::{ClassingRecord, DecodePolicy, ParseReport};

pub mod chunk;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod source;
pub mod storage;

pub use chunk::{Chunk, ChunkProgress, ChunkReport, Chunker, TextSplitter};
pub use config::{ChunkConfig, Config, ConvertConfig, FailurePolicy, FetchConfig};
pub use error::{Error, Result};
pub use fetch::{
    DateOutcome, FailedBatch, FetchProgress, FetchReport, Fetcher, batch_count, date_range,
};
pub use normalize::{
    ConvertProgress, ConvertReport, FailedFile, Normalizer, parse_document, render_free_flow,
};
pub use source::{HttpSource, SessionSource, batch_url, index_url};

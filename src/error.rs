use std::io;
use thiserror::Error;

use crate::literal::ParseError;
use crate::stats::TableError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input ended before the statistics literal was complete")]
    PrematureEnd,
    #[error("malformed statistics literal: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("config file `{path}`: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

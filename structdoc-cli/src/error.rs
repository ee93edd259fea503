use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while turning a module into syntax data.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load Go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("parser gave up on '{}'", path.display())]
    Aborted { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Please specify a directory using --dir")]
    MissingDir,

    #[error("no go.mod found above '{}'; use --allow-create-go-mod for tests", root.display())]
    NoProjectMarker { root: PathBuf },

    #[error("failed to create temporary go.mod at '{}': {source}", path.display())]
    MarkerWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error loading packages: {0}")]
    Parse(#[from] ParseError),

    #[error("No structs matched pattern '{pattern}'.")]
    NoMatches { pattern: String },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown cull criterion: {0}")]
    UnknownCriterion(char),

    #[error("unknown divide criterion: {0}")]
    UnknownDivision(char),

    #[error("unknown export field: {0}")]
    UnknownField(char),

    #[error("neighbor scratch overflow: more than {capacity} sources inside search radius")]
    NeighborOverflow { capacity: usize },

    #[error("only {found} neighbors inside search radius, {required} required")]
    TooFewNeighbors { found: usize, required: usize },

    #[error(transparent)]
    Catalog(#[from] anyhow::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

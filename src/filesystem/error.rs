use derive_more::Display;
use snafu::Snafu;

/// The tree operation on whose behalf a path is parsed or resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("create")]
    Create,
    #[display("delete")]
    Delete,
    #[display("move")]
    Move,
    #[display("move directory to")]
    MoveInto,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)))]
pub enum DirectoryTreeError {
    #[snafu(display("Invalid directory path provided to {operation}. {reason}"))]
    InvalidArgumentError { operation: Operation, reason: String },
    #[snafu(display("Cannot {operation} {path} - {segment} does not exist"))]
    NotFoundError {
        operation: Operation,
        path: String,
        segment: String,
    },
    #[snafu(display("Directory {path} already exists"))]
    AlreadyExistsError { path: String },
    #[snafu(display(
        "Cannot move {from} to {to} - the destination is inside the directory being moved"
    ))]
    CyclicMoveError { from: String, to: String },
}

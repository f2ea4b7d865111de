//! Editor launcher adapters

mod command;

pub use command::CommandEditor;

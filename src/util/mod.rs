//! Small string utilities shared by the model and the parser.

pub mod names;

mod common;
mod evaluation;
mod import;
mod properties;

extern crate chrono;
extern crate csv;
extern crate flate2;
extern crate itertools;
extern crate rayon;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate toml;
extern crate walkdir;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[cfg(test)]
extern crate tempfile;

pub mod boe;
pub mod configuration;
pub mod defs;
pub mod elections;
pub mod engine;
pub mod errors;
pub mod offices;
pub mod output;
pub mod rates;

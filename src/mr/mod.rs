use std::fmt::Display;

pub mod error;
pub mod input;
pub mod job;
pub mod output;

pub use error::JobError;

pub struct KeyValue<V> {
    pub key: String,
    pub value: V,
}

/// A map/reduce application.
///
/// `reduce` folds one value into an accumulator for the same key. It must be
/// associative and commutative: runtimes apply it both as a per-worker
/// combiner and as the final merge.
pub trait MRApp: Send + Sync + 'static {
    type Value: Display + Send + 'static;

    fn map<'a>(&'a self, line: &'a str) -> Result<Box<dyn Iterator<Item = KeyValue<Self::Value>> + 'a>, anyhow::Error>;
    fn reduce(&self, key: &str, acc: &mut Self::Value, value: Self::Value) -> Result<(), anyhow::Error>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub input_records: u64,
    pub map_output_records: u64,
    pub combine_output_records: u64,
    pub reduce_output_records: u64,
}

impl Counters {
    pub fn merge(&mut self, other: &Counters) {
        self.input_records += other.input_records;
        self.map_output_records += other.map_output_records;
        self.combine_output_records += other.combine_output_records;
        self.reduce_output_records += other.reduce_output_records;
    }
}

pub mod trigram;

pub use trigram::{TrigramCount, JOB_NAME};

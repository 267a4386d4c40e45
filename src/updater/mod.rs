mod cycle;

pub use cycle::{check, reconcile, run, Outcome};

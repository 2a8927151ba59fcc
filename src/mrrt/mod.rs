pub mod local;
pub mod sequential;

use std::collections::HashMap;

use crate::mr::{KeyValue, MRApp};

/// Folds one emission into `acc` with the app's reducer.
pub(crate) fn combine<A: MRApp>(
    app: &A,
    acc: &mut HashMap<String, A::Value>,
    kv: KeyValue<A::Value>,
) -> Result<(), anyhow::Error> {
    if let Some(current) = acc.get_mut(&kv.key) {
        app.reduce(&kv.key, current, kv.value)?;
    } else {
        acc.insert(kv.key, kv.value);
    }
    Ok(())
}

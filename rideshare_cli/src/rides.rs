use std::path::PathBuf;

use rideshare_costs::store::RideStore;

use crate::{store::open_store, table::rides_table};

pub fn run(store: Option<PathBuf>) -> anyhow::Result<()> {
    let store = open_store(store)?;
    let rides = store.list()?;

    if rides.is_empty() {
        println!("No rides stored in {}", store.folder().display());
    } else {
        println!("{}", rides_table(&rides));
    }

    Ok(())
}

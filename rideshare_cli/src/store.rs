use std::path::PathBuf;

use rideshare_costs::store::JsonFolderRideStore;

const STORE_FOLDER_ENV_VAR: &str = "RIDESHARE_STORE_FOLDER";
const DEFAULT_STORE_FOLDER: &str = "./rides";

pub fn store_folder(arg: Option<PathBuf>, env: Option<String>) -> PathBuf {
    arg.or_else(|| env.filter(|folder| !folder.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FOLDER))
}

pub fn open_store(arg: Option<PathBuf>) -> anyhow::Result<JsonFolderRideStore> {
    let folder = store_folder(arg, std::env::var(STORE_FOLDER_ENV_VAR).ok());
    Ok(JsonFolderRideStore::new(folder)?)
}

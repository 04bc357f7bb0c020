use crate::commands::Out;
use crate::keys::{KeyStore, Storage};
use crate::{Config, Result};
use std::path::Path;

/// Creates the data directory and stores the API key.
pub async fn init(home: &Path, storage: Option<Storage>) -> Result<Out<String>> {
    let config = Config::init(home).await?;
    let keys = KeyStore::new(&config);
    keys.prompt_and_save(storage).await?;
    Ok(Out::new_message(format!(
        "Initialized {}",
        config.root().display()
    )))
}

mod documents;
mod search;

use std::path::Path;

use crate::config::StoreConfig;
use crate::db::Database;

fn open_db(dir: &Path) -> Database {
    Database::open(dir, &StoreConfig::default()).unwrap()
}

// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env::current_dir;
use std::path::PathBuf;

use mathcards_core::error::Fallible;
use mathcards_core::error::fail;

use crate::db::DATABASE_FILE;
use crate::db::Database;

/// The directory mathcards keeps its settings database in.
pub struct WorkDir {
    pub directory: PathBuf,
    pub db: Database,
}

impl WorkDir {
    /// Open the given directory, or the current directory if none is given.
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let db_path = directory.join(DATABASE_FILE);
        log::debug!("Opening database at {}", db_path.display());
        let db = Database::new(&db_path)?;
        Ok(Self { directory, db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_open_missing_directory() {
        let result = WorkDir::open(Some("./derpherp".to_string()));
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
    }

    #[test]
    fn test_open_creates_database() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let workdir = WorkDir::open(Some(dir.display().to_string()))?;
        assert!(workdir.directory.join(DATABASE_FILE).exists());
        Ok(())
    }
}

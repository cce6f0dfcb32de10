use std::env;
use std::fs;
use std::path::PathBuf;

/// A file in the system temp directory, removed when dropped.
pub struct TempFile {
    pub path: PathBuf,
}

impl TempFile {
    pub fn new(name: &str) -> Self {
        let path = env::temp_dir().join(format!(
            "dmv-quiz-{}-{}.json",
            name,
            rand::random::<u64>()
        ));
        TempFile { path }
    }

    pub fn with_content(name: &str, content: &str) -> Self {
        let file = TempFile::new(name);
        fs::write(&file.path, content).unwrap();
        file
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        fs::remove_file(&self.path).ok();
    }
}

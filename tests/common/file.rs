use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
}

/// Write `files_count` top-level files with random names and content
pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut files = Vec::<FileSpec>::new();

    while files.len() < files_count {
        let file_name = format!("{}.txt", Word().fake::<String>());
        if files.iter().any(|file| file.path.ends_with(&file_name)) {
            continue;
        }

        let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
        let file_spec = FileSpec::new(dir.join(&file_name), file_content);
        write_file(file_spec.clone());

        files.push(file_spec);
    }

    files
}

//! Project directory management and first-boot seeding.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::paths::{PathRejected, canonicalize_root, resolve_within};

const SAMPLE_PROJECT: &str = "my-project";

const SAMPLE_MAIN_JS: &str = r#"// Welcome to Codepad!
// Start coding here...

console.log("Hello, World!");

function greet(name) {
  return `Hello, ${name}!`;
}

console.log(greet("Developer"));
"#;

const SAMPLE_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>My Project</title>
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <h1>Hello World!</h1>
  <p>Welcome to my project.</p>
  <script src="main.js"></script>
</body>
</html>
"#;

const SAMPLE_STYLE_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: sans-serif;
  min-height: 100vh;
  display: flex;
  justify-content: center;
  align-items: center;
}
"#;

const SAMPLE_APP_PY: &str = r#"# Python Example

def main():
    print("Hello from Python!")

    numbers = [1, 2, 3, 4, 5]
    squared = [x**2 for x in numbers]
    print(f"Squared numbers: {squared}")

if __name__ == "__main__":
    main()
"#;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("invalid project name")]
    InvalidName(#[from] PathRejected),

    #[error("project not found")]
    NotFound,

    #[error("project already exists")]
    AlreadyExists,

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Manages the directory-per-project layout under a single projects root.
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the projects root and seed the sample project on first boot.
    pub async fn ensure_layout(&mut self) -> Result<(), ProjectError> {
        tokio::fs::create_dir_all(&self.root).await?;
        // Re-resolve now that the directory exists.
        self.root = canonicalize_root(&self.root);

        let sample = self.root.join(SAMPLE_PROJECT);
        if !tokio::fs::try_exists(&sample).await? {
            info!(project = SAMPLE_PROJECT, "seeding sample project");
            tokio::fs::create_dir_all(&sample).await?;
            tokio::fs::write(sample.join("main.js"), SAMPLE_MAIN_JS).await?;
            tokio::fs::write(sample.join("index.html"), SAMPLE_INDEX_HTML).await?;
            tokio::fs::write(sample.join("style.css"), SAMPLE_STYLE_CSS).await?;
            tokio::fs::write(sample.join("app.py"), SAMPLE_APP_PY).await?;
        }
        Ok(())
    }

    /// Resolve a project's directory. The name is untrusted input and goes
    /// through the same confinement as file paths; existence is not checked.
    pub fn dir(&self, name: &str) -> Result<PathBuf, ProjectError> {
        if name.trim().is_empty() {
            return Err(ProjectError::InvalidName(PathRejected {
                path: name.to_string(),
            }));
        }
        Ok(resolve_within(&self.root, name)?)
    }

    /// Resolve a project's directory, requiring that it exists.
    pub async fn existing_dir(&self, name: &str) -> Result<PathBuf, ProjectError> {
        let dir = self.dir(name)?;
        match tokio::fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => Ok(dir),
            Ok(_) => Err(ProjectError::NotFound),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Err(ProjectError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    /// List project names in directory-enumeration order.
    pub async fn list(&self) -> Result<Vec<String>, ProjectError> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    /// Create a new project with a starter file. Fails distinctly when the
    /// project already exists.
    pub async fn create(&self, name: &str) -> Result<(), ProjectError> {
        let dir = self.dir(name)?;
        if tokio::fs::try_exists(&dir).await? {
            return Err(ProjectError::AlreadyExists);
        }
        tokio::fs::create_dir_all(&dir).await?;
        let starter = format!("// {name}\n// Start coding here!\n\nconsole.log(\"Hello from {name}!\");\n");
        tokio::fs::write(dir.join("main.js"), starter).await?;
        info!(project = name, "created project");
        Ok(())
    }
}

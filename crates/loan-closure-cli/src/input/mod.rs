pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a command's structured input: `--input` file first, then JSON
/// piped on stdin. `None` means the caller should build it from flags.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_input(path).map(Some);
    }
    stdin::read_stdin()
}

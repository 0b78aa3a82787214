use std::path::Path;

pub trait FileName {
    /// The final path component, or `"unknown"` when there is none or it is not valid UTF-8.
    fn string_file_name(&self) -> &str;
}

impl FileName for Path {
    fn string_file_name(&self) -> &str {
        self.file_name().and_then(|s| s.to_str()).unwrap_or("unknown")
    }
}

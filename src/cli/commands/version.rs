//! Version command - print the fabrun version.

/// Returns the version line.
pub fn version_line() -> String {
    format!("fabrun version {}", env!("CARGO_PKG_VERSION"))
}

/// Executes the version command.
pub fn run() {
    println!("{}", version_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_uses_package_version() {
        assert_eq!(version_line(), "fabrun version 1.0.0");
    }
}

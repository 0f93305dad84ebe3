// Copyright 2025 eraflo
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

//! Directories the runtime reads from and writes to.

use std::path::PathBuf;

/// Subdirectory of the platform config directory that holds user files.
pub const APP_DIR_NAME: &str = "tessera";

/// Directory holding the shipped data files, such as the default options.
///
/// This is the executable's directory, falling back to the working directory
/// when the executable path cannot be determined.
pub fn base_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory holding per-user files (options changes, screenshots).
pub fn user_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| base_path().join("user"))
}

/// Where screenshots are written.
pub fn screenshot_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| user_dir().join("screenshots"))
}

/// A short name of the platform, for startup diagnostics.
pub fn platform_name() -> String {
    format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_files_live_under_the_app_directory() {
        let dir = user_dir();
        assert!(dir.ends_with(APP_DIR_NAME) || dir.ends_with("user"));
    }

    #[test]
    fn platform_name_mentions_the_os() {
        assert!(platform_name().starts_with(std::env::consts::OS));
    }
}

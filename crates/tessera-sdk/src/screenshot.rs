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

//! Persists the current frame as a numbered PNG file.

use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tessera_core::renderer::Canvas;
use thiserror::Error;

/// Highest index a screenshot file name can carry.
pub const MAX_SCREENSHOT_INDEX: u32 = 999;

/// Errors that can occur while writing a screenshot.
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// The screenshot directory could not be created.
    #[error("could not create screenshot directory '{path}': {source}")]
    CreateDirectory {
        /// The directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Every index from 000 to 999 is taken.
    #[error("no free screenshot slot left in '{0}'")]
    NoFreeSlot(PathBuf),
    /// The canvas could not be turned into an image buffer.
    #[error("canvas of {width}x{height} pixels does not form a valid image")]
    InvalidCanvas {
        /// Canvas width.
        width: u32,
        /// Canvas height.
        height: u32,
    },
    /// Encoding or writing the file failed.
    #[error("could not write screenshot '{path}': {source}")]
    Encode {
        /// The target file.
        path: PathBuf,
        /// The underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}

/// Writes `screenshotNNN.png` files into one directory, never overwriting.
#[derive(Debug, Clone)]
pub struct ScreenshotWriter {
    directory: PathBuf,
}

impl ScreenshotWriter {
    /// A writer targeting `directory`. The directory is created on first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The first `screenshotNNN.png` path that does not exist yet, probing from 000.
    pub fn next_path(&self) -> Option<PathBuf> {
        (0..=MAX_SCREENSHOT_INDEX)
            .map(|index| self.directory.join(format!("screenshot{index:03}.png")))
            .find(|path| !path.exists())
    }

    /// Saves `canvas` under the next free name and returns the path written.
    pub fn save(&self, canvas: &Canvas) -> Result<PathBuf, ScreenshotError> {
        std::fs::create_dir_all(&self.directory).map_err(|source| {
            ScreenshotError::CreateDirectory {
                path: self.directory.clone(),
                source,
            }
        })?;

        let path = self
            .next_path()
            .ok_or_else(|| ScreenshotError::NoFreeSlot(self.directory.clone()))?;

        let (width, height) = (canvas.width(), canvas.height());
        let image = RgbaImage::from_raw(width, height, canvas.to_rgba_bytes())
            .ok_or(ScreenshotError::InvalidCanvas { width, height })?;
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ScreenshotError::Encode {
                path: path.clone(),
                source,
            })?;

        log::info!("Screenshot saved to '{}'.", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::renderer::Color;

    fn file_name(path: &Path) -> &str {
        path.file_name().and_then(|n| n.to_str()).unwrap()
    }

    #[test]
    fn three_screenshots_in_an_empty_directory_are_numbered_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ScreenshotWriter::new(dir.path());
        let canvas = Canvas::new(8, 6);

        let names: Vec<String> = (0..3)
            .map(|_| file_name(&writer.save(&canvas).unwrap()).to_owned())
            .collect();

        assert_eq!(
            names,
            vec!["screenshot000.png", "screenshot001.png", "screenshot002.png"]
        );
    }

    #[test]
    fn existing_files_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let taken = dir.path().join("screenshot000.png");
        std::fs::write(&taken, b"not an image").unwrap();

        let writer = ScreenshotWriter::new(dir.path());
        let path = writer.save(&Canvas::new(2, 2)).unwrap();

        assert_eq!(file_name(&path), "screenshot001.png");
        assert_eq!(std::fs::read(&taken).unwrap(), b"not an image");
    }

    #[test]
    fn saved_image_holds_the_canvas_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ScreenshotWriter::new(dir.path().join("nested").join("shots"));
        let mut canvas = Canvas::new(3, 2);
        canvas.clear(Color::rgb(10, 20, 30));
        canvas.set_pixel(2, 1, Color::WHITE);

        let path = writer.save(&canvas).unwrap();
        let image = image::open(&path).unwrap().to_rgba8();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(2, 1).0, [255, 255, 255, 255]);
    }
}

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

//! The arrow cursor shared by the demo panels.

use tessera_core::renderer::{Color, Texture};

const WIDTH: u32 = 8;
const HEIGHT: u32 = 12;

/// A white arrow with a black outline, hot spot at the top-left corner.
pub fn arrow() -> Texture {
    let mut pixels = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        // The arrow widens by one pixel per row, then narrows into a tail.
        let row_width = if y < WIDTH { y + 1 } else { (HEIGHT - y) + 1 };
        for x in 0..WIDTH {
            let color = if x >= row_width {
                Color::TRANSPARENT
            } else if x == 0 || x + 1 == row_width || y + 1 == HEIGHT {
                Color::BLACK
            } else {
                Color::WHITE
            };
            pixels.push(color);
        }
    }
    Texture::from_pixels(WIDTH, HEIGHT, pixels)
        .unwrap_or_else(|| Texture::filled(1, 1, Color::WHITE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_tip_is_opaque_and_corner_is_clear() {
        let arrow = arrow();
        assert_eq!(arrow.texel(0, 0), Color::BLACK);
        assert_eq!(arrow.texel(WIDTH - 1, 0), Color::TRANSPARENT);
        assert_eq!(arrow.texel(2, 5), Color::WHITE);
    }
}

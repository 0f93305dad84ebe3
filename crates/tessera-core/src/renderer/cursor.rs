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

//! Cursor anchor points.

/// Which point of a cursor texture sits under the mouse position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorAlignment {
    /// The top-left corner (a classic arrow).
    #[default]
    TopLeft,
    /// The middle of the top edge.
    Top,
    /// The top-right corner.
    TopRight,
    /// The middle of the left edge.
    Left,
    /// The center (crosshairs).
    Middle,
    /// The middle of the right edge.
    Right,
    /// The bottom-left corner.
    BottomLeft,
    /// The middle of the bottom edge.
    Bottom,
    /// The bottom-right corner.
    BottomRight,
}

impl CursorAlignment {
    /// Offset to add to the mouse position to get the texture's top-left
    /// corner, for a texture drawn at `width` x `height`.
    pub fn offset(self, width: u32, height: u32) -> (i32, i32) {
        let w = width as i32;
        let h = height as i32;
        let x = match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => 0,
            Self::Top | Self::Middle | Self::Bottom => -(w / 2),
            Self::TopRight | Self::Right | Self::BottomRight => -w,
        };
        let y = match self {
            Self::TopLeft | Self::Top | Self::TopRight => 0,
            Self::Left | Self::Middle | Self::Right => -(h / 2),
            Self::BottomLeft | Self::Bottom | Self::BottomRight => -h,
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_center_offsets() {
        assert_eq!(CursorAlignment::TopLeft.offset(10, 6), (0, 0));
        assert_eq!(CursorAlignment::Middle.offset(10, 6), (-5, -3));
        assert_eq!(CursorAlignment::BottomRight.offset(10, 6), (-10, -6));
        assert_eq!(CursorAlignment::BottomLeft.offset(10, 6), (0, -6));
    }
}

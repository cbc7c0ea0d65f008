use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::E2eResult;

pub const TEST_IMAGE_NAME: &str = "test_image.png";

/// A valid 1x1 RGB PNG.
pub const TINY_PNG: [u8; 69] = [
    137, 80, 78, 71, 13, 10, 26, 10, 0, 0, 0, 13, 73, 72, 68, 82, 0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0,
    0, 0, 144, 119, 83, 222, 0, 0, 0, 12, 73, 68, 65, 84, 8, 153, 99, 248, 207, 192, 0, 0, 3, 1, 1,
    0, 24, 204, 83, 210, 0, 0, 0, 0, 73, 69, 78, 68, 174, 66, 96, 130,
];

/// Make sure `dir/test_image.png` exists and return its path.
pub fn ensure_test_image(dir: &Path) -> E2eResult<PathBuf> {
    let path = dir.join(TEST_IMAGE_NAME);
    if !path.exists() {
        fs::create_dir_all(dir)?;
        fs::write(&path, TINY_PNG)?;
        info!(path = %path.display(), "created test image");
    }
    Ok(path)
}

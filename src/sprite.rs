// 🖼️ Sprites - per-entry PNG assets addressed by id
// A missing or broken asset is never an error: it becomes a placeholder

use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sprite size in terminal cells; each cell holds two stacked pixels
pub const SPRITE_COLS: u16 = 8;
pub const SPRITE_ROWS: u16 = 4;

/// Pixels with alpha below this are treated as transparent
const ALPHA_THRESHOLD: u8 = 128;

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sprite {
    /// `SPRITE_COLS` x `SPRITE_ROWS * 2` pixels, row-major, `None` = transparent
    Pixels(Vec<Option<Rgb>>),

    /// Asset absent or undecodable
    Placeholder,
}

impl Sprite {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Sprite::Placeholder)
    }

    /// Pixel at (x, y) in the downsampled grid
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        match self {
            Sprite::Pixels(pixels) => pixels
                .get(y as usize * SPRITE_COLS as usize + x as usize)
                .copied()
                .flatten(),
            Sprite::Placeholder => None,
        }
    }
}

/// `<dir>/<id>.png`
pub fn sprite_path(dir: &Path, id: i64) -> PathBuf {
    dir.join(format!("{}.png", id))
}

/// Decode and downsample one asset; any failure yields the placeholder
pub fn load_sprite(path: &Path) -> Sprite {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(err) => {
            debug!(path = ?path, error = %err, "sprite unavailable, using placeholder");
            return Sprite::Placeholder;
        }
    };

    let width = SPRITE_COLS as u32;
    let height = SPRITE_ROWS as u32 * 2;
    let small = img.resize_exact(width, height, FilterType::Nearest).to_rgba8();

    let pixels = small
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            if a < ALPHA_THRESHOLD {
                None
            } else {
                Some([r, g, b])
            }
        })
        .collect();

    Sprite::Pixels(pixels)
}

/// Lazily decoded sprites, one decode per id for the session
pub struct SpriteCache {
    dir: PathBuf,
    sprites: HashMap<i64, Sprite>,
}

impl SpriteCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sprites: HashMap::new(),
        }
    }

    pub fn get(&mut self, id: i64) -> &Sprite {
        let dir = &self.dir;
        self.sprites
            .entry(id)
            .or_insert_with(|| load_sprite(&sprite_path(dir, id)))
    }
}

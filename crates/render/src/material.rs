use planetfall_common::BlockType;

use crate::error::RenderError;
use crate::surface::{Rgb, Surface};

/// Side of the builtin procedural textures, in texels.
pub const BUILTIN_TEXTURE_SIZE: u32 = 32;

/// An image sampled with normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    texels: Surface,
}

impl Texture {
    pub fn solid(color: Rgb) -> Self {
        Self {
            texels: Surface::new(1, 1, color),
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, RenderError>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTexture { width, height });
        }
        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Ok(Self {
            texels: Surface::from_pixels(width, height, texels)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.texels.width()
    }

    pub fn height(&self) -> u32 {
        self.texels.height()
    }

    /// Nearest texel at `(u, v)` in `[0, 1]`; coordinates outside clamp to
    /// the edge.
    pub fn sample_uv(&self, u: f32, v: f32) -> Rgb {
        let w = self.width() as f32;
        let h = self.height() as f32;
        let x = (u * w).floor().clamp(0.0, w - 1.0);
        let y = (v * h).floor().clamp(0.0, h - 1.0);
        // NaN clamps to NaN and casts to 0.
        self.texels
            .get(x as i64, y as i64)
            .unwrap_or_default()
    }
}

/// Block type to texture lookup owned by the renderer.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    textures: [Option<Texture>; BlockType::COUNT],
}

impl MaterialTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Procedural grass, dirt and stone. Air has no texture.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        let n = BUILTIN_TEXTURE_SIZE;
        let textures = [
            (BlockType::Grass, Texture::from_fn(n, n, grass_texel)),
            (BlockType::Dirt, Texture::from_fn(n, n, dirt_texel)),
            (BlockType::Stone, Texture::from_fn(n, n, stone_texel)),
        ];
        for (ty, texture) in textures {
            match texture {
                Ok(texture) => {
                    table.insert(ty, texture);
                }
                Err(err) => tracing::warn!(%ty, %err, "builtin texture skipped"),
            }
        }
        table
    }

    /// Register a texture, returning the one it replaces. Textures for air
    /// are stored but never drawn.
    pub fn insert(&mut self, block_type: BlockType, texture: Texture) -> Option<Texture> {
        self.textures[block_type.index()].replace(texture)
    }

    pub fn texture(&self, block_type: BlockType) -> Option<&Texture> {
        self.textures[block_type.index()].as_ref()
    }

    pub fn len(&self) -> usize {
        self.textures.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cheap integer hash in `0..=255`.
fn speckle(x: u32, y: u32, salt: u32) -> u8 {
    let mut h = x.wrapping_mul(0x9E37_79B1)
        ^ y.wrapping_mul(0x85EB_CA77)
        ^ salt.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h & 0xFF) as u8
}

fn shade(base: Rgb, amount: u8, spread: u8) -> Rgb {
    let offset = amount as i16 * spread as i16 / 255 - spread as i16 / 2;
    let ch = |c: u8| (c as i16 + offset).clamp(0, 255) as u8;
    Rgb::new(ch(base.r), ch(base.g), ch(base.b))
}

fn dirt_texel(x: u32, y: u32) -> Rgb {
    shade(Rgb::new(121, 85, 58), speckle(x, y, 1), 40)
}

fn grass_texel(x: u32, y: u32) -> Rgb {
    // Green top band with a ragged edge over dirt.
    let edge = BUILTIN_TEXTURE_SIZE / 4 + (speckle(x, 0, 7) % 4) as u32;
    if y < edge {
        shade(Rgb::new(86, 160, 60), speckle(x, y, 2), 36)
    } else {
        dirt_texel(x, y)
    }
}

fn stone_texel(x: u32, y: u32) -> Rgb {
    shade(Rgb::new(125, 125, 128), speckle(x / 2, y / 2, 3), 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_visible_types() {
        let table = MaterialTable::builtin();
        assert_eq!(table.len(), 3);
        for ty in BlockType::ALL {
            assert_eq!(table.texture(ty).is_some(), ty.is_visible(), "{ty}");
        }
    }

    #[test]
    fn insert_replaces() {
        let mut table = MaterialTable::empty();
        assert!(table.is_empty());
        assert!(table.insert(BlockType::Stone, Texture::solid(Rgb::new(1, 1, 1))).is_none());
        let old = table.insert(BlockType::Stone, Texture::solid(Rgb::new(2, 2, 2)));
        assert_eq!(old, Some(Texture::solid(Rgb::new(1, 1, 1))));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn sampling_clamps_to_edges() {
        let tex = Texture::from_fn(2, 2, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        assert_eq!(tex.sample_uv(0.0, 0.0), Rgb::new(0, 0, 0));
        assert_eq!(tex.sample_uv(0.75, 0.25), Rgb::new(1, 0, 0));
        assert_eq!(tex.sample_uv(1.0, 1.0), Rgb::new(1, 1, 0));
        assert_eq!(tex.sample_uv(-3.0, 9.0), Rgb::new(0, 1, 0));
        assert_eq!(tex.sample_uv(f32::NAN, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn empty_texture_is_rejected() {
        assert_eq!(
            Texture::from_fn(0, 4, |_, _| Rgb::default()),
            Err(RenderError::EmptyTexture { width: 0, height: 4 })
        );
    }

    #[test]
    fn grass_is_green_on_top_and_dirt_below() {
        let table = MaterialTable::builtin();
        let grass = table.texture(BlockType::Grass).unwrap();
        let top = grass.sample_uv(0.5, 0.0);
        let bottom = grass.sample_uv(0.5, 1.0);
        assert!(top.g > top.r);
        assert!(bottom.r > bottom.g);
    }
}

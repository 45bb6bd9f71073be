/// Errors raised while building render resources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("pixel count {len} does not match a {width}x{height} buffer")]
    PixelCount { width: u32, height: u32, len: usize },
    #[error("texture must be at least 1x1, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
}

use crate::upload::types::{PreviewError, SelectedFile};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use egui::ColorImage;
use std::fs;

const PREVIEW_MAX_SIDE: u32 = 512;

/// What the preview area shows for the current selection.
#[derive(Clone)]
pub struct PreviewImage {
    /// `data:<mime>;base64,<content>` of the selected file.
    pub data_uri: String,
    /// Decoded, downscaled pixels. `None` when the content is not a decodable image.
    pub image: Option<ColorImage>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("data_uri_len", &self.data_uri.len())
            .field("image", &self.image.as_ref().map(|i| i.size))
            .finish()
    }
}

impl PreviewImage {
    pub fn load(file: &SelectedFile) -> Result<Self, PreviewError> {
        let bytes = fs::read(&file.path).map_err(|source| PreviewError::Read {
            path: file.path.clone(),
            source,
        })?;
        Ok(Self::from_bytes(&file.mime, &bytes))
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let data_uri = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));

        let image = match image::load_from_memory(bytes) {
            Ok(decoded) => {
                let thumb = decoded.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE).to_rgba8();
                let size = [thumb.width() as usize, thumb.height() as usize];
                Some(ColorImage::from_rgba_unmultiplied(size, thumb.as_raw()))
            }
            Err(e) => {
                tracing::debug!("preview content is not a decodable image: {}", e);
                None
            }
        };

        Self { data_uri, image }
    }

    /// Recovers the file content from the data URI.
    #[cfg(test)]
    pub fn decoded_bytes(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.data_uri.split_once(";base64,")?;
        STANDARD.decode(payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::Path;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn data_uri_round_trips_the_exact_file() {
        let bytes = png_bytes(4, 3);
        let preview = PreviewImage::from_bytes("image/png", &bytes);

        assert!(preview.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(preview.decoded_bytes().unwrap(), bytes);
        assert_eq!(preview.image.as_ref().unwrap().size, [4, 3]);
    }

    #[test]
    fn large_images_are_downscaled() {
        let preview = PreviewImage::from_bytes("image/png", &png_bytes(1024, 256));
        let [w, h] = preview.image.unwrap().size;
        assert!(w <= PREVIEW_MAX_SIDE as usize && h <= PREVIEW_MAX_SIDE as usize);
        assert_eq!(w, 512);
    }

    #[test]
    fn undecodable_content_still_gets_a_data_uri() {
        let preview = PreviewImage::from_bytes("text/plain", b"hello");
        assert_eq!(preview.data_uri, "data:text/plain;base64,aGVsbG8=");
        assert!(preview.image.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let file = SelectedFile::from_path(Path::new("/nonexistent/cat.png"));
        let err = PreviewImage::load(&file).unwrap_err();
        assert!(matches!(err, PreviewError::Read { .. }));
        assert!(err.to_string().contains("cat.png"));
    }
}

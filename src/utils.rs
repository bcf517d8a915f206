use anyhow::Context;
use image::{ImageFormat, RgbaImage};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Name of the rendered logo inside the assets directory.
pub const LOGO_FILE_NAME: &str = "logo.png";

/// The `assets` directory of the project this binary was built from.
pub fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Writes the logo as PNG into `dir`, creating the directory if needed.
/// An existing logo is overwritten.
pub fn save_logo(logo: &RgbaImage, dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOGO_FILE_NAME);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    logo.write_to(&mut writer, ImageFormat::Png)
        .with_context(|| format!("encoding {}", path.display()))?;
    writer.flush().with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}x{} logo to {}", logo.width(), logo.height(), path.display());
    Ok(path)
}

/// Calculates the SHA256 hash of a file.
pub fn file_digest(path: &Path) -> anyhow::Result<String> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192]; // 8KB buffer
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("verum-logo-utils-{name}-{}", std::process::id()))
    }

    #[test]
    fn assets_dir_is_inside_the_project() {
        let dir = assets_dir();
        assert!(dir.ends_with("assets"));
        assert!(dir.parent().unwrap().join("Cargo.toml").exists());
    }

    #[test]
    fn save_creates_missing_directories() {
        let root = scratch_dir("nested");
        let dir = root.join("a").join("b");
        let logo = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 4]));

        let path = save_logo(&logo, &dir).unwrap();
        assert_eq!(path, dir.join(LOGO_FILE_NAME));

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, logo);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn save_overwrites_previous_logo() {
        let dir = scratch_dir("overwrite");
        save_logo(&RgbaImage::new(4, 4), &dir).unwrap();
        let path = save_logo(&RgbaImage::new(6, 6), &dir).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 6));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn digest_matches_known_value() {
        let dir = scratch_dir("digest");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("abc.txt");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn digest_of_missing_file_is_an_error() {
        assert!(file_digest(Path::new("/nonexistent/logo.png")).is_err());
    }
}

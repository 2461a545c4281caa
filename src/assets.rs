//! Asset catalog
//!
//! The frontend supplies an [`AssetSource`]. Anything that fails to load is
//! replaced (images) or left out (sounds, music) so the game always starts.

use std::collections::HashMap;

use glam::UVec2;
use thiserror::Error;

use crate::sim::SoundId;

/// Looping background track
pub const MUSIC_FILE: &str = "background_music.mp3";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("{path} is {actual}, expected {expected}")]
    WrongSize {
        path: String,
        actual: UVec2,
        expected: UVec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    MenuBackground,
    ZombieHead,
    Splat,
    ButtonNormal,
    ButtonHover,
}

impl ImageId {
    pub const ALL: [ImageId; 6] = [
        ImageId::Background,
        ImageId::MenuBackground,
        ImageId::ZombieHead,
        ImageId::Splat,
        ImageId::ButtonNormal,
        ImageId::ButtonHover,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageId::Background => "background.png",
            ImageId::MenuBackground => "menu_background.png",
            ImageId::ZombieHead => "zombie_head.png",
            ImageId::Splat => "splat.png",
            ImageId::ButtonNormal => "button_normal.png",
            ImageId::ButtonHover => "button_hover.png",
        }
    }

    /// Size the image is scaled to on load
    pub fn size(&self) -> UVec2 {
        match self {
            ImageId::Background | ImageId::MenuBackground => UVec2::new(800, 600),
            ImageId::ZombieHead => UVec2::new(70, 70),
            ImageId::Splat => UVec2::new(80, 80),
            ImageId::ButtonNormal | ImageId::ButtonHover => UVec2::new(200, 70),
        }
    }

    /// Backgrounds are opaque; sprites carry alpha
    pub fn has_alpha(&self) -> bool {
        !matches!(self, ImageId::Background | ImageId::MenuBackground)
    }
}

pub fn sound_file(sound: SoundId) -> &'static str {
    match sound {
        SoundId::Splat => "splat_sound.wav",
        SoundId::Click => "click_sound.wav",
    }
}

/// RGBA8 pixel buffer, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub size: UVec2,
    pub pixels: Vec<[u8; 4]>,
}

impl Image {
    pub fn filled(size: UVec2, color: [u8; 4]) -> Self {
        Self {
            size,
            pixels: vec![color; (size.x * size.y) as usize],
        }
    }

    /// Translucent grey with a 2 px red border
    pub fn placeholder(size: UVec2, alpha: bool) -> Self {
        let fill = if alpha { [128, 128, 128, 128] } else { [128, 128, 128, 255] };
        let mut image = Self::filled(size, fill);
        for y in 0..size.y {
            for x in 0..size.x {
                let border = x < 2 || y < 2 || x + 2 >= size.x || y + 2 >= size.y;
                if border {
                    image.pixels[(y * size.x + x) as usize] = [255, 0, 0, 255];
                }
            }
        }
        image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        self.pixels.get((y * self.size.x + x) as usize).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAsset {
    Loaded(Image),
    Placeholder(Image),
}

impl ImageAsset {
    pub fn image(&self) -> &Image {
        match self {
            ImageAsset::Loaded(image) | ImageAsset::Placeholder(image) => image,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageAsset::Placeholder(_))
    }
}

/// Encoded audio handed through to the playback backend untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundData {
    pub bytes: Vec<u8>,
}

/// Where asset bytes come from
pub trait AssetSource {
    fn load_image(&self, id: ImageId) -> Result<Image, AssetError>;
    fn load_sound(&self, sound: SoundId) -> Result<SoundData, AssetError>;
    fn load_music(&self) -> Result<SoundData, AssetError>;
}

/// Source with no assets at all
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl AssetSource for EmptySource {
    fn load_image(&self, id: ImageId) -> Result<Image, AssetError> {
        Err(AssetError::NotFound(id.file_name().to_string()))
    }

    fn load_sound(&self, sound: SoundId) -> Result<SoundData, AssetError> {
        Err(AssetError::NotFound(sound_file(sound).to_string()))
    }

    fn load_music(&self) -> Result<SoundData, AssetError> {
        Err(AssetError::NotFound(MUSIC_FILE.to_string()))
    }
}

/// In-memory source, keyed by asset id
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub images: HashMap<ImageId, Image>,
    pub sounds: HashMap<SoundId, SoundData>,
    pub music: Option<SoundData>,
}

impl AssetSource for MemorySource {
    fn load_image(&self, id: ImageId) -> Result<Image, AssetError> {
        self.images
            .get(&id)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(id.file_name().to_string()))
    }

    fn load_sound(&self, sound: SoundId) -> Result<SoundData, AssetError> {
        self.sounds
            .get(&sound)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(sound_file(sound).to_string()))
    }

    fn load_music(&self) -> Result<SoundData, AssetError> {
        self.music
            .clone()
            .ok_or_else(|| AssetError::NotFound(MUSIC_FILE.to_string()))
    }
}

fn check_size(id: ImageId, image: Image) -> Result<Image, AssetError> {
    if image.size == id.size() {
        Ok(image)
    } else {
        Err(AssetError::WrongSize {
            path: id.file_name().to_string(),
            actual: image.size,
            expected: id.size(),
        })
    }
}

/// Every asset the game uses, resolved once at startup
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    images: HashMap<ImageId, ImageAsset>,
    sounds: HashMap<SoundId, SoundData>,
    music: Option<SoundData>,
}

impl AssetCatalog {
    pub fn load(source: &dyn AssetSource) -> Self {
        let images = ImageId::ALL
            .iter()
            .map(|&id| {
                let asset = match source.load_image(id).and_then(|image| check_size(id, image)) {
                    Ok(image) => ImageAsset::Loaded(image),
                    Err(e) => {
                        log::warn!("Error loading image {}: {}", id.file_name(), e);
                        ImageAsset::Placeholder(Image::placeholder(id.size(), id.has_alpha()))
                    }
                };
                (id, asset)
            })
            .collect();

        let mut sounds = HashMap::new();
        for sound in [SoundId::Splat, SoundId::Click] {
            match source.load_sound(sound) {
                Ok(data) => {
                    sounds.insert(sound, data);
                }
                Err(e) => log::warn!("Error loading sound {}: {}", sound_file(sound), e),
            }
        }

        let music = source
            .load_music()
            .inspect_err(|e| log::warn!("Error loading background music: {}", e))
            .ok();

        Self {
            images,
            sounds,
            music,
        }
    }

    /// Every id has an entry after `load`; failed ones hold a placeholder
    pub fn image(&self, id: ImageId) -> Option<&ImageAsset> {
        self.images.get(&id)
    }

    pub fn sound(&self, sound: SoundId) -> Option<&SoundData> {
        self.sounds.get(&sound)
    }

    pub fn music(&self) -> Option<&SoundData> {
        self.music.as_ref()
    }

    pub fn placeholder_count(&self) -> usize {
        self.images.values().filter(|a| a.is_placeholder()).count()
    }
}

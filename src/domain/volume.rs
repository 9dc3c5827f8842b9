//! Narration volume and its icon level

/// Volume slider position in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    /// Creates a level, clamping anything above 100
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX))
    }

    /// Raw slider value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Gain in `[0.0, 1.0]` handed to speech synthesis
    pub fn gain(self) -> f32 {
        self.0 as f32 / Self::MAX as f32
    }

    /// Icon level shown next to the slider
    pub fn icon(self) -> VolumeIcon {
        match self.0 {
            67..=u8::MAX => VolumeIcon::High,
            34..=66 => VolumeIcon::Medium,
            1..=33 => VolumeIcon::Low,
            0 => VolumeIcon::Muted,
        }
    }
}

impl Default for VolumeLevel {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl From<u8> for VolumeLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// One of the four volume icon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeIcon {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeIcon {
    /// Numeric level, 0 for muted up to 3
    pub fn level(self) -> u8 {
        match self {
            VolumeIcon::Muted => 0,
            VolumeIcon::Low => 1,
            VolumeIcon::Medium => 2,
            VolumeIcon::High => 3,
        }
    }

    /// Icon asset path relative to the asset root
    pub fn asset_path(self) -> String {
        format!("icons/volume-level-{}.svg", self.level())
    }

    /// Alternative text for the icon
    pub fn alt_text(self) -> String {
        format!("volume-level-{}", self.level())
    }
}

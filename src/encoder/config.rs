use crate::models::ECLevel;
use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("STRIPES_PARALLEL_MASKS", true))
}

static QUIET_ZONE: OnceLock<usize> = OnceLock::new();

pub(crate) fn quiet_zone() -> usize {
    *QUIET_ZONE.get_or_init(|| parse_env_usize("STRIPES_QUIET_ZONE", 4).min(64))
}

static MODULE_SCALE: OnceLock<u32> = OnceLock::new();

pub(crate) fn module_scale() -> u32 {
    *MODULE_SCALE.get_or_init(|| parse_env_usize("STRIPES_MODULE_SCALE", 8).clamp(1, 64) as u32)
}

/// Options for building a QR symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Score the eight masks on the rayon pool
    pub parallel_masks: bool,
}

impl EncodeOptions {
    /// Defaults with the given error correction level
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            ..Self::default()
        }
    }

    /// Set the error correction level
    pub fn ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Enable or disable parallel mask evaluation
    pub fn parallel_masks(mut self, parallel: bool) -> Self {
        self.parallel_masks = parallel;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ec_level: ECLevel::default(),
            parallel_masks: parallel_masks(),
        }
    }
}

/// Options for rasterizing or drawing a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module
    pub module_scale: u32,
    /// Light modules around a 2D symbol
    pub quiet_zone: usize,
    /// Bar height in pixels for linear symbols
    pub bar_height: u32,
}

impl RenderOptions {
    /// Set pixels per module (at least 1)
    pub fn module_scale(mut self, scale: u32) -> Self {
        self.module_scale = scale.max(1);
        self
    }

    /// Set the quiet zone width in modules
    pub fn quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Set the bar height in pixels (at least 1)
    pub fn bar_height(mut self, height: u32) -> Self {
        self.bar_height = height.max(1);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_scale: module_scale(),
            quiet_zone: quiet_zone(),
            bar_height: 60,
        }
    }
}

use std::{collections::HashMap, path::Path, sync::LazyLock};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    color::Color,
    core::{Canvas, MAX_RASTER_DIM},
    error::{BoothError, BoothResult},
};

/// Id of the catalog entry that leaves the composite untouched.
pub const NO_FRAME_ID: &str = "none";

/// One gradient stop. `offset` is a fraction of the gradient line for
/// [`Background::LinearGradient`] and a pixel distance for [`Background::RepeatingPattern`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    pub offset: f64,
}

/// One soft radial spot of a [`Background::RadialGlow`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialLayer {
    /// Horizontal center as a fraction of the canvas width.
    pub center_x: f64,
    /// Vertical center as a fraction of the canvas height.
    pub center_y: f64,
    /// Color at the center; fades linearly to transparent at `extent`.
    pub color: Color,
    /// Fade distance as a fraction of the distance to the farthest canvas corner.
    pub extent: f64,
}

/// Frame background fill.
///
/// Angles follow the CSS convention: 0 degrees points up, 90 right, 180 down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    Solid { color: Color },
    LinearGradient { angle_deg: f64, stops: Vec<ColorStop> },
    RepeatingPattern { angle_deg: f64, stops: Vec<ColorStop> },
    /// Spots painted over the frame's border color, last layer first.
    RadialGlow { layers: Vec<RadialLayer> },
}

impl Background {
    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Solid { .. } => Ok(()),
            Self::LinearGradient { angle_deg, stops } => {
                validate_stops(stops)?;
                if !angle_deg.is_finite() {
                    return Err("gradient angle must be finite".to_owned());
                }
                if stops.iter().any(|s| !(0.0..=1.0).contains(&s.offset)) {
                    return Err("linear gradient offsets must be in [0, 1]".to_owned());
                }
                Ok(())
            }
            Self::RepeatingPattern { angle_deg, stops } => {
                validate_stops(stops)?;
                if !angle_deg.is_finite() {
                    return Err("pattern angle must be finite".to_owned());
                }
                let period = stops.last().map(|s| s.offset).unwrap_or(0.0);
                if stops[0].offset < 0.0 || period <= 0.0 {
                    return Err(
                        "repeating pattern needs offsets >= 0 and a positive period".to_owned(),
                    );
                }
                Ok(())
            }
            Self::RadialGlow { layers } => {
                if layers.is_empty() {
                    return Err("radial glow needs at least one layer".to_owned());
                }
                if layers.iter().any(|l| !l.extent.is_finite() || l.extent <= 0.0) {
                    return Err("radial glow extent must be > 0".to_owned());
                }
                Ok(())
            }
        }
    }
}

fn validate_stops(stops: &[ColorStop]) -> Result<(), String> {
    if stops.is_empty() {
        return Err("gradient needs at least one stop".to_owned());
    }
    if stops.iter().any(|s| !s.offset.is_finite()) {
        return Err("gradient offsets must be finite".to_owned());
    }
    if stops.windows(2).any(|w| w[1].offset < w[0].offset) {
        return Err("gradient offsets must be non-decreasing".to_owned());
    }
    Ok(())
}

/// Solid band drawn directly around the photo area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerBorder {
    pub width: u32,
    pub color: Color,
}

/// A decorative frame style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub border_width: u32,
    #[serde(default)]
    pub border_color: Option<Color>,
    #[serde(default)]
    pub padding: u32,
    /// Polaroid-style bottom padding; replaces `padding` on the bottom edge when larger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom_padding: Option<u32>,
    /// Preview-only; the print render keeps square corners.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_border: Option<InnerBorder>,
    /// Preview-only drop shadow, kept verbatim for the screens that draw it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    /// Film-strip sprocket holes along both side edges.
    #[serde(default)]
    pub holes: bool,
}

impl FrameSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            border_width: 0,
            border_color: None,
            padding: 0,
            bottom_padding: None,
            border_radius: None,
            background: None,
            inner_border: None,
            shadow: None,
            holes: false,
        }
    }

    /// `true` when applying this frame must leave the image untouched.
    pub fn is_identity(&self) -> bool {
        self.id == NO_FRAME_ID
            || (self.border_width == 0
                && self.padding == 0
                && self.bottom_padding.unwrap_or(0) == 0
                && self.inner_border.is_none()
                && self.background.is_none()
                && !self.holes)
    }

    /// Solid fill behind the photo. Unset or transparent colors print as white.
    pub fn fill_color(&self) -> Color {
        match self.border_color {
            Some(c) if !c.is_transparent() => c,
            _ => Color::WHITE,
        }
    }

    /// Bottom padding beyond the regular `padding`.
    pub fn extra_bottom_padding(&self) -> u32 {
        self.bottom_padding
            .map(|b| b.saturating_sub(self.padding))
            .unwrap_or(0)
    }

    /// Distance from the canvas origin to the photo's top-left corner, on both axes.
    pub fn image_inset(&self) -> u32 {
        self.border_width.saturating_add(self.padding)
    }

    /// Canvas size of a framed image whose photo area is `image`.
    pub fn framed_canvas(&self, image: Canvas) -> BoothResult<Canvas> {
        let inset = u64::from(self.image_inset()) * 2;
        let width = u64::from(image.width) + inset;
        let height = u64::from(image.height) + inset + u64::from(self.extra_bottom_padding());
        let max = u64::from(MAX_RASTER_DIM);
        if width > max || height > max {
            return Err(BoothError::validation(format!(
                "frame '{}' expands {}x{} to {width}x{height} px, above the {MAX_RASTER_DIM} px limit",
                self.id, image.width, image.height
            )));
        }
        Ok(Canvas {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn validate(&self) -> BoothResult<()> {
        if self.id.trim().is_empty() {
            return Err(BoothError::validation("frame id must not be empty"));
        }
        if let Some(bg) = &self.background {
            bg.validate()
                .map_err(|e| BoothError::validation(format!("frame '{}': {e}", self.id)))?;
        }
        if let Some(inner) = &self.inner_border
            && inner.width == 0
        {
            return Err(BoothError::validation(format!(
                "frame '{}': inner border width must be >= 1",
                self.id
            )));
        }
        Ok(())
    }

    fn border(mut self, width: u32, color: Color) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }

    fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    fn bottom(mut self, px: u32) -> Self {
        self.bottom_padding = Some(px);
        self
    }

    fn radius(mut self, px: u32) -> Self {
        self.border_radius = Some(px);
        self
    }

    fn inner(mut self, width: u32, color: Color) -> Self {
        self.inner_border = Some(InnerBorder { width, color });
        self
    }

    fn shadow(mut self, css: &str) -> Self {
        self.shadow = Some(css.to_owned());
        self
    }

    fn background(mut self, bg: Background) -> Self {
        self.background = Some(bg);
        self
    }

    fn with_holes(mut self) -> Self {
        self.holes = true;
        self
    }
}

/// Immutable id-keyed frame collection, in display order.
#[derive(Clone, Debug)]
pub struct FrameCatalog {
    frames: Vec<FrameSpec>,
    by_id: HashMap<String, usize>,
}

static BUILTIN: LazyLock<FrameCatalog> = LazyLock::new(|| FrameCatalog::indexed(builtin_frames()));

impl FrameCatalog {
    /// The kiosk's built-in frames, built once per process.
    pub fn builtin() -> &'static FrameCatalog {
        &BUILTIN
    }

    fn indexed(frames: Vec<FrameSpec>) -> Self {
        let by_id = frames
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.id.clone(), idx))
            .collect();
        Self { frames, by_id }
    }

    pub fn from_frames(frames: Vec<FrameSpec>) -> BoothResult<Self> {
        let mut by_id = HashMap::with_capacity(frames.len());
        for (idx, frame) in frames.iter().enumerate() {
            frame.validate()?;
            if by_id.insert(frame.id.clone(), idx).is_some() {
                return Err(BoothError::validation(format!(
                    "duplicate frame id '{}'",
                    frame.id
                )));
            }
        }
        Ok(Self { frames, by_id })
    }

    /// Parse a JSON array of frames.
    pub fn from_json(s: &str) -> BoothResult<Self> {
        let frames: Vec<FrameSpec> =
            serde_json::from_str(s).map_err(|e| BoothError::serde(e.to_string()))?;
        Self::from_frames(frames)
    }

    pub fn from_path(path: &Path) -> BoothResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read frame catalog '{}'", path.display()))?;
        Self::from_json(&s)
    }

    pub fn get(&self, id: &str) -> Option<&FrameSpec> {
        self.by_id.get(id).map(|&idx| &self.frames[idx])
    }

    /// Like [`FrameCatalog::get`], failing with a validation error for unknown ids.
    pub fn require(&self, id: &str) -> BoothResult<&FrameSpec> {
        self.get(id)
            .ok_or_else(|| BoothError::validation(format!("unknown frame id '{id}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSpec> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

const fn rgb24(v: u32) -> Color {
    Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn stop(v: u32, offset: f64) -> ColorStop {
    ColorStop {
        color: rgb24(v),
        offset,
    }
}

fn linear(angle_deg: f64, stops: &[(u32, f64)]) -> Background {
    Background::LinearGradient {
        angle_deg,
        stops: stops.iter().map(|&(c, o)| stop(c, o)).collect(),
    }
}

fn repeating(angle_deg: f64, stops: &[(u32, f64)]) -> Background {
    Background::RepeatingPattern {
        angle_deg,
        stops: stops.iter().map(|&(c, o)| stop(c, o)).collect(),
    }
}

fn glow(center_x: f64, center_y: f64, color: Color, extent: f64) -> RadialLayer {
    RadialLayer {
        center_x,
        center_y,
        color,
        extent,
    }
}

fn builtin_frames() -> Vec<FrameSpec> {
    let f = FrameSpec::new;
    vec![
        f(NO_FRAME_ID, "No Frame").border(0, Color::TRANSPARENT),
        // Modern minimal
        f("modern-minimal", "Modern Minimal")
            .border(6, rgb24(0xD4C5B9))
            .padding(15)
            .radius(8)
            .inner(1, rgb24(0x3A3A3A))
            .shadow("0 4px 15px rgba(0,0,0,0.08)"),
        f("minimalist-thin", "Minimalist Thin")
            .border(5, rgb24(0x2C2C2C))
            .padding(18)
            .shadow("0 2px 10px rgba(0,0,0,0.1)"),
        f("shadow-depth", "Floating Shadow")
            .border(0, Color::TRANSPARENT)
            .padding(12)
            .shadow("0 8px 30px rgba(0,0,0,0.25), inset 0 0 0 1px rgba(0,0,0,0.1)"),
        // Vintage and ornate
        f("vintage-ornate", "Vintage Ornate")
            .border(35, rgb24(0xDAA520))
            .padding(8)
            .background(repeating(
                45.0,
                &[(0xDAA520, 0.0), (0xB8860B, 2.0), (0xCD853F, 2.0), (0xDAA520, 4.0)],
            ))
            .inner(3, rgb24(0x8B6914))
            .shadow("0 8px 35px rgba(184,134,11,0.4)"),
        f("art-deco", "Art Deco")
            .border(28, rgb24(0x1C1C1C))
            .padding(10)
            .inner(4, rgb24(0xD4AF37))
            .shadow("0 6px 25px rgba(0,0,0,0.35)")
            .background(linear(
                135.0,
                &[
                    (0x2C2C2C, 0.25),
                    (0x1C1C1C, 0.25),
                    (0x1C1C1C, 0.5),
                    (0x2C2C2C, 0.5),
                    (0x2C2C2C, 0.75),
                    (0x1C1C1C, 0.75),
                ],
            )),
        f("copper-vintage", "Copper Vintage")
            .border(28, rgb24(0xB87333))
            .padding(8)
            .inner(2, rgb24(0xFFF8DC))
            .shadow("0 5px 20px rgba(184,115,51,0.4)")
            .background(linear(
                135.0,
                &[(0xB87333, 0.0), (0xA0522D, 0.5), (0xB87333, 1.0)],
            )),
        // Polaroid and instant film
        f("polaroid-classic", "Polaroid Classic")
            .border(15, rgb24(0xF8F8F8))
            .padding(15)
            .bottom(70)
            .shadow("0 5px 20px rgba(0,0,0,0.2)")
            .radius(3),
        f("instant-film", "Instant Film")
            .border(12, rgb24(0xFEFEFE))
            .padding(18)
            .bottom(65)
            .shadow("0 4px 15px rgba(0,0,0,0.18)")
            .radius(2)
            .inner(1, rgb24(0xE8E8E8)),
        // Neon and futuristic
        f("neon-blue-magenta", "Neon Blue")
            .border(10, rgb24(0x00D9FF))
            .padding(6)
            .shadow("0 0 25px #00D9FF, 0 0 50px #00D9FF, inset 0 0 20px rgba(0,217,255,0.2)")
            .radius(5),
        f("neon-magenta", "Neon Magenta")
            .border(10, rgb24(0xFF00FF))
            .padding(6)
            .shadow("0 0 25px #FF00FF, 0 0 50px #FF00FF, inset 0 0 20px rgba(255,0,255,0.2)")
            .radius(5),
        f("futuristic-cyber", "Futuristic Cyber")
            .border(8, rgb24(0x1A1A2E))
            .padding(10)
            .background(linear(135.0, &[(0x0F3460, 0.0), (0x16213E, 1.0)]))
            .inner(2, rgb24(0x00D9FF))
            .shadow("0 0 30px rgba(0,217,255,0.5)")
            .radius(8),
        // Floral and watercolor
        f("floral-watercolor", "Floral Watercolor")
            .border(45, rgb24(0xFFF5F7))
            .padding(5)
            .background(Background::RadialGlow {
                layers: vec![
                    glow(0.1, 0.2, Color::rgba(255, 182, 193, 102), 0.5),
                    glow(0.9, 0.8, Color::rgba(152, 251, 152, 77), 0.5),
                    glow(0.5, 0.5, Color::rgba(255, 218, 224, 51), 0.7),
                ],
            })
            .shadow("0 4px 20px rgba(255,182,193,0.3)")
            .radius(10),
        f("pastel-rose", "Pastel Rose")
            .border(22, rgb24(0xFFE5EC))
            .padding(12)
            .inner(2, rgb24(0xFFC1D5))
            .shadow("0 4px 20px rgba(255,193,213,0.3)")
            .radius(8),
        f("lavender-garden", "Lavender Garden")
            .border(24, rgb24(0xE6E6FA))
            .padding(10)
            .inner(2, rgb24(0x9370DB))
            .shadow("0 4px 20px rgba(147,112,219,0.3)")
            .background(Background::RadialGlow {
                layers: vec![glow(0.2, 0.3, Color::rgba(230, 230, 250, 204), 0.6)],
            })
            .radius(12),
        // Wooden and rustic
        f("rustic-oak", "Rustic Oak")
            .border(32, rgb24(0x8B6F47))
            .padding(5)
            .background(repeating(
                90.0,
                &[(0x8B6F47, 0.0), (0x7A5C3A, 1.0), (0x8B6F47, 2.0), (0x9B7F57, 10.0)],
            ))
            .shadow("0 6px 25px rgba(90,60,30,0.5)"),
        f("weathered-wood", "Weathered Wood")
            .border(35, rgb24(0x704214))
            .padding(5)
            .background(linear(
                180.0,
                &[(0x704214, 0.0), (0x5C3317, 0.3), (0x704214, 0.6), (0x5C3317, 1.0)],
            ))
            .shadow("0 6px 25px rgba(92,51,23,0.5)"),
        f("barn-wood", "Barn Wood")
            .border(30, rgb24(0x6B4423))
            .padding(8)
            .background(repeating(
                180.0,
                &[(0x6B4423, 0.0), (0x5A3820, 3.0), (0x6B4423, 6.0)],
            ))
            .shadow("0 5px 20px rgba(75,50,30,0.45)"),
        // Metallic
        f("brushed-steel", "Brushed Steel")
            .border(18, rgb24(0xB8B8B8))
            .padding(10)
            .background(linear(
                90.0,
                &[(0xC0C0C0, 0.0), (0xA8A8A8, 0.5), (0xC0C0C0, 1.0)],
            ))
            .inner(1, rgb24(0x888888))
            .shadow("0 5px 20px rgba(128,128,128,0.4)"),
        f("polished-chrome", "Polished Chrome")
            .border(15, rgb24(0xD4D4D4))
            .padding(12)
            .background(linear(
                135.0,
                &[(0xE8E8E8, 0.0), (0xC0C0C0, 0.5), (0xE8E8E8, 1.0)],
            ))
            .shadow("0 4px 18px rgba(160,160,160,0.35)")
            .inner(2, rgb24(0xA0A0A0)),
        f("gold-luxury", "Gold Luxury")
            .border(25, rgb24(0xFFD700))
            .padding(8)
            .inner(3, rgb24(0xB8860B))
            .shadow("0 6px 25px rgba(218,165,32,0.4)")
            .background(linear(
                135.0,
                &[(0xFFD700, 0.0), (0xFFA500, 0.5), (0xFFD700, 1.0)],
            )),
        // Gallery
        f("gallery-mat", "Gallery Mat")
            .border(45, rgb24(0xF8F8F8))
            .padding(0)
            .inner(1, rgb24(0xCCCCCC))
            .shadow("0 8px 30px rgba(0,0,0,0.15)"),
        f("museum-white", "Museum White")
            .border(40, rgb24(0xFAFAFA))
            .padding(5)
            .inner(2, rgb24(0xE0E0E0))
            .shadow("0 6px 25px rgba(0,0,0,0.12)"),
        f("classic-black", "Classic Black")
            .border(20, rgb24(0x1C1C1C))
            .padding(8)
            .inner(1, rgb24(0x000000))
            .shadow("0 5px 20px rgba(0,0,0,0.4)"),
        // Film and retro
        f("film-strip", "Film Strip")
            .border(25, rgb24(0x1A1A1A))
            .padding(5)
            .with_holes()
            .shadow("0 4px 15px rgba(0,0,0,0.4)"),
        f("retro-orange", "Retro Orange")
            .border(22, rgb24(0xFF8C42))
            .padding(12)
            .inner(3, rgb24(0xFFFFFF))
            .shadow("0 5px 20px rgba(255,140,66,0.4)")
            .radius(5),
        f("vintage-yellow", "Vintage Yellow")
            .border(20, rgb24(0xFFD93D))
            .padding(10)
            .inner(2, rgb24(0xFFA500))
            .shadow("0 4px 18px rgba(255,217,61,0.35)"),
        // Modern colorful
        f("ocean-blue", "Ocean Blue")
            .border(20, rgb24(0x4A90E2))
            .padding(10)
            .inner(2, rgb24(0xFFFFFF))
            .shadow("0 4px 20px rgba(74,144,226,0.35)")
            .radius(8),
        f("coral-sunset", "Coral Sunset")
            .border(22, rgb24(0xFF7F50))
            .padding(12)
            .inner(3, rgb24(0xFFE4C4))
            .shadow("0 5px 20px rgba(255,127,80,0.35)")
            .radius(10),
        f("emerald-jewel", "Emerald Jewel")
            .border(24, rgb24(0x50C878))
            .padding(10)
            .inner(3, rgb24(0x2C5F2D))
            .shadow("0 6px 25px rgba(80,200,120,0.4)"),
        // Gradient
        f("sunset-gradient", "Sunset Gradient")
            .border(20, rgb24(0xFF6B6A))
            .padding(8)
            .background(linear(
                135.0,
                &[(0xFF6B6A, 0.0), (0xFFD93D, 0.5), (0xFF6B6A, 1.0)],
            ))
            .shadow("0 5px 25px rgba(255,107,106,0.4)")
            .radius(12),
        f("rainbow-pride", "Rainbow Pride")
            .border(15, rgb24(0xFF0000))
            .padding(5)
            .background(linear(
                180.0,
                &[
                    (0xFF0000, 0.0),
                    (0xFF7F00, 0.166),
                    (0xFFFF00, 0.333),
                    (0x00FF00, 0.5),
                    (0x0000FF, 0.666),
                    (0x4B0082, 0.833),
                    (0x9400D3, 1.0),
                ],
            ))
            .shadow("0 5px 20px rgba(255,0,0,0.3)")
            .radius(8),
        f("purple-haze", "Purple Haze")
            .border(18, rgb24(0x9B59B6))
            .padding(10)
            .background(linear(135.0, &[(0x667EEA, 0.0), (0x764BA2, 1.0)]))
            .shadow("0 6px 25px rgba(102,126,234,0.4)")
            .radius(15),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/frames.rs"]
mod tests;

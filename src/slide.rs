use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use uuid::Uuid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum SlideType {
    Hero,
    Article,
    ContentImage,
    List,
    Process,
    Timeline,
    Comparison,
    Stats,
    BigNumber,
    Grid,
    Quote,
    Team,
    Gallery,
    Cta,
}

impl SlideType {
    /// Closed set of template variants, in builder palette order.
    pub fn all() -> Vec<SlideType> {
        SlideType::iter().collect()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Section {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Sans,
    Serif,
    Mono,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Default,
    Solid,
    Gradient,
    Image,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    None,
    Dots,
    Grid,
    Lines,
    Checker,
    Noise,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Cover,
    Contain,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationType {
    FadeUp,
    FadeIn,
    Zoom,
    SlideRight,
    SlideLeft,
}

/// Optional visual parameters embedded by value in a slide. Every field is
/// optional; unset fields resolve to defaults at render time.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideStyle {
    // typography
    pub font_family: Option<FontFamily>,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_size_scale: Option<f32>,
    pub font_weight: Option<FontWeight>,

    // background
    pub background_type: Option<BackgroundType>,
    pub background_color: Option<String>,
    pub gradient_colors: Option<[String; 2]>,
    pub gradient_degree: Option<f32>,
    pub gradient_type: Option<GradientType>,

    // patterns & overlays
    pub pattern: Option<PatternType>,
    pub pattern_opacity: Option<f32>,
    pub overlay_color: Option<String>,
    pub overlay_opacity: Option<f32>,

    // frame
    pub border_width: Option<f32>,
    pub border_color: Option<String>,
    pub border_radius: Option<f32>,

    // layout
    pub text_alignment: Option<TextAlignment>,
    pub content_width: Option<f32>, // 50 to 100, percent

    // image
    pub image_scale: Option<f32>,
    pub image_offset_x: Option<f32>,
    pub image_offset_y: Option<f32>,
    pub image_fit: Option<ImageFit>,
    pub image_opacity: Option<f32>,
    pub image_rotation: Option<f32>,

    // animation
    pub animation: Option<AnimationType>,
    pub animation_duration: Option<f32>,
    pub animation_delay: Option<f32>,
    pub animation_easing: Option<String>,
}

/// Every style field with defaults applied, for the rendering collaborator.
#[derive(Clone, PartialEq, Debug)]
pub struct ResolvedStyle {
    pub font_family: FontFamily,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_size_scale: f32,
    pub font_weight: FontWeight,
    pub background_type: BackgroundType,
    pub background_color: Option<String>,
    pub gradient_colors: Option<[String; 2]>,
    pub gradient_degree: f32,
    pub gradient_type: GradientType,
    pub pattern: PatternType,
    pub pattern_opacity: f32,
    pub overlay_color: Option<String>,
    pub overlay_opacity: f32,
    pub border_width: f32,
    pub border_color: Option<String>,
    pub border_radius: f32,
    pub text_alignment: TextAlignment,
    pub content_width: f32,
    pub image_scale: f32,
    pub image_offset_x: f32,
    pub image_offset_y: f32,
    pub image_fit: ImageFit,
    pub image_opacity: f32,
    pub image_rotation: f32,
    pub animation: AnimationType,
    pub animation_duration: f32,
    pub animation_delay: f32,
    pub animation_easing: Option<String>,
}

impl SlideStyle {
    pub fn resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            font_family: self.font_family.unwrap_or(FontFamily::Sans),
            text_color: self.text_color.clone(),
            accent_color: self.accent_color.clone(),
            font_size_scale: self.font_size_scale.unwrap_or(1.0),
            font_weight: self.font_weight.unwrap_or(FontWeight::Normal),
            background_type: self.background_type.unwrap_or(BackgroundType::Default),
            background_color: self.background_color.clone(),
            gradient_colors: self.gradient_colors.clone(),
            gradient_degree: self.gradient_degree.unwrap_or(135.0),
            gradient_type: self.gradient_type.unwrap_or(GradientType::Linear),
            pattern: self.pattern.unwrap_or(PatternType::None),
            pattern_opacity: self.pattern_opacity.unwrap_or(0.5),
            overlay_color: self.overlay_color.clone(),
            overlay_opacity: self.overlay_opacity.unwrap_or(0.0),
            border_width: self.border_width.unwrap_or(0.0),
            border_color: self.border_color.clone(),
            border_radius: self.border_radius.unwrap_or(0.0),
            text_alignment: self.text_alignment.unwrap_or(TextAlignment::Left),
            content_width: self.content_width.unwrap_or(100.0),
            image_scale: self.image_scale.unwrap_or(1.0),
            image_offset_x: self.image_offset_x.unwrap_or(0.0),
            image_offset_y: self.image_offset_y.unwrap_or(0.0),
            image_fit: self.image_fit.unwrap_or(ImageFit::Cover),
            image_opacity: self.image_opacity.unwrap_or(1.0),
            image_rotation: self.image_rotation.unwrap_or(0.0),
            animation: self.animation.unwrap_or(AnimationType::FadeUp),
            animation_duration: self.animation_duration.unwrap_or(0.8),
            animation_delay: self.animation_delay.unwrap_or(0.0),
            animation_easing: self.animation_easing.clone(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image_url: Option<String>,
}

/// Type-specific structured data. Known keys are typed; anything else a
/// saved document carries rides along in `extra` so round trips are lossless.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<TeamMember>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SlideData {
    pub id: String,
    pub section_id: String,
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub enable_image: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<SlideStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SlideMetadata>,
}

/// Partial update record: set fields overwrite, unset fields keep the
/// slide's current value.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SlidePatch {
    pub section_id: Option<String>,
    pub slide_type: Option<SlideType>,
    pub title: Option<String>,
    pub subtitle: Option<Option<String>>,
    pub content: Option<Option<String>>,
    pub bullets: Option<Option<Vec<String>>>,
    pub image_url: Option<Option<String>>,
    pub enable_image: Option<bool>,
    pub style: Option<Option<SlideStyle>>,
    pub metadata: Option<Option<SlideMetadata>>,
}

impl SlidePatch {
    pub fn apply(&self, slide: &mut SlideData) {
        if let Some(section_id) = &self.section_id {
            slide.section_id = section_id.clone();
        }
        if let Some(slide_type) = self.slide_type {
            slide.slide_type = slide_type;
        }
        if let Some(title) = &self.title {
            slide.title = title.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            slide.subtitle = subtitle.clone();
        }
        if let Some(content) = &self.content {
            slide.content = content.clone();
        }
        if let Some(bullets) = &self.bullets {
            slide.bullets = bullets.clone();
        }
        if let Some(image_url) = &self.image_url {
            slide.image_url = image_url.clone();
        }
        if let Some(enable_image) = self.enable_image {
            slide.enable_image = enable_image;
        }
        if let Some(style) = &self.style {
            slide.style = style.clone();
        }
        if let Some(metadata) = &self.metadata {
            slide.metadata = metadata.clone();
        }
    }
}

impl SlidePatch {
    /// Fold a later patch into this one; later set fields win. Used when
    /// debounced keystrokes stack up before the quiet period elapses.
    pub fn merge(&mut self, later: &SlidePatch) {
        if later.section_id.is_some() {
            self.section_id = later.section_id.clone();
        }
        if later.slide_type.is_some() {
            self.slide_type = later.slide_type;
        }
        if later.title.is_some() {
            self.title = later.title.clone();
        }
        if later.subtitle.is_some() {
            self.subtitle = later.subtitle.clone();
        }
        if later.content.is_some() {
            self.content = later.content.clone();
        }
        if later.bullets.is_some() {
            self.bullets = later.bullets.clone();
        }
        if later.image_url.is_some() {
            self.image_url = later.image_url.clone();
        }
        if later.enable_image.is_some() {
            self.enable_image = later.enable_image;
        }
        if later.style.is_some() {
            self.style = later.style.clone();
        }
        if later.metadata.is_some() {
            self.metadata = later.metadata.clone();
        }
    }
}

/// One bullet decoded from the "label: value" convention used by the
/// timeline, stats, process, and cta templates.
///
/// Splits on the first colon only; a label containing a literal colon will
/// mis-split. Saved documents rely on this exact behavior, so it stays.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LabeledItem {
    pub label: Option<String>,
    pub text: String,
}

impl LabeledItem {
    pub fn from_bullet(bullet: &str) -> Self {
        match bullet.split_once(':') {
            Some((label, rest)) => LabeledItem {
                label: Some(label.trim().to_string()),
                text: rest.trim().to_string(),
            },
            None => LabeledItem {
                label: None,
                text: bullet.trim().to_string(),
            },
        }
    }

    pub fn to_bullet(&self) -> String {
        match &self.label {
            Some(label) => format!("{}: {}", label, self.text),
            None => self.text.clone(),
        }
    }
}

pub fn new_slide_id() -> String {
    format!("s-{}", Uuid::new_v4().simple())
}

pub fn new_section_id() -> String {
    format!("sec-{}", Uuid::new_v4().simple())
}

pub const NEW_SLIDE_TITLE: &str = "New Slide";
pub const NEW_SLIDE_SUBTITLE: &str = "Double click to edit";
pub const COPY_SUFFIX: &str = " (Copy)";

/// Built-in starter deck restored by a reset and used when nothing has been
/// saved yet. Callers get fresh copies, never shared references.
pub fn default_slides() -> Vec<SlideData> {
    vec![
        SlideData {
            id: "s1".to_string(),
            section_id: "sec1".to_string(),
            slide_type: SlideType::Hero,
            title: "Introduction".to_string(),
            subtitle: Some("Redefining presentations with the power of the **spatial web**.".to_string()),
            content: Some("Radikal Vision".to_string()),
            bullets: None,
            image_url: None,
            enable_image: false,
            style: Some(SlideStyle {
                font_family: Some(FontFamily::Serif),
                background_type: Some(BackgroundType::Gradient),
                gradient_colors: Some(["#0f172a".to_string(), "#312e81".to_string()]),
                text_color: Some("#e0e7ff".to_string()),
                accent_color: Some("#6366f1".to_string()),
                animation: Some(AnimationType::FadeIn),
                ..SlideStyle::default()
            }),
            metadata: None,
        },
        SlideData {
            id: "s2".to_string(),
            section_id: "sec1".to_string(),
            slide_type: SlideType::ContentImage,
            title: "Immersive Experiences".to_string(),
            subtitle: None,
            content: Some(
                "Web technologies now allow for **cinema-grade 3D experiences** directly in the browser, accessible on any device without downloads.\n\n- No installation\n- High performance\n- Instant sharing"
                    .to_string(),
            ),
            bullets: None,
            image_url: Some("https://images.unsplash.com/photo-1550751827-4bd374c3f58b?q=80&w=2070&auto=format&fit=crop".to_string()),
            enable_image: true,
            style: Some(SlideStyle {
                image_fit: Some(ImageFit::Cover),
                ..SlideStyle::default()
            }),
            metadata: None,
        },
        SlideData {
            id: "s3".to_string(),
            section_id: "sec2".to_string(),
            slide_type: SlideType::List,
            title: "Why It Matters".to_string(),
            subtitle: None,
            content: None,
            bullets: Some(vec![
                "Engage audiences instantly".to_string(),
                "Break free from static slides".to_string(),
                "Data-driven 3D visualizations".to_string(),
                "Works on all modern devices".to_string(),
            ]),
            image_url: Some("https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=2000&auto=format&fit=crop".to_string()),
            enable_image: true,
            style: None,
            metadata: None,
        },
        SlideData {
            id: "s4".to_string(),
            section_id: "sec2".to_string(),
            slide_type: SlideType::Timeline,
            title: "Evolution".to_string(),
            subtitle: Some("The journey of presentation tech".to_string()),
            content: None,
            bullets: Some(vec![
                "1987: PowerPoint Launched".to_string(),
                "2006: Google Slides".to_string(),
                "2011: Prezi Zooming UI".to_string(),
                "2024: Spatial Web 3D".to_string(),
            ]),
            image_url: None,
            enable_image: false,
            style: Some(SlideStyle {
                accent_color: Some("#8b5cf6".to_string()),
                ..SlideStyle::default()
            }),
            metadata: None,
        },
    ]
}

pub fn default_sections() -> Vec<Section> {
    vec![
        Section {
            id: "sec1".to_string(),
            title: "Introduction".to_string(),
        },
        Section {
            id: "sec2".to_string(),
            title: "Technology".to_string(),
        },
        Section {
            id: "sec3".to_string(),
            title: "Impact".to_string(),
        },
    ]
}

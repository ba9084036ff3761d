use crate::slide::SlideData;

/// Discrete typography/spacing buckets, densest first. A slide carrying a
/// lot of text gets the compact treatment so it still fits the card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum DensityTier {
    Spacious,
    Roomy,
    Standard,
    Snug,
    Compact,
}

/// Spacing and size classes handed to the rendering templates. The class
/// strings are the renderer's vocabulary; the engine only picks the row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayoutSpec {
    pub padding: &'static str,
    pub gap: &'static str,
    pub spacing: &'static str,
    pub title_size: &'static str,
    pub subtitle_size: &'static str,
    pub body_size: &'static str,
    pub small_size: &'static str,
    pub icon_size: u32,
}

const COMPACT: LayoutSpec = LayoutSpec {
    padding: "p-4 md:p-6",
    gap: "gap-4",
    spacing: "space-y-2",
    title_size: "text-lg md:text-2xl",
    subtitle_size: "text-sm md:text-base",
    body_size: "text-xs md:text-sm",
    small_size: "text-[10px]",
    icon_size: 16,
};

const SNUG: LayoutSpec = LayoutSpec {
    padding: "p-5 md:p-8",
    gap: "gap-4 md:gap-6",
    spacing: "space-y-3",
    title_size: "text-xl md:text-3xl",
    subtitle_size: "text-base md:text-lg",
    body_size: "text-sm md:text-base",
    small_size: "text-xs",
    icon_size: 20,
};

const STANDARD: LayoutSpec = LayoutSpec {
    padding: "p-6 md:p-10",
    gap: "gap-6 md:gap-8",
    spacing: "space-y-3 md:space-y-4",
    title_size: "text-2xl md:text-4xl",
    subtitle_size: "text-lg md:text-xl",
    body_size: "text-sm md:text-lg",
    small_size: "text-xs md:text-sm",
    icon_size: 24,
};

const ROOMY: LayoutSpec = LayoutSpec {
    padding: "p-8 md:p-12",
    gap: "gap-8 md:gap-10",
    spacing: "space-y-4 md:space-y-6",
    title_size: "text-3xl md:text-5xl",
    subtitle_size: "text-xl md:text-3xl",
    body_size: "text-base md:text-xl",
    small_size: "text-sm md:text-base",
    icon_size: 28,
};

const SPACIOUS: LayoutSpec = LayoutSpec {
    padding: "p-8 md:p-16",
    gap: "gap-8 md:gap-12",
    spacing: "space-y-6 md:space-y-8",
    title_size: "text-4xl md:text-7xl",
    subtitle_size: "text-2xl md:text-4xl",
    body_size: "text-lg md:text-2xl",
    small_size: "text-base md:text-lg",
    icon_size: 32,
};

/// Weighted character count of a slide's textual payload. Titles dominate
/// (largest type), bullets cost a flat amount each, and an active image
/// scales the whole score since it halves the room for text.
pub fn density_score(slide: &SlideData) -> f32 {
    let mut score = 0.0;
    score += slide.title.chars().count() as f32 * 1.5;
    if let Some(subtitle) = &slide.subtitle {
        score += subtitle.chars().count() as f32;
    }
    if let Some(content) = &slide.content {
        score += content.chars().count() as f32 * 0.5;
    }
    if let Some(bullets) = &slide.bullets {
        score += bullets.len() as f32 * 15.0;
    }
    if slide.enable_image && slide.image_url.is_some() {
        score *= 1.8;
    }
    score
}

pub fn density_tier(slide: &SlideData) -> DensityTier {
    tier_for_score(density_score(slide))
}

pub fn tier_for_score(score: f32) -> DensityTier {
    if score > 600.0 {
        DensityTier::Compact
    } else if score > 400.0 {
        DensityTier::Snug
    } else if score > 200.0 {
        DensityTier::Standard
    } else if score > 100.0 {
        DensityTier::Roomy
    } else {
        DensityTier::Spacious
    }
}

pub fn layout_for_tier(tier: DensityTier) -> LayoutSpec {
    match tier {
        DensityTier::Compact => COMPACT,
        DensityTier::Snug => SNUG,
        DensityTier::Standard => STANDARD,
        DensityTier::Roomy => ROOMY,
        DensityTier::Spacious => SPACIOUS,
    }
}

pub fn layout_for_slide(slide: &SlideData) -> LayoutSpec {
    layout_for_tier(density_tier(slide))
}

//! Page-builder blocks.
//!
//! A page's `blocks` array is a tagged union: every record carries a `_type`
//! discriminator naming one of the block types below. [`Block`] is that union
//! as a Rust enum; [`BlockEntry`] wraps one array element and keeps records
//! the renderer can't use (unknown discriminator, undecodable fields) instead
//! of failing the whole page.
//!
//! Field defaults mirror the studio's initial values, so a block saved before
//! a field existed renders the same way the studio previews it.

use crate::choice::choice;
use crate::documents::{Cta, Destination, ImageRef, nullable};
use crate::portable_text::PortableText;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Every block discriminator the renderer understands, in catalog order.
pub const BLOCK_TYPES: &[&str] = &[
    "heroBlock",
    "textBlock",
    "imageBlock",
    "destinationGridBlock",
    "ctaBlock",
    "headingBlock",
    "spacerBlock",
    "bannerAlertBlock",
    "quoteBlock",
    "twoColumnTextBlock",
    "textImageBlock",
    "cardGridBlock",
    "accordionBlock",
    "tabBlock",
    "imageGalleryBlock",
    "videoBlock",
    "mapBlock",
    "statsBlock",
    "amenitiesBlock",
    "pricingCardBlock",
    "packageBlock",
    "testimonialCarouselBlock",
    "weatherBlock",
    "sectionWrapperBlock",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum Block {
    HeroBlock(HeroBlock),
    TextBlock(TextBlock),
    ImageBlock(ImageBlock),
    DestinationGridBlock(DestinationGridBlock),
    CtaBlock(CtaBlock),
    HeadingBlock(HeadingBlock),
    SpacerBlock(SpacerBlock),
    BannerAlertBlock(BannerAlertBlock),
    QuoteBlock(QuoteBlock),
    TwoColumnTextBlock(TwoColumnTextBlock),
    TextImageBlock(TextImageBlock),
    CardGridBlock(CardGridBlock),
    AccordionBlock(AccordionBlock),
    TabBlock(TabBlock),
    ImageGalleryBlock(ImageGalleryBlock),
    VideoBlock(VideoBlock),
    MapBlock(MapBlock),
    StatsBlock(StatsBlock),
    AmenitiesBlock(AmenitiesBlock),
    PricingCardBlock(PricingCardBlock),
    PackageBlock(PackageBlock),
    TestimonialCarouselBlock(TestimonialCarouselBlock),
    WeatherBlock(WeatherBlock),
    SectionWrapperBlock(SectionWrapperBlock),
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::HeroBlock(_) => "heroBlock",
            Block::TextBlock(_) => "textBlock",
            Block::ImageBlock(_) => "imageBlock",
            Block::DestinationGridBlock(_) => "destinationGridBlock",
            Block::CtaBlock(_) => "ctaBlock",
            Block::HeadingBlock(_) => "headingBlock",
            Block::SpacerBlock(_) => "spacerBlock",
            Block::BannerAlertBlock(_) => "bannerAlertBlock",
            Block::QuoteBlock(_) => "quoteBlock",
            Block::TwoColumnTextBlock(_) => "twoColumnTextBlock",
            Block::TextImageBlock(_) => "textImageBlock",
            Block::CardGridBlock(_) => "cardGridBlock",
            Block::AccordionBlock(_) => "accordionBlock",
            Block::TabBlock(_) => "tabBlock",
            Block::ImageGalleryBlock(_) => "imageGalleryBlock",
            Block::VideoBlock(_) => "videoBlock",
            Block::MapBlock(_) => "mapBlock",
            Block::StatsBlock(_) => "statsBlock",
            Block::AmenitiesBlock(_) => "amenitiesBlock",
            Block::PricingCardBlock(_) => "pricingCardBlock",
            Block::PackageBlock(_) => "packageBlock",
            Block::TestimonialCarouselBlock(_) => "testimonialCarouselBlock",
            Block::WeatherBlock(_) => "weatherBlock",
            Block::SectionWrapperBlock(_) => "sectionWrapperBlock",
        }
    }
}

/// One element of a block array.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEntry {
    Known(Block),
    /// Discriminator the renderer has no entry for.
    Unknown { kind: String },
    /// Known discriminator whose fields failed to decode.
    Malformed { kind: String, error: String },
}

impl BlockEntry {
    pub fn kind(&self) -> &str {
        match self {
            BlockEntry::Known(block) => block.kind(),
            BlockEntry::Unknown { kind } | BlockEntry::Malformed { kind, .. } => kind,
        }
    }
}

impl From<Block> for BlockEntry {
    fn from(block: Block) -> Self {
        BlockEntry::Known(block)
    }
}

impl<'de> Deserialize<'de> for BlockEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !BLOCK_TYPES.contains(&kind.as_str()) {
            return Ok(BlockEntry::Unknown { kind });
        }
        Ok(match serde_json::from_value::<Block>(value) {
            Ok(block) => BlockEntry::Known(block),
            Err(e) => BlockEntry::Malformed {
                kind,
                error: e.to_string(),
            },
        })
    }
}

fn yes() -> bool {
    true
}

// ============================================================================
// Shared option lists
// ============================================================================

choice! {
    /// Max width of a media block.
    pub enum MaxWidth {
        Small => "small",
        Medium => "medium",
        Large => "large",
        Full => "full",
    }
    default Large
}

impl MaxWidth {
    pub fn css(self) -> &'static str {
        match self {
            MaxWidth::Small => "600px",
            MaxWidth::Medium => "800px",
            MaxWidth::Large => "1000px",
            MaxWidth::Full => "100%",
        }
    }
}

choice! {
    pub enum TextAlign {
        Left => "left",
        Center => "center",
        Right => "right",
    }
    default Center
}

choice! {
    pub enum VerticalAlign {
        Top => "flex-start",
        Center => "center",
        Bottom => "flex-end",
    }
    default Top
}

choice! {
    pub enum Gap {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
    default Medium
}

impl Gap {
    pub fn pixels(self) -> u32 {
        match self {
            Gap::Small => 16,
            Gap::Medium => 32,
            Gap::Large => 48,
        }
    }
}

choice! {
    pub enum Columns {
        One => "1",
        Two => "2",
        Three => "3",
        Four => "4",
        Five => "5",
        Auto => "auto",
    }
    default Three
}

impl Columns {
    /// Fixed column count, `None` for responsive auto-fill.
    pub fn count(self) -> Option<u8> {
        match self {
            Columns::One => Some(1),
            Columns::Two => Some(2),
            Columns::Three => Some(3),
            Columns::Four => Some(4),
            Columns::Five => Some(5),
            Columns::Auto => None,
        }
    }

    fn four() -> Self {
        Columns::Four
    }
}

fn left_align() -> TextAlign {
    TextAlign::Left
}

fn center_vertical() -> VerticalAlign {
    VerticalAlign::Center
}

// ============================================================================
// Hero, text, image
// ============================================================================

choice! {
    pub enum HeroHeight {
        Small => "40vh",
        Medium => "60vh",
        Large => "80vh",
        Full => "100vh",
    }
    default Medium
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<ImageRef>,
    pub cta: Option<Cta>,
    #[serde(default)]
    pub height: HeroHeight,
    #[serde(default = "yes")]
    pub overlay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub content: PortableText,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageBlock {
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub size: MaxWidth,
}

// ============================================================================
// Destinations, CTA, heading, spacer, alert, quote
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationGridBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub destinations: Vec<Destination>,
    pub columns: Option<u8>,
    #[serde(default, deserialize_with = "nullable")]
    pub show_featured_only: bool,
}

impl DestinationGridBlock {
    /// Column count from the studio's 2/3/4 list, 3 otherwise.
    pub fn column_count(&self) -> u8 {
        match self.columns {
            Some(n @ 2..=4) => n,
            _ => 3,
        }
    }

    /// Resolved destinations to show, honoring `showFeaturedOnly`.
    pub fn visible(&self) -> impl Iterator<Item = &Destination> {
        self.destinations
            .iter()
            .filter(|d| d.is_resolved())
            .filter(move |d| !self.show_featured_only || d.featured)
    }
}

choice! {
    pub enum CtaBlockStyle {
        Centered => "centered",
        Left => "left",
        Background => "background",
    }
    default Centered
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub subtitle: Option<String>,
    pub cta: Option<Cta>,
    pub background_image: Option<ImageRef>,
    #[serde(default)]
    pub style: CtaBlockStyle,
}

choice! {
    pub enum HeadingLevel {
        H1 => "h1",
        H2 => "h2",
        H3 => "h3",
        H4 => "h4",
        H5 => "h5",
        H6 => "h6",
    }
    default H2
}

choice! {
    pub enum HeadingStyle {
        Default => "default",
        Accent => "accent",
        Eyebrow => "eyebrow",
    }
    default Default
}

choice! {
    pub enum Spacing {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
    default Medium
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeadingBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default)]
    pub level: HeadingLevel,
    #[serde(default = "left_align")]
    pub alignment: TextAlign,
    #[serde(default)]
    pub style: HeadingStyle,
    #[serde(default)]
    pub spacing: Spacing,
}

choice! {
    pub enum SpacerHeight {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Custom => "custom",
    }
    default Md
}

choice! {
    pub enum DividerStyle {
        None => "none",
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
    }
    default None
}

choice! {
    pub enum DividerWidth {
        Full => "full",
        Contained => "contained",
        Short => "short",
    }
    default Full
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerBlock {
    #[serde(default)]
    pub height: SpacerHeight,
    pub custom_height: Option<f64>,
    #[serde(default)]
    pub divider_style: DividerStyle,
    #[serde(default)]
    pub divider_width: DividerWidth,
}

impl SpacerBlock {
    /// Height in pixels. A custom height outside 1..=500 falls back to medium.
    pub fn pixels(&self) -> u32 {
        match self.height {
            SpacerHeight::Xs => 16,
            SpacerHeight::Sm => 32,
            SpacerHeight::Md => 64,
            SpacerHeight::Lg => 96,
            SpacerHeight::Xl => 128,
            SpacerHeight::Custom => match self.custom_height {
                Some(h) if (1.0..=500.0).contains(&h) => h.round() as u32,
                _ => 64,
            },
        }
    }
}

choice! {
    pub enum AlertKind {
        Info => "info",
        Success => "success",
        Warning => "warning",
        Error => "error",
        Promotion => "promotion",
    }
    default Info
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerAlertBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: AlertKind,
    #[serde(default = "yes")]
    pub show_icon: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub dismissible: bool,
    pub cta: Option<Cta>,
}

choice! {
    pub enum QuoteStyle {
        Default => "default",
        Featured => "featured",
        Minimal => "minimal",
    }
    default Default
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub quote: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: String,
    pub author_title: Option<String>,
    pub author_image: Option<ImageRef>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub style: QuoteStyle,
    #[serde(default)]
    pub alignment: TextAlign,
}

// ============================================================================
// Layout blocks: columns, text + image, cards, accordion, tabs
// ============================================================================

choice! {
    pub enum ColumnRatio {
        Even => "50-50",
        SixtyForty => "60-40",
        FortySixty => "40-60",
        SeventyThirty => "70-30",
        ThirtySeventy => "30-70",
    }
    default Even
}

impl ColumnRatio {
    /// CSS grid track sizes.
    pub fn tracks(self) -> &'static str {
        match self {
            ColumnRatio::Even => "1fr 1fr",
            ColumnRatio::SixtyForty => "3fr 2fr",
            ColumnRatio::FortySixty => "2fr 3fr",
            ColumnRatio::SeventyThirty => "7fr 3fr",
            ColumnRatio::ThirtySeventy => "3fr 7fr",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoColumnTextBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub left_column: PortableText,
    #[serde(default, deserialize_with = "nullable")]
    pub right_column: PortableText,
    #[serde(default)]
    pub column_ratio: ColumnRatio,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub gap: Gap,
}

choice! {
    pub enum ImagePosition {
        Left => "left",
        Right => "right",
        Top => "top",
        Bottom => "bottom",
    }
    default Right
}

choice! {
    pub enum ImageShare {
        Thirty => "30",
        Forty => "40",
        Fifty => "50",
        Sixty => "60",
    }
    default Fifty
}

choice! {
    pub enum ImageStyle {
        Rounded => "rounded",
        Square => "square",
        Shadow => "shadow",
    }
    default Rounded
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextImageBlock {
    #[serde(default, deserialize_with = "nullable")]
    pub content: PortableText,
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub image_position: ImagePosition,
    #[serde(default)]
    pub image_size: ImageShare,
    #[serde(default = "center_vertical")]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub image_style: ImageStyle,
    #[serde(default, deserialize_with = "nullable")]
    pub reverse_on_mobile: bool,
}

choice! {
    pub enum CardStyle {
        Default => "default",
        Outlined => "outlined",
        Elevated => "elevated",
        Flat => "flat",
    }
    default Default
}

choice! {
    pub enum IconPosition {
        Top => "top",
        Left => "left",
    }
    default Top
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Card {
    pub icon: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub link: Option<Cta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGridBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default)]
    pub card_style: CardStyle,
    #[serde(default)]
    pub icon_position: IconPosition,
    #[serde(default)]
    pub text_align: TextAlign,
}

choice! {
    pub enum AccordionStyle {
        Default => "default",
        Bordered => "bordered",
        Cards => "cards",
    }
    default Default
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccordionItem {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content: PortableText,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<AccordionItem>,
    #[serde(default)]
    pub style: AccordionStyle,
    #[serde(default, deserialize_with = "nullable")]
    pub allow_multiple: bool,
    #[serde(default = "yes")]
    pub first_open: bool,
}

choice! {
    pub enum TabStyle {
        Standard => "standard",
        Scrollable => "scrollable",
    }
    default Standard
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default, deserialize_with = "nullable")]
    pub tab_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content: PortableText,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub tab_style: TabStyle,
    #[serde(default)]
    pub tab_alignment: TextAlign,
}

// ============================================================================
// Media: gallery, video, map
// ============================================================================

choice! {
    pub enum GalleryLayout {
        Grid => "grid",
        Masonry => "masonry",
        Carousel => "carousel",
    }
    default Grid
}

choice! {
    pub enum GalleryAspect {
        Square => "1/1",
        Classic => "4/3",
        Wide => "16/9",
        Original => "original",
    }
    default Wide
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGalleryBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub layout: GalleryLayout,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default)]
    pub gap: Gap,
    #[serde(default)]
    pub aspect_ratio: GalleryAspect,
    #[serde(default = "yes")]
    pub show_captions: bool,
    #[serde(default = "yes")]
    pub enable_lightbox: bool,
}

choice! {
    pub enum VideoSource {
        Youtube => "youtube",
        Vimeo => "vimeo",
    }
    default Youtube
}

choice! {
    pub enum VideoAspect {
        Wide => "16/9",
        Classic => "4/3",
        Ultrawide => "21/9",
        Square => "1/1",
    }
    default Wide
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBlock {
    pub title: Option<String>,
    #[serde(default)]
    pub video_source: VideoSource,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    pub thumbnail: Option<ImageRef>,
    #[serde(default)]
    pub aspect_ratio: VideoAspect,
    pub caption: Option<String>,
    #[serde(default)]
    pub max_width: MaxWidth,
}

choice! {
    pub enum MapType {
        Embed => "embed",
        Static => "static",
    }
    default Embed
}

choice! {
    pub enum MapIcon {
        Pin => "pin",
        Hotel => "hotel",
        Airport => "airport",
        Beach => "beach",
        Restaurant => "restaurant",
        Shopping => "shopping",
        Attraction => "attraction",
    }
    default Pin
}

impl MapIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            MapIcon::Pin => "📍",
            MapIcon::Hotel => "🏨",
            MapIcon::Airport => "✈️",
            MapIcon::Beach => "🏖️",
            MapIcon::Restaurant => "🍽️",
            MapIcon::Shopping => "🛍️",
            MapIcon::Attraction => "🎭",
        }
    }
}

choice! {
    pub enum MapHeight {
        Small => "300",
        Medium => "450",
        Large => "600",
        ExtraLarge => "800",
    }
    default Medium
}

impl MapHeight {
    pub fn pixels(self) -> u32 {
        match self {
            MapHeight::Small => 300,
            MapHeight::Medium => 450,
            MapHeight::Large => 600,
            MapHeight::ExtraLarge => 800,
        }
    }
}

choice! {
    pub enum ListPosition {
        Right => "right",
        Left => "left",
        Below => "below",
    }
    default Right
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapLocation {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub icon: MapIcon,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub map_type: MapType,
    pub embed_url: Option<String>,
    pub static_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub locations: Vec<MapLocation>,
    #[serde(default)]
    pub height: MapHeight,
    #[serde(default = "yes")]
    pub show_location_list: bool,
    #[serde(default)]
    pub location_list_position: ListPosition,
    #[serde(default = "yes")]
    pub border_radius: bool,
}

// ============================================================================
// Marketing: stats, amenities, pricing, packages, testimonials
// ============================================================================

choice! {
    pub enum StatsStyle {
        Minimal => "minimal",
        Boxed => "boxed",
        Highlighted => "highlighted",
    }
    default Minimal
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stat {
    #[serde(default, deserialize_with = "nullable")]
    pub number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    pub icon: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub stats: Vec<Stat>,
    #[serde(default = "Columns::four")]
    pub columns: Columns,
    #[serde(default)]
    pub style: StatsStyle,
    #[serde(default)]
    pub alignment: TextAlign,
}

choice! {
    pub enum AmenityLayout {
        Grid => "grid",
        List => "list",
        Columns => "columns",
    }
    default Grid
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Amenity {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    pub icon: Option<ImageRef>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenitiesBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub layout: AmenityLayout,
    #[serde(default = "Columns::four")]
    pub columns: Columns,
    #[serde(default = "yes")]
    pub show_icons: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub show_descriptions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricingCard {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub price: String,
    pub period: Option<String>,
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub features: Vec<String>,
    pub cta: Option<Cta>,
    #[serde(default, deserialize_with = "nullable")]
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricingCardBlock {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub cards: Vec<PricingCard>,
    #[serde(default)]
    pub columns: Columns,
}

fn per_person() -> String {
    "per person".to_string()
}

fn book_now() -> String {
    "Book Now".to_string()
}

fn travel_packages() -> Option<String> {
    Some("Travel Packages".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItineraryDay {
    pub day: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPackage {
    #[serde(default, deserialize_with = "nullable")]
    pub package_name: String,
    pub tagline: Option<String>,
    pub image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    pub price: Option<f64>,
    #[serde(default = "per_person")]
    pub price_note: String,
    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default, deserialize_with = "nullable")]
    pub included: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub not_included: Vec<String>,
    pub booking_url: Option<String>,
    #[serde(default = "book_now")]
    pub booking_text: String,
}

impl TravelPackage {
    /// Price as shown on cards: `$1,299`.
    pub fn display_price(&self) -> Option<String> {
        let price = self.price.filter(|p| p.is_finite() && *p >= 0.0)?;
        let whole = price.round() as u64;
        let digits = whole.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        Some(format!("${grouped}"))
    }
}

choice! {
    pub enum PackageLayout {
        Cards => "cards",
        List => "list",
        Comparison => "comparison",
    }
    default Cards
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageBlock {
    #[serde(default = "travel_packages")]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub packages: Vec<TravelPackage>,
    #[serde(default)]
    pub layout: PackageLayout,
    #[serde(default)]
    pub columns: Columns,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default, deserialize_with = "nullable")]
    pub quote: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: String,
    pub author_location: Option<String>,
    pub author_image: Option<ImageRef>,
    pub rating: Option<f64>,
}

choice! {
    pub enum CarouselLayout {
        Single => "single",
        Multi => "multi",
    }
    default Single
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCarouselBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub layout: CarouselLayout,
    #[serde(default = "yes")]
    pub autoplay: bool,
    #[serde(default = "yes")]
    pub show_navigation: bool,
    #[serde(default = "yes")]
    pub show_indicators: bool,
}

// ============================================================================
// Weather
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWeather {
    #[serde(default, deserialize_with = "nullable")]
    pub month: String,
    #[serde(default, deserialize_with = "nullable")]
    pub high_temp: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub low_temp: f64,
    pub rainfall: Option<f64>,
    pub rainy_days: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherBestTime {
    pub months: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMetrics {
    #[serde(default = "yes")]
    pub temperature: bool,
    #[serde(default = "yes")]
    pub rainfall: bool,
    #[serde(default)]
    pub rainy_days: bool,
    #[serde(default)]
    pub humidity: bool,
}

impl Default for ShowMetrics {
    fn default() -> Self {
        Self {
            temperature: true,
            rainfall: true,
            rainy_days: false,
            humidity: false,
        }
    }
}

choice! {
    pub enum WeatherDisplay {
        Chart => "chart",
        Table => "table",
        Cards => "cards",
    }
    default Chart
}

choice! {
    pub enum WeatherBackground {
        LightBlue => "lightblue",
        Grey => "grey",
        White => "white",
        Gradient => "gradient",
    }
    default LightBlue
}

impl WeatherBackground {
    pub fn css(self) -> &'static str {
        match self {
            WeatherBackground::LightBlue => "linear-gradient(135deg, #e3f2fd 0%, #bbdefb 100%)",
            WeatherBackground::Grey => "#fafafa",
            WeatherBackground::White => "#fff",
            WeatherBackground::Gradient => "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        }
    }
}

fn climate_and_weather() -> String {
    "Climate & Weather".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherBlock {
    #[serde(default = "climate_and_weather")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub monthly_data: Vec<MonthlyWeather>,
    pub best_time_to_visit: Option<WeatherBestTime>,
    #[serde(default)]
    pub display_style: WeatherDisplay,
    #[serde(default, deserialize_with = "nullable")]
    pub show_metrics: ShowMetrics,
    #[serde(default)]
    pub background_color: WeatherBackground,
}

impl WeatherBlock {
    /// Temperature span across all months: `(lowest low, highest high)`.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let min_low = self
            .monthly_data
            .iter()
            .map(|m| m.low_temp)
            .reduce(f64::min)?;
        let max_high = self
            .monthly_data
            .iter()
            .map(|m| m.high_temp)
            .reduce(f64::max)?;
        Some((min_low, max_high))
    }

    /// Chart bar width in percent for one month. A flat year renders at 50%.
    pub fn bar_width(&self, month: &MonthlyWeather) -> f64 {
        match self.temperature_range() {
            Some((min_low, max_high)) if max_high - min_low > 0.0 => {
                ((month.high_temp - month.low_temp) / (max_high - min_low) * 100.0)
                    .clamp(0.0, 100.0)
            }
            _ => 50.0,
        }
    }

    /// Rainfall bar width in percent of the wettest month.
    pub fn rainfall_width(&self, month: &MonthlyWeather) -> Option<f64> {
        let rainfall = month.rainfall?;
        let wettest = self
            .monthly_data
            .iter()
            .filter_map(|m| m.rainfall)
            .reduce(f64::max)?;
        Some(if wettest > 0.0 {
            (rainfall / wettest * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        })
    }
}

// ============================================================================
// Section wrapper
// ============================================================================

choice! {
    pub enum SectionBackground {
        Transparent => "transparent",
        White => "white",
        Grey50 => "grey.50",
        Grey100 => "grey.100",
        PrimaryLight => "primary.light",
        PrimaryMain => "primary.main",
        PrimaryDark => "primary.dark",
        SecondaryLight => "secondary.light",
        SecondaryMain => "secondary.main",
        Gradient => "gradient",
    }
    default Transparent
}

impl SectionBackground {
    /// CSS `background` value in terms of the theme's custom properties.
    pub fn css(self) -> &'static str {
        match self {
            SectionBackground::Transparent => "transparent",
            SectionBackground::White => "#fff",
            SectionBackground::Grey50 => "#fafafa",
            SectionBackground::Grey100 => "#f5f5f5",
            SectionBackground::PrimaryLight => "var(--color-primary-light)",
            SectionBackground::PrimaryMain => "var(--color-primary)",
            SectionBackground::PrimaryDark => "var(--color-primary-dark)",
            SectionBackground::SecondaryLight => "var(--color-secondary-light)",
            SectionBackground::SecondaryMain => "var(--color-secondary)",
            SectionBackground::Gradient => {
                "linear-gradient(135deg, var(--color-primary) 0%, var(--color-secondary) 100%)"
            }
        }
    }

    /// Backgrounds dark enough to need light text.
    pub fn is_dark(self) -> bool {
        matches!(
            self,
            SectionBackground::PrimaryMain
                | SectionBackground::PrimaryDark
                | SectionBackground::SecondaryMain
                | SectionBackground::Gradient
        )
    }
}

choice! {
    /// Vertical padding in 8px steps.
    pub enum PaddingStep {
        None => "0",
        Small => "3",
        Medium => "6",
        Large => "9",
        ExtraLarge => "12",
    }
    default Medium
}

impl PaddingStep {
    pub fn pixels(self) -> u32 {
        match self {
            PaddingStep::None => 0,
            PaddingStep::Small => 24,
            PaddingStep::Medium => 48,
            PaddingStep::Large => 72,
            PaddingStep::ExtraLarge => 96,
        }
    }
}

choice! {
    pub enum ContainerWidth {
        Full => "full",
        Lg => "lg",
        Xl => "xl",
        Md => "md",
    }
    default Lg
}

impl ContainerWidth {
    /// Max width of the inner container, `None` for edge to edge.
    pub fn max_width(self) -> Option<&'static str> {
        match self {
            ContainerWidth::Full => None,
            ContainerWidth::Lg => Some("1200px"),
            ContainerWidth::Xl => Some("1536px"),
            ContainerWidth::Md => Some("900px"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWrapperBlock {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<BlockEntry>,
    #[serde(default)]
    pub background_color: SectionBackground,
    #[serde(default)]
    pub padding_top: PaddingStep,
    #[serde(default)]
    pub padding_bottom: PaddingStep,
    #[serde(default)]
    pub container_width: ContainerWidth,
    #[serde(default, deserialize_with = "nullable")]
    pub add_top_border: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub add_bottom_border: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> BlockEntry {
        serde_json::from_value(value).unwrap()
    }

    // =========================================================================
    // Discriminator handling
    // =========================================================================

    #[test]
    fn every_declared_type_decodes_from_bare_record() {
        for kind in BLOCK_TYPES {
            match entry(json!({"_type": kind, "_key": "k"})) {
                BlockEntry::Known(block) => assert_eq!(block.kind(), *kind),
                other => panic!("{kind} decoded as {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_discriminator_is_kept_as_unknown() {
        assert_eq!(
            entry(json!({"_type": "carouselBlockV2"})),
            BlockEntry::Unknown {
                kind: "carouselBlockV2".into()
            }
        );
        assert_eq!(entry(json!({"title": "x"})).kind(), "");
    }

    #[test]
    fn wrong_field_shape_is_malformed() {
        let decoded = entry(json!({"_type": "heroBlock", "title": {"nested": true}}));
        assert!(matches!(decoded, BlockEntry::Malformed { ref kind, .. } if kind == "heroBlock"));
    }

    // =========================================================================
    // Initial values
    // =========================================================================

    #[test]
    fn hero_defaults_match_studio_initial_values() {
        let BlockEntry::Known(Block::HeroBlock(hero)) =
            entry(json!({"_type": "heroBlock", "title": "Welcome"}))
        else {
            panic!("expected hero");
        };
        assert_eq!(hero.height, HeroHeight::Medium);
        assert!(hero.overlay);
    }

    #[test]
    fn unknown_option_falls_back_to_initial_value() {
        let BlockEntry::Known(Block::HeroBlock(hero)) =
            entry(json!({"_type": "heroBlock", "height": "120vh"}))
        else {
            panic!("expected hero");
        };
        assert_eq!(hero.height, HeroHeight::Medium);
    }

    #[test]
    fn stats_and_amenities_default_to_four_columns() {
        let BlockEntry::Known(Block::StatsBlock(stats)) = entry(json!({"_type": "statsBlock"}))
        else {
            panic!("expected stats");
        };
        assert_eq!(stats.columns, Columns::Four);
    }

    #[test]
    fn weather_title_and_metrics_defaults() {
        let BlockEntry::Known(Block::WeatherBlock(weather)) =
            entry(json!({"_type": "weatherBlock", "locationName": "Cancún"}))
        else {
            panic!("expected weather");
        };
        assert_eq!(weather.title, "Climate & Weather");
        assert!(weather.show_metrics.temperature);
        assert!(!weather.show_metrics.humidity);
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    #[test]
    fn weather_bar_width_scales_to_year_range() {
        let weather = WeatherBlock {
            monthly_data: vec![
                MonthlyWeather {
                    high_temp: 90.0,
                    low_temp: 70.0,
                    ..MonthlyWeather::default()
                },
                MonthlyWeather {
                    high_temp: 80.0,
                    low_temp: 50.0,
                    ..MonthlyWeather::default()
                },
            ],
            ..WeatherBlock::default()
        };
        assert_eq!(weather.bar_width(&weather.monthly_data[0]), 50.0);
        assert_eq!(weather.bar_width(&weather.monthly_data[1]), 75.0);
    }

    #[test]
    fn flat_weather_renders_half_bars() {
        let month = MonthlyWeather {
            high_temp: 80.0,
            low_temp: 80.0,
            ..MonthlyWeather::default()
        };
        let weather = WeatherBlock {
            monthly_data: vec![month.clone()],
            ..WeatherBlock::default()
        };
        assert_eq!(weather.bar_width(&month), 50.0);
    }

    #[test]
    fn rainfall_scales_to_wettest_month() {
        let month = |rainfall| MonthlyWeather {
            rainfall,
            ..MonthlyWeather::default()
        };
        let weather = WeatherBlock {
            monthly_data: vec![month(Some(200.0)), month(Some(50.0)), month(None)],
            ..WeatherBlock::default()
        };
        assert_eq!(weather.rainfall_width(&weather.monthly_data[0]), Some(100.0));
        assert_eq!(weather.rainfall_width(&weather.monthly_data[1]), Some(25.0));
        assert_eq!(weather.rainfall_width(&weather.monthly_data[2]), None);
    }

    #[test]
    fn spacer_custom_height_is_bounded() {
        let spacer = SpacerBlock {
            height: SpacerHeight::Custom,
            custom_height: Some(900.0),
            ..SpacerBlock::default()
        };
        assert_eq!(spacer.pixels(), 64);
        let spacer = SpacerBlock {
            custom_height: Some(120.0),
            ..spacer
        };
        assert_eq!(spacer.pixels(), 120);
    }

    #[test]
    fn package_price_is_grouped() {
        let package = TravelPackage {
            price: Some(1299.0),
            ..TravelPackage::default()
        };
        assert_eq!(package.display_price().as_deref(), Some("$1,299"));
        let package = TravelPackage {
            price: Some(1234567.0),
            ..package
        };
        assert_eq!(package.display_price().as_deref(), Some("$1,234,567"));
    }

    #[test]
    fn destination_grid_filters_featured_and_unresolved() {
        let grid: DestinationGridBlock = serde_json::from_value(json!({
            "showFeaturedOnly": true,
            "destinations": [
                {"_id": "a", "name": "A", "slug": {"current": "a"}, "featured": true},
                {"_id": "b", "name": "B", "slug": {"current": "b"}},
                {"_ref": "c", "_type": "reference"},
            ],
        }))
        .unwrap();
        let names: Vec<&str> = grid.visible().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
        assert_eq!(grid.column_count(), 3);
    }

    #[test]
    fn section_wrapper_nests_entries() {
        let BlockEntry::Known(Block::SectionWrapperBlock(section)) = entry(json!({
            "_type": "sectionWrapperBlock",
            "backgroundColor": "primary.main",
            "content": [
                {"_type": "headingBlock", "text": "Inside"},
                {"_type": "mysteryBlock"},
            ],
        })) else {
            panic!("expected section wrapper");
        };
        assert_eq!(section.content.len(), 2);
        assert!(section.background_color.is_dark());
        assert!(matches!(section.content[1], BlockEntry::Unknown { .. }));
    }
}

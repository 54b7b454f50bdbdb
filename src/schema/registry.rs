//! Type declarations for every document, object and block.
//!
//! Option lists come from the same enums the renderer decodes into, so the
//! studio's allowed values and the renderer's accepted values can't drift.

use super::{Field, FieldType, Preview, Rule, TypeDef, TypeKind};
use crate::blocks::*;
use crate::documents::{CtaIcon, CtaSize, CtaStyle};
use crate::links::LinkType;

const NAV_LINK_TYPES: &[&str] = &["internal", "external", "dropdown"];
const AUTHOR_ROLES: &[&str] = &["staff", "contributor", "editor", "guest"];
const CALLOUT_TYPES: &[&str] = &["info", "tip", "warning", "success"];
const GRID_COLUMNS: &[&str] = &["2", "3", "4", "auto"];
const WIDE_COLUMNS: &[&str] = &["2", "3", "4", "5", "auto"];
const PRICING_COLUMNS: &[&str] = &["1", "2", "3", "4"];
const PACKAGE_COLUMNS: &[&str] = &["1", "2", "3"];
const DESTINATION_COLUMNS: &[&str] = &["2", "3", "4"];
const TWO_ALIGNMENTS: &[&str] = &["left", "center"];

/// Block types a section wrapper may contain.
pub const SECTION_CONTENT_TYPES: &[&str] = &[
    "textBlock",
    "imageBlock",
    "textImageBlock",
    "cardGridBlock",
    "accordionBlock",
    "statsBlock",
    "quoteBlock",
    "imageGalleryBlock",
    "videoBlock",
    "tabBlock",
    "pricingCardBlock",
    "testimonialCarouselBlock",
    "headingBlock",
    "amenitiesBlock",
    "spacerBlock",
];

fn f(name: &'static str, title: &'static str, field_type: FieldType) -> Field {
    Field::new(name, title, field_type)
}

fn def(
    name: &'static str,
    title: &'static str,
    kind: TypeKind,
    fields: Vec<Field>,
    preview: Preview,
) -> TypeDef {
    TypeDef {
        name,
        title,
        kind,
        fields,
        preview,
    }
}

fn preview(title: &'static str, subtitle: Option<&'static str>, fallback: &'static str) -> Preview {
    Preview {
        title,
        subtitle,
        fallback,
    }
}

fn slug_field() -> Field {
    f("slug", "Slug", FieldType::Slug)
        .required()
        .rule(Rule::SlugFormat)
}

fn seo_field() -> Field {
    f(
        "seo",
        "SEO",
        FieldType::object(vec![
            f("metaTitle", "Meta Title", FieldType::String).max_len(60),
            f("metaDescription", "Meta Description", FieldType::Text).max_len(160),
            f("focusKeyword", "Focus Keyword", FieldType::String),
            f("keywords", "Keywords", FieldType::array_of(FieldType::String)),
            f("ogImage", "Social Share Image", FieldType::image()),
        ]),
    )
}

fn rich_text(name: &'static str, title: &'static str) -> Field {
    f(name, title, FieldType::PortableText)
}

fn image_with_caption() -> FieldType {
    FieldType::Image {
        fields: vec![
            f("alt", "Alt Text", FieldType::String).required(),
            f("caption", "Caption", FieldType::String),
        ],
    }
}

pub fn all_types() -> Vec<TypeDef> {
    let mut types = documents();
    types.push(cta());
    types.extend(rich_text_members());
    types.extend(blocks());
    types
}

// ============================================================================
// Documents
// ============================================================================

fn nav_link_fields(with_children: bool) -> Vec<Field> {
    let mut fields = vec![
        f("title", "Title", FieldType::String).required(),
        f("linkType", "Link Type", FieldType::String).one_of(NAV_LINK_TYPES),
        f(
            "internalLink",
            "Internal Link",
            FieldType::reference(&["destination", "article", "page"]),
        ),
        f("customPath", "Custom Path", FieldType::String),
        f("externalUrl", "External URL", FieldType::Url).rule(Rule::RequiredWhen {
            sibling: "linkType",
            equals: "external",
        }),
        f("openInNewTab", "Open in New Tab", FieldType::Boolean),
    ];
    if with_children {
        fields.push(f("description", "Description", FieldType::String));
        fields.push(f(
            "dropdownItems",
            "Dropdown Items",
            FieldType::array_of(FieldType::object(nav_link_fields(false))),
        ));
    }
    fields
}

fn documents() -> Vec<TypeDef> {
    vec![
        def(
            "globalSettings",
            "Global Settings",
            TypeKind::Document,
            vec![
                f("title", "Site Title", FieldType::String).required(),
                f("description", "Site Description", FieldType::Text)
                    .required()
                    .max_len(160),
                f("primaryColor", "Primary Color", FieldType::Color),
                f("secondaryColor", "Secondary Color", FieldType::Color),
                f("logo", "Logo", FieldType::image_with_alt(true)),
                f("logoDark", "Logo (Dark)", FieldType::image_with_alt(false)),
                f("fontFamily", "Font Family", FieldType::String),
                f(
                    "socialMedia",
                    "Social Media",
                    FieldType::object(
                        ["facebook", "instagram", "twitter", "youtube", "pinterest"]
                            .into_iter()
                            .map(|n| f(n, n, FieldType::Url))
                            .collect(),
                    ),
                ),
                f("defaultAffiliateId", "Default Affiliate ID", FieldType::String),
                f("ogImage", "Default Social Image", FieldType::image_with_alt(false)),
            ],
            preview("title", Some("description"), "Global Settings"),
        ),
        def(
            "navigation",
            "Navigation",
            TypeKind::Document,
            vec![
                f("title", "Title", FieldType::String),
                f(
                    "mainMenu",
                    "Main Menu",
                    FieldType::array_of(FieldType::object(nav_link_fields(true))),
                ),
                f(
                    "footerMenu",
                    "Footer Menu",
                    FieldType::object(vec![f(
                        "columns",
                        "Columns",
                        FieldType::array_of(FieldType::object(vec![
                            f("title", "Column Title", FieldType::String).required(),
                            f(
                                "links",
                                "Links",
                                FieldType::array_of(FieldType::object(nav_link_fields(false))),
                            ),
                        ])),
                    )]),
                ),
            ],
            preview("title", None, "Main Navigation"),
        ),
        def(
            "destination",
            "Destination",
            TypeKind::Document,
            vec![
                f("name", "Name", FieldType::String).required().max_len(100),
                slug_field(),
                f("shortDescription", "Short Description", FieldType::Text)
                    .required()
                    .max_len(200),
                f("description", "Description", FieldType::Text)
                    .required()
                    .max_len(500),
                f("heroImage", "Hero Image", FieldType::image_with_alt(true)).required(),
                f("gallery", "Gallery", FieldType::array_of(image_with_caption())),
                f(
                    "location",
                    "Location",
                    FieldType::object(vec![
                        f("city", "City", FieldType::String),
                        f("state", "State", FieldType::String).required(),
                        f("region", "Region", FieldType::String),
                        f("coordinates", "Coordinates", FieldType::Geopoint),
                    ]),
                ),
                f(
                    "highlights",
                    "Highlights",
                    FieldType::array_of(FieldType::object(vec![
                        f("title", "Title", FieldType::String).required(),
                        f("description", "Description", FieldType::Text),
                        f("icon", "Icon", FieldType::String),
                    ])),
                ),
                f(
                    "bestTimeToVisit",
                    "Best Time to Visit",
                    FieldType::object(vec![
                        f("seasons", "Seasons", FieldType::array_of(FieldType::String)),
                        f("description", "Description", FieldType::Text),
                    ]),
                ),
                f(
                    "weather",
                    "Weather",
                    FieldType::object(vec![
                        f("averageTempHigh", "Average High", FieldType::Number),
                        f("averageTempLow", "Average Low", FieldType::Number),
                        f("rainySeasonMonths", "Rainy Season", FieldType::String),
                        f("hurricaneSeason", "Hurricane Season", FieldType::Boolean),
                    ]),
                ),
                f(
                    "relatedDestinations",
                    "Related Destinations",
                    FieldType::array_of(FieldType::reference(&["destination"])),
                ),
                seo_field(),
                f(
                    "affiliateLinks",
                    "Affiliate Links",
                    FieldType::object(vec![
                        f("bookingUrl", "Booking.com", FieldType::Url),
                        f("expediaUrl", "Expedia", FieldType::Url),
                        f("viatorUrl", "Viator", FieldType::Url),
                    ]),
                ),
                f("featured", "Featured", FieldType::Boolean),
                f("publishedAt", "Published", FieldType::Datetime),
            ],
            preview("name", Some("location.state"), "Untitled destination"),
        ),
        def(
            "article",
            "Article",
            TypeKind::Document,
            vec![
                f("title", "Title", FieldType::String).required().max_len(100),
                slug_field(),
                f("excerpt", "Excerpt", FieldType::Text).required().max_len(200),
                f("author", "Author", FieldType::reference(&["author"])).required(),
                f("featuredImage", "Featured Image", image_with_caption()),
                f(
                    "categories",
                    "Categories",
                    FieldType::array_of(FieldType::reference(&["category"])),
                )
                .required()
                .rule(Rule::MinItems { min: 1 }),
                f("tags", "Tags", FieldType::array_of(FieldType::reference(&["tag"]))),
                f(
                    "relatedDestinations",
                    "Related Destinations",
                    FieldType::array_of(FieldType::reference(&["destination"])),
                ),
                rich_text("body", "Body").required(),
                f("readingTime", "Reading Time (minutes)", FieldType::Number).range(1.0, 60.0),
                f(
                    "relatedArticles",
                    "Related Articles",
                    FieldType::array_of(FieldType::reference(&["article"])),
                ),
                f("publishedAt", "Published", FieldType::Datetime).required(),
                f("updatedAt", "Updated", FieldType::Datetime),
                seo_field(),
                f("featured", "Featured", FieldType::Boolean),
            ],
            preview("title", Some("author.name"), "Untitled article"),
        ),
        def(
            "author",
            "Author",
            TypeKind::Document,
            vec![
                f("name", "Name", FieldType::String).required(),
                slug_field(),
                f("profileImage", "Profile Image", FieldType::image_with_alt(false)),
                f("bio", "Bio", FieldType::Text).max_len(300),
                f("expertise", "Expertise", FieldType::array_of(FieldType::String)),
                f("role", "Role", FieldType::String).required().one_of(AUTHOR_ROLES),
                f(
                    "socialMedia",
                    "Social Media",
                    FieldType::object(vec![
                        f("twitter", "Twitter", FieldType::String),
                        f("instagram", "Instagram", FieldType::String),
                        f("linkedin", "LinkedIn", FieldType::Url),
                        f("website", "Website", FieldType::Url),
                    ]),
                ),
                f("email", "Email", FieldType::String).rule(Rule::Email),
            ],
            preview("name", Some("role"), "Unnamed author"),
        ),
        def(
            "category",
            "Category",
            TypeKind::Document,
            vec![
                f("title", "Title", FieldType::String).required(),
                slug_field(),
                f("description", "Description", FieldType::Text),
                f("parent", "Parent Category", FieldType::reference(&["category"])),
                f("color", "Color", FieldType::Color),
                seo_field(),
            ],
            preview("title", Some("parent.title"), "Untitled category"),
        ),
        def(
            "tag",
            "Tag",
            TypeKind::Document,
            vec![
                f("title", "Title", FieldType::String).required(),
                slug_field(),
            ],
            preview("title", None, "Untitled tag"),
        ),
        def(
            "page",
            "Page",
            TypeKind::Document,
            vec![
                f("title", "Title", FieldType::String).required(),
                slug_field(),
                f("blocks", "Page Blocks", FieldType::array_of_named(BLOCK_TYPES)),
                seo_field(),
                f("showBreadcrumbs", "Show Breadcrumbs", FieldType::Boolean),
                f("publishedAt", "Published", FieldType::Datetime),
            ],
            preview("title", Some("slug.current"), "Untitled page"),
        ),
    ]
}

// ============================================================================
// Objects
// ============================================================================

fn cta() -> TypeDef {
    def(
        "cta",
        "Call to Action",
        TypeKind::Object,
        vec![
            f("text", "Button Text", FieldType::String)
                .required()
                .max_len(50),
            f("linkType", "Link Type", FieldType::String)
                .required()
                .one_of(LinkType::VALUES),
            f(
                "internalLink",
                "Internal Link",
                FieldType::reference(&["destination", "article", "page"]),
            ),
            f("customPath", "Custom Path", FieldType::String),
            f("externalUrl", "External URL", FieldType::Url).rule(Rule::RequiredWhen {
                sibling: "linkType",
                equals: "external",
            }),
            f("affiliateUrl", "Affiliate URL", FieldType::Url).rule(Rule::RequiredWhen {
                sibling: "linkType",
                equals: "affiliate",
            }),
            f("style", "Style", FieldType::String).one_of(CtaStyle::VALUES),
            f("size", "Size", FieldType::String).one_of(CtaSize::VALUES),
            f("openInNewTab", "Open in New Tab", FieldType::Boolean),
            f("icon", "Icon", FieldType::String).one_of(CtaIcon::VALUES),
        ],
        preview("text", Some("linkType"), "Button"),
    )
}

/// Custom members editors can drop into rich text alongside paragraphs.
fn rich_text_members() -> Vec<TypeDef> {
    vec![
        def(
            "callout",
            "Callout",
            TypeKind::Object,
            vec![
                f("type", "Type", FieldType::String).one_of(CALLOUT_TYPES),
                f("title", "Title", FieldType::String),
                f("content", "Content", FieldType::Text).required(),
            ],
            preview("title", Some("type"), "Callout"),
        ),
        def(
            "youtube",
            "YouTube Embed",
            TypeKind::Object,
            vec![
                f("url", "YouTube URL", FieldType::Url)
                    .required()
                    .rule(Rule::ProviderUrl {
                        provider_field: "source",
                    }),
                f("caption", "Caption", FieldType::String),
            ],
            preview("url", Some("caption"), "YouTube Embed"),
        ),
    ]
}

// ============================================================================
// Blocks
// ============================================================================

fn block(
    name: &'static str,
    title: &'static str,
    fields: Vec<Field>,
    preview: Preview,
) -> TypeDef {
    def(name, title, TypeKind::Block, fields, preview)
}

fn cta_field(name: &'static str, title: &'static str) -> Field {
    f(name, title, FieldType::named("cta"))
}

fn blocks() -> Vec<TypeDef> {
    vec![
        block(
            "heroBlock",
            "Hero Section",
            vec![
                f("title", "Title", FieldType::String).required(),
                f("subtitle", "Subtitle", FieldType::Text),
                f("backgroundImage", "Background Image", FieldType::image_with_alt(true)),
                cta_field("cta", "Call to Action"),
                f("height", "Height", FieldType::String).one_of(HeroHeight::VALUES),
                f("overlay", "Dark Overlay", FieldType::Boolean),
            ],
            preview("title", Some("subtitle"), "Hero Section"),
        ),
        block(
            "textBlock",
            "Text Content",
            vec![rich_text("content", "Content").required()],
            preview("title", None, "Text Content"),
        ),
        block(
            "imageBlock",
            "Image",
            vec![
                f("image", "Image", image_with_caption()).required(),
                f("size", "Image Size", FieldType::String).one_of(MaxWidth::VALUES),
            ],
            preview("image.caption", None, "Image Block"),
        ),
        block(
            "destinationGridBlock",
            "Destination Grid",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "destinations",
                    "Destinations",
                    FieldType::array_of(FieldType::reference(&["destination"])),
                )
                .required()
                .items(1, 12),
                f("columns", "Columns", FieldType::Number).one_of(DESTINATION_COLUMNS),
                f("showFeaturedOnly", "Show Featured Only", FieldType::Boolean),
            ],
            preview("title", None, "Destination Grid"),
        ),
        block(
            "ctaBlock",
            "Call to Action",
            vec![
                f("title", "Title", FieldType::String).required(),
                f("subtitle", "Subtitle", FieldType::Text),
                cta_field("cta", "Call to Action Button").required(),
                f("backgroundImage", "Background Image", FieldType::image_with_alt(false)),
                f("style", "Style", FieldType::String).one_of(CtaBlockStyle::VALUES),
            ],
            preview("title", Some("subtitle"), "CTA Block"),
        ),
        block(
            "headingBlock",
            "Heading",
            vec![
                f("text", "Heading Text", FieldType::String).required(),
                f("level", "Heading Level", FieldType::String).one_of(HeadingLevel::VALUES),
                f("alignment", "Text Alignment", FieldType::String).one_of(TextAlign::VALUES),
                f("style", "Style Variant", FieldType::String).one_of(HeadingStyle::VALUES),
                f("spacing", "Spacing", FieldType::String).one_of(Spacing::VALUES),
            ],
            preview("text", Some("level"), "Heading"),
        ),
        block(
            "spacerBlock",
            "Spacer",
            vec![
                f("height", "Height", FieldType::String).one_of(SpacerHeight::VALUES),
                f("customHeight", "Custom Height (pixels)", FieldType::Number)
                    .range(1.0, 500.0)
                    .rule(Rule::RequiredWhen {
                        sibling: "height",
                        equals: "custom",
                    }),
                f("dividerStyle", "Divider Style", FieldType::String)
                    .one_of(DividerStyle::VALUES),
                f("dividerWidth", "Divider Width", FieldType::String)
                    .one_of(DividerWidth::VALUES),
            ],
            preview("height", Some("dividerStyle"), "Spacer"),
        ),
        block(
            "bannerAlertBlock",
            "Banner Alert",
            vec![
                f("message", "Message", FieldType::String).required(),
                f("type", "Alert Type", FieldType::String).one_of(AlertKind::VALUES),
                f("showIcon", "Show Icon", FieldType::Boolean),
                f("dismissible", "Dismissible", FieldType::Boolean),
                cta_field("cta", "Call to Action (Optional)"),
            ],
            preview("message", Some("type"), "Banner Alert"),
        ),
        block(
            "quoteBlock",
            "Quote",
            vec![
                f("quote", "Quote", FieldType::Text).required(),
                f("author", "Author", FieldType::String).required(),
                f("authorTitle", "Author Title", FieldType::String),
                f("authorImage", "Author Image", FieldType::image_with_alt(false)),
                f("rating", "Rating", FieldType::Number).range(1.0, 5.0),
                f("style", "Style", FieldType::String).one_of(QuoteStyle::VALUES),
                f("alignment", "Alignment", FieldType::String).one_of(TWO_ALIGNMENTS),
            ],
            preview("author", Some("quote"), "Quote"),
        ),
        block(
            "twoColumnTextBlock",
            "Two Column Text",
            vec![
                rich_text("leftColumn", "Left Column").required(),
                rich_text("rightColumn", "Right Column").required(),
                f("columnRatio", "Column Ratio", FieldType::String).one_of(ColumnRatio::VALUES),
                f("verticalAlign", "Vertical Alignment", FieldType::String)
                    .one_of(VerticalAlign::VALUES),
                f("gap", "Gap", FieldType::String).one_of(Gap::VALUES),
            ],
            preview("columnRatio", None, "Two Column Text"),
        ),
        block(
            "textImageBlock",
            "Text + Image",
            vec![
                rich_text("content", "Content").required(),
                f("image", "Image", image_with_caption()).required(),
                f("imagePosition", "Image Position", FieldType::String)
                    .one_of(ImagePosition::VALUES),
                f("imageSize", "Image Size", FieldType::String).one_of(ImageShare::VALUES),
                f("verticalAlign", "Vertical Alignment", FieldType::String)
                    .one_of(VerticalAlign::VALUES),
                f("imageStyle", "Image Style", FieldType::String).one_of(ImageStyle::VALUES),
                f("reverseOnMobile", "Reverse on Mobile", FieldType::Boolean),
            ],
            preview("image.caption", Some("imagePosition"), "Text + Image"),
        ),
        block(
            "cardGridBlock",
            "Card Grid",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "cards",
                    "Cards",
                    FieldType::array_of(FieldType::object(vec![
                        f("icon", "Icon", FieldType::image_with_alt(false)),
                        f("title", "Title", FieldType::String).required(),
                        f("description", "Description", FieldType::Text).required(),
                        cta_field("link", "Link"),
                    ])),
                )
                .required()
                .rule(Rule::MinItems { min: 1 }),
                f("columns", "Columns", FieldType::String).one_of(GRID_COLUMNS),
                f("cardStyle", "Card Style", FieldType::String).one_of(CardStyle::VALUES),
                f("iconPosition", "Icon Position", FieldType::String)
                    .one_of(IconPosition::VALUES),
                f("textAlign", "Text Alignment", FieldType::String).one_of(TWO_ALIGNMENTS),
            ],
            preview("title", None, "Card Grid"),
        ),
        block(
            "accordionBlock",
            "Accordion",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "items",
                    "Items",
                    FieldType::array_of(FieldType::object(vec![
                        f("title", "Question / Title", FieldType::String).required(),
                        rich_text("content", "Content").required(),
                    ])),
                )
                .required()
                .rule(Rule::MinItems { min: 1 }),
                f("style", "Style", FieldType::String).one_of(AccordionStyle::VALUES),
                f("allowMultiple", "Allow Multiple Open", FieldType::Boolean),
                f("firstOpen", "First Item Open", FieldType::Boolean),
            ],
            preview("title", None, "Accordion"),
        ),
        block(
            "tabBlock",
            "Tabs",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "tabs",
                    "Tabs",
                    FieldType::array_of(FieldType::object(vec![
                        f("tabTitle", "Tab Title", FieldType::String).required(),
                        rich_text("content", "Content").required(),
                    ])),
                )
                .required()
                .items(2, 8),
                f("tabStyle", "Tab Style", FieldType::String).one_of(TabStyle::VALUES),
                f("tabAlignment", "Tab Alignment", FieldType::String).one_of(TWO_ALIGNMENTS),
            ],
            preview("title", None, "Tabs"),
        ),
        block(
            "imageGalleryBlock",
            "Image Gallery",
            vec![
                f("title", "Gallery Title", FieldType::String),
                f("images", "Images", FieldType::array_of(image_with_caption()))
                    .required()
                    .rule(Rule::MinItems { min: 1 }),
                f("layout", "Layout", FieldType::String).one_of(GalleryLayout::VALUES),
                f("columns", "Columns", FieldType::String).one_of(GRID_COLUMNS),
                f("gap", "Gap", FieldType::String).one_of(Gap::VALUES),
                f("aspectRatio", "Aspect Ratio", FieldType::String)
                    .one_of(GalleryAspect::VALUES),
                f("showCaptions", "Show Captions", FieldType::Boolean),
                f("enableLightbox", "Enable Lightbox", FieldType::Boolean),
            ],
            preview("title", Some("layout"), "Image Gallery"),
        ),
        block(
            "videoBlock",
            "Video",
            vec![
                f("title", "Title", FieldType::String),
                f("videoSource", "Video Source", FieldType::String)
                    .required()
                    .one_of(VideoSource::VALUES),
                f("url", "Video URL", FieldType::Url)
                    .required()
                    .rule(Rule::ProviderUrl {
                        provider_field: "videoSource",
                    }),
                f("thumbnail", "Custom Thumbnail", FieldType::image_with_alt(false)),
                f("aspectRatio", "Aspect Ratio", FieldType::String).one_of(VideoAspect::VALUES),
                f("caption", "Caption", FieldType::String),
                f("maxWidth", "Max Width", FieldType::String).one_of(MaxWidth::VALUES),
            ],
            preview("title", Some("videoSource"), "Video"),
        ),
        block(
            "mapBlock",
            "Map",
            vec![
                f("title", "Title", FieldType::String),
                f("description", "Description", FieldType::Text),
                f("mapType", "Map Type", FieldType::String)
                    .required()
                    .one_of(MapType::VALUES),
                f("embedUrl", "Embed URL", FieldType::Url).rule(Rule::RequiredWhen {
                    sibling: "mapType",
                    equals: "embed",
                }),
                f("staticImage", "Static Map Image", FieldType::image()).rule(
                    Rule::RequiredWhen {
                        sibling: "mapType",
                        equals: "static",
                    },
                ),
                f(
                    "locations",
                    "Locations",
                    FieldType::array_of(FieldType::object(vec![
                        f("name", "Name", FieldType::String).required(),
                        f("address", "Address", FieldType::Text),
                        f("icon", "Icon", FieldType::String).one_of(MapIcon::VALUES),
                    ])),
                ),
                f("height", "Height", FieldType::String).one_of(MapHeight::VALUES),
                f("showLocationList", "Show Location List", FieldType::Boolean),
                f("locationListPosition", "List Position", FieldType::String)
                    .one_of(ListPosition::VALUES),
                f("borderRadius", "Rounded Corners", FieldType::Boolean),
            ],
            preview("title", Some("mapType"), "Map"),
        ),
        block(
            "statsBlock",
            "Statistics",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "stats",
                    "Statistics",
                    FieldType::array_of(FieldType::object(vec![
                        f("number", "Number", FieldType::String).required(),
                        f("label", "Label", FieldType::String).required(),
                        f("icon", "Icon", FieldType::image_with_alt(false)),
                    ])),
                )
                .required()
                .items(2, 6),
                f("columns", "Columns", FieldType::String).one_of(WIDE_COLUMNS),
                f("style", "Style", FieldType::String).one_of(StatsStyle::VALUES),
                f("alignment", "Alignment", FieldType::String).one_of(TWO_ALIGNMENTS),
            ],
            preview("title", None, "Statistics"),
        ),
        block(
            "amenitiesBlock",
            "Amenities",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "amenities",
                    "Amenities",
                    FieldType::array_of(FieldType::object(vec![
                        f("name", "Name", FieldType::String).required(),
                        f("icon", "Icon", FieldType::image_with_alt(false)),
                        f("description", "Description", FieldType::String),
                    ])),
                )
                .required()
                .rule(Rule::MinItems { min: 1 }),
                f("layout", "Layout", FieldType::String).one_of(AmenityLayout::VALUES),
                f("columns", "Columns", FieldType::String).one_of(WIDE_COLUMNS),
                f("showIcons", "Show Icons", FieldType::Boolean),
                f("showDescriptions", "Show Descriptions", FieldType::Boolean),
            ],
            preview("title", None, "Amenities"),
        ),
        block(
            "pricingCardBlock",
            "Pricing Cards",
            vec![
                f("title", "Section Title", FieldType::String),
                f("subtitle", "Subtitle", FieldType::Text),
                f(
                    "cards",
                    "Pricing Cards",
                    FieldType::array_of(FieldType::object(vec![
                        f("title", "Plan Name", FieldType::String).required(),
                        f("price", "Price", FieldType::String).required(),
                        f("period", "Period", FieldType::String),
                        f("badge", "Badge", FieldType::String),
                        f("features", "Features", FieldType::array_of(FieldType::String))
                            .required()
                            .rule(Rule::MinItems { min: 1 }),
                        cta_field("cta", "Call to Action").required(),
                        f("highlighted", "Highlighted", FieldType::Boolean),
                    ])),
                )
                .required()
                .items(1, 4),
                f("columns", "Columns", FieldType::String).one_of(PRICING_COLUMNS),
            ],
            preview("title", None, "Pricing Cards"),
        ),
        block(
            "packageBlock",
            "Travel Packages",
            vec![
                f("title", "Section Title", FieldType::String),
                f("subtitle", "Subtitle", FieldType::Text),
                f(
                    "packages",
                    "Packages",
                    FieldType::array_of(FieldType::object(vec![
                        f("packageName", "Package Name", FieldType::String).required(),
                        f("tagline", "Tagline", FieldType::String),
                        f("image", "Image", FieldType::image_with_alt(true)).required(),
                        f("duration", "Duration", FieldType::String).required(),
                        f("price", "Price", FieldType::Number)
                            .required()
                            .rule(Rule::Min { min: 0.0 }),
                        f("priceNote", "Price Note", FieldType::String),
                        f("featured", "Featured", FieldType::Boolean),
                        f("highlights", "Highlights", FieldType::array_of(FieldType::String))
                            .rule(Rule::MaxItems { max: 10 }),
                        f(
                            "itinerary",
                            "Itinerary",
                            FieldType::array_of(FieldType::object(vec![
                                f("day", "Day", FieldType::Number)
                                    .required()
                                    .rule(Rule::Min { min: 1.0 }),
                                f("title", "Title", FieldType::String).required(),
                                f("description", "Description", FieldType::Text),
                            ])),
                        ),
                        f("included", "Included", FieldType::array_of(FieldType::String)),
                        f("notIncluded", "Not Included", FieldType::array_of(FieldType::String)),
                        f("bookingUrl", "Booking URL", FieldType::Url),
                        f("bookingText", "Booking Button Text", FieldType::String),
                    ])),
                )
                .items(1, 6),
                f("layout", "Layout", FieldType::String).one_of(PackageLayout::VALUES),
                f("columns", "Columns", FieldType::String).one_of(PACKAGE_COLUMNS),
            ],
            preview("title", Some("layout"), "Travel Packages"),
        ),
        block(
            "testimonialCarouselBlock",
            "Testimonial Carousel",
            vec![
                f("title", "Section Title", FieldType::String),
                f(
                    "testimonials",
                    "Testimonials",
                    FieldType::array_of(FieldType::object(vec![
                        f("quote", "Quote", FieldType::Text).required(),
                        f("author", "Author", FieldType::String).required(),
                        f("authorLocation", "Author Location", FieldType::String),
                        f("authorImage", "Author Image", FieldType::image_with_alt(false)),
                        f("rating", "Rating", FieldType::Number).range(1.0, 5.0),
                    ])),
                )
                .required()
                .rule(Rule::MinItems { min: 2 }),
                f("layout", "Layout", FieldType::String).one_of(CarouselLayout::VALUES),
                f("autoplay", "Autoplay", FieldType::Boolean),
                f("showNavigation", "Show Arrows", FieldType::Boolean),
                f("showIndicators", "Show Dots", FieldType::Boolean),
            ],
            preview("title", None, "Testimonials"),
        ),
        block(
            "weatherBlock",
            "Weather",
            vec![
                f("title", "Title", FieldType::String),
                f("locationName", "Location Name", FieldType::String).required(),
                f(
                    "monthlyData",
                    "Monthly Data",
                    FieldType::array_of(FieldType::object(vec![
                        f("month", "Month", FieldType::String).required(),
                        f("highTemp", "High Temp (°F)", FieldType::Number)
                            .required()
                            .range(-50.0, 150.0),
                        f("lowTemp", "Low Temp (°F)", FieldType::Number)
                            .required()
                            .range(-50.0, 150.0),
                        f("rainfall", "Rainfall (inches)", FieldType::Number).range(0.0, 50.0),
                        f("rainyDays", "Rainy Days", FieldType::Number).range(0.0, 31.0),
                        f("humidity", "Humidity (%)", FieldType::Number).range(0.0, 100.0),
                    ])),
                )
                .rule(Rule::MaxItems { max: 12 }),
                f(
                    "bestTimeToVisit",
                    "Best Time to Visit",
                    FieldType::object(vec![
                        f("months", "Months", FieldType::String),
                        f("description", "Description", FieldType::Text),
                    ]),
                ),
                f("displayStyle", "Display Style", FieldType::String)
                    .one_of(WeatherDisplay::VALUES),
                f(
                    "showMetrics",
                    "Show Metrics",
                    FieldType::object(vec![
                        f("temperature", "Temperature", FieldType::Boolean),
                        f("rainfall", "Rainfall", FieldType::Boolean),
                        f("rainyDays", "Rainy Days", FieldType::Boolean),
                        f("humidity", "Humidity", FieldType::Boolean),
                    ]),
                ),
                f("backgroundColor", "Background", FieldType::String)
                    .one_of(WeatherBackground::VALUES),
            ],
            preview("locationName", Some("displayStyle"), "Weather"),
        ),
        block(
            "sectionWrapperBlock",
            "Section Wrapper",
            vec![
                f("title", "Section Title (internal)", FieldType::String),
                f(
                    "content",
                    "Section Content",
                    FieldType::array_of_named(SECTION_CONTENT_TYPES),
                ),
                f("backgroundColor", "Background Color", FieldType::String)
                    .one_of(SectionBackground::VALUES),
                f("paddingTop", "Padding Top", FieldType::String).one_of(PaddingStep::VALUES),
                f("paddingBottom", "Padding Bottom", FieldType::String)
                    .one_of(PaddingStep::VALUES),
                f("containerWidth", "Container Width", FieldType::String)
                    .one_of(ContainerWidth::VALUES),
                f("addTopBorder", "Top Border", FieldType::Boolean),
                f("addBottomBorder", "Bottom Border", FieldType::Boolean),
            ],
            preview("title", Some("backgroundColor"), "Section Wrapper"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn type_names_are_unique() {
        let types = all_types();
        let names: HashSet<&str> = types.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), types.len());
    }

    #[test]
    fn section_content_types_are_blocks() {
        for kind in SECTION_CONTENT_TYPES {
            assert!(BLOCK_TYPES.contains(kind), "{kind}");
        }
    }

    #[test]
    fn rich_text_members_are_objects() {
        let types = all_types();
        for name in ["callout", "youtube", "cta"] {
            let def = types.iter().find(|t| t.name == name).unwrap();
            assert_eq!(def.kind, TypeKind::Object, "{name}");
        }
    }
}

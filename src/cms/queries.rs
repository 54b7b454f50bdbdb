//! GROQ projections for every [`ContentQuery`](super::ContentQuery).
//!
//! Projections dereference exactly what the pages render: related documents
//! one level deep, images with their expanded asset (`asset->`) so the CDN
//! URL is known without parsing the reference.

use super::ContentQuery;

const IMAGE: &str = "{ ..., asset->{ _id, url } }";
const CTA: &str = "{ ..., internalLink->{ _type, slug } }";

fn destination_card() -> String {
    format!(
        "_id, _type, _updatedAt, name, slug, shortDescription, heroImage{IMAGE}, location, featured, publishedAt"
    )
}

fn article_card() -> String {
    format!(
        "_id, _type, _updatedAt, title, slug, excerpt, featuredImage{IMAGE}, \
         author->{{ _id, _type, name, slug, profileImage{IMAGE} }}, \
         categories[]->{{ _id, _type, title, slug, color }}, \
         publishedAt, updatedAt, readingTime, featured"
    )
}

/// Section wrappers nested this deep still get their references expanded.
const PAGE_BLOCK_LEVELS: usize = 4;

/// Portable text with internal-link annotations and inline images expanded.
const RICH_TEXT: &str = "..., _type == \"image\" => { ..., asset->{ _id, url } }, \
     markDefs[]{ ..., _type == \"internalLink\" => { ..., \"reference\": reference->{ _type, slug } } }";

/// Projection for one page-builder block. A section wrapper's `content`
/// repeats it one level down, `levels` times in total.
fn page_block(levels: usize) -> String {
    let text = RICH_TEXT;
    let mut block = format!(
        "..., cta{CTA}, cards[]{{ ..., link{CTA}, cta{CTA} }}, packages[]{{ ..., image{IMAGE} }}, \
         _type == \"destinationGridBlock\" => {{ \"destinations\": destinations[]->{{ {card} }} }}, \
         _type in [\"textBlock\", \"textImageBlock\"] => {{ \"content\": content[]{{ {text} }} }}, \
         _type == \"twoColumnTextBlock\" => {{ \"leftColumn\": leftColumn[]{{ {text} }}, \"rightColumn\": rightColumn[]{{ {text} }} }}, \
         _type == \"accordionBlock\" => {{ \"items\": items[]{{ ..., \"content\": content[]{{ {text} }} }} }}, \
         _type == \"tabBlock\" => {{ \"tabs\": tabs[]{{ ..., \"content\": content[]{{ {text} }} }} }}",
        card = destination_card()
    );
    if levels > 1 {
        block.push_str(&format!(
            ", _type == \"sectionWrapperBlock\" => {{ \"content\": content[]{{ {} }} }}",
            page_block(levels - 1)
        ));
    }
    block
}

/// Route inventory: just what the sitemap and the static build need.
const SLUGS: &str = "{ _id, _type, _updatedAt, slug, title, name }";

pub fn groq(query: &ContentQuery) -> String {
    match query {
        ContentQuery::Settings => format!(
            "*[_type == \"globalSettings\"][0]{{ ..., logo{IMAGE}, logoDark{IMAGE}, ogImage{IMAGE} }}"
        ),
        ContentQuery::Navigation => "*[_type == \"navigation\"][0]{ ..., \
             mainMenu[]{ ..., internalLink->{ _type, slug }, dropdownItems[]{ ..., internalLink->{ _type, slug } } }, \
             footerMenu{ columns[]{ ..., links[]{ ..., internalLink->{ _type, slug } } } } }"
            .to_string(),
        ContentQuery::Destinations => format!(
            "*[_type == \"destination\" && defined(slug.current)] | order(featured desc, name asc){{ {} }}",
            destination_card()
        ),
        ContentQuery::Destination { .. } => format!(
            "*[_type == \"destination\" && slug.current == $slug][0]{{ ..., \
             heroImage{IMAGE}, gallery[]{IMAGE}, \
             relatedDestinations[]->{{ {} }} }}",
            destination_card()
        ),
        ContentQuery::Articles => format!(
            "*[_type == \"article\" && defined(slug.current)] | order(publishedAt desc){{ {} }}",
            article_card()
        ),
        ContentQuery::Article { .. } => format!(
            "*[_type == \"article\" && slug.current == $slug][0]{{ ..., \
             featuredImage{IMAGE}, \
             author->{{ ..., profileImage{IMAGE} }}, \
             categories[]->, tags[]->, \
             relatedDestinations[]->{{ {} }}, \
             relatedArticles[]->{{ {} }}, \
             body[]{{ {} }} }}",
            destination_card(),
            article_card(),
            RICH_TEXT
        ),
        ContentQuery::Pages => format!("*[_type == \"page\" && defined(slug.current)]{SLUGS}"),
        ContentQuery::Page { .. } => format!(
            "*[_type == \"page\" && slug.current == $slug][0]{{ ..., blocks[]{{ {} }} }}",
            page_block(PAGE_BLOCK_LEVELS)
        ),
        ContentQuery::AllDocuments => {
            "*[!(_type match \"system.*\") && !(_type match \"sanity.*\")]".to_string()
        }
    }
}

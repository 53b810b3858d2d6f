//! Default task catalogs
//!
//! Hand-authored checklists used only to seed storage the first time the
//! catalog key is found absent. Every task starts open.

use super::models::{CatalogProfile, Category, Task, TaskCatalog};

const DEVELOPER: &str = "Developer";
const SEO_SPECIALIST: &str = "SEO Specialist";
const CONTENT_WRITER: &str = "Content Writer";
const MARKETING: &str = "Marketing Manager";
const ANALYST: &str = "Data Analyst";

/// `(name, description, responsible)`; ids are assigned 1-based in order
type TaskSeed = (&'static str, &'static str, &'static str);

const TECHNICAL: &[TaskSeed] = &[
    (
        "Configure robots.txt",
        "Allow crawling of public pages and block admin, cart and internal search URLs.",
        DEVELOPER,
    ),
    (
        "Generate XML sitemap",
        "Publish a sitemap covering every indexable URL and reference it from robots.txt.",
        DEVELOPER,
    ),
    (
        "Enforce HTTPS",
        "Redirect all HTTP traffic to HTTPS with 301s and fix mixed-content warnings.",
        DEVELOPER,
    ),
    (
        "Set canonical URLs",
        "Add self-referencing canonical tags and consolidate duplicate parameterised pages.",
        SEO_SPECIALIST,
    ),
    (
        "Improve Core Web Vitals",
        "Bring LCP under 2.5s, INP under 200ms and CLS under 0.1 on mobile.",
        DEVELOPER,
    ),
    (
        "Add structured data",
        "Mark up organisation, breadcrumbs and articles with JSON-LD and validate it.",
        DEVELOPER,
    ),
    (
        "Fix crawl errors",
        "Resolve 4xx and 5xx responses reported in Search Console.",
        SEO_SPECIALIST,
    ),
    (
        "Optimise mobile rendering",
        "Check viewport configuration, tap targets and font sizes on small screens.",
        DEVELOPER,
    ),
];

const ON_PAGE: &[TaskSeed] = &[
    (
        "Write unique title tags",
        "Every page gets a unique title under 60 characters with its primary keyword.",
        SEO_SPECIALIST,
    ),
    (
        "Write meta descriptions",
        "Add compelling 150-160 character descriptions to all key landing pages.",
        CONTENT_WRITER,
    ),
    (
        "Fix heading hierarchy",
        "One H1 per page and a logical H2/H3 structure beneath it.",
        SEO_SPECIALIST,
    ),
    (
        "Add image alt text",
        "Describe every meaningful image and mark decorative ones with empty alt.",
        CONTENT_WRITER,
    ),
    (
        "Build internal links",
        "Link related pages with descriptive anchors and remove orphan pages.",
        SEO_SPECIALIST,
    ),
    (
        "Clean up URL structure",
        "Use short, lowercase, hyphenated slugs without session parameters.",
        DEVELOPER,
    ),
];

const CONTENT: &[TaskSeed] = &[
    (
        "Run keyword research",
        "Map primary and secondary keywords to each page of the site.",
        SEO_SPECIALIST,
    ),
    (
        "Build a content calendar",
        "Plan two articles per month around the keyword map.",
        MARKETING,
    ),
    (
        "Refresh outdated articles",
        "Update statistics, screenshots and dates on posts older than a year.",
        CONTENT_WRITER,
    ),
    (
        "Create pillar pages",
        "Write comprehensive guides for each core topic and link their cluster posts.",
        CONTENT_WRITER,
    ),
    (
        "Add FAQ sections",
        "Answer common questions on product pages and mark them up as FAQPage.",
        CONTENT_WRITER,
    ),
    (
        "Prune thin content",
        "Merge, improve or noindex pages with little unique value.",
        SEO_SPECIALIST,
    ),
];

const BACKLINKS: &[TaskSeed] = &[
    (
        "Audit backlink profile",
        "Export referring domains and flag spammy or irrelevant links.",
        SEO_SPECIALIST,
    ),
    (
        "Disavow toxic links",
        "Submit a disavow file for links that cannot be removed manually.",
        SEO_SPECIALIST,
    ),
    (
        "Reclaim broken backlinks",
        "Redirect or restore pages that external sites link to but now 404.",
        DEVELOPER,
    ),
    (
        "Pitch guest posts",
        "Contact five relevant industry publications per month.",
        MARKETING,
    ),
    (
        "Claim unlinked mentions",
        "Ask sites that mention the brand without a link to add one.",
        MARKETING,
    ),
];

const ANALYTICS: &[TaskSeed] = &[
    (
        "Verify Search Console",
        "Verify all domain variants and submit the sitemap.",
        SEO_SPECIALIST,
    ),
    (
        "Configure analytics goals",
        "Track sign-ups, purchases and contact form submissions as conversions.",
        ANALYST,
    ),
    (
        "Set up rank tracking",
        "Track positions for the top 50 target keywords weekly.",
        ANALYST,
    ),
    (
        "Build monthly SEO report",
        "Summarise traffic, rankings and conversions for stakeholders.",
        ANALYST,
    ),
];

const LOCAL: &[TaskSeed] = &[
    (
        "Claim Google Business Profile",
        "Verify the listing and complete categories, hours and photos.",
        MARKETING,
    ),
    (
        "Keep NAP consistent",
        "Use the same name, address and phone number across all directories.",
        MARKETING,
    ),
    (
        "Add LocalBusiness schema",
        "Mark up address, geo coordinates and opening hours.",
        DEVELOPER,
    ),
    (
        "Build location pages",
        "Create a dedicated page for every physical location.",
        CONTENT_WRITER,
    ),
];

const SOCIAL: &[TaskSeed] = &[
    (
        "Add Open Graph tags",
        "Set og:title, og:description and og:image on every shareable page.",
        DEVELOPER,
    ),
    (
        "Add Twitter Card tags",
        "Use summary_large_image cards for articles.",
        DEVELOPER,
    ),
    (
        "Align social profiles",
        "Use consistent handles, bios and links to the site on every network.",
        MARKETING,
    ),
    (
        "Share new content",
        "Distribute every new article on the brand's social channels.",
        MARKETING,
    ),
];

const REPUTATION: &[TaskSeed] = &[
    (
        "Monitor brand mentions",
        "Set up alerts for the brand name and key products.",
        MARKETING,
    ),
    (
        "Respond to reviews",
        "Reply to every review on Google and industry sites within 48 hours.",
        MARKETING,
    ),
    (
        "Collect customer testimonials",
        "Request reviews after purchase and publish the best on the site.",
        MARKETING,
    ),
    (
        "Audit branded search results",
        "Check the first page for the brand name and address negative results.",
        SEO_SPECIALIST,
    ),
];

fn seeds(category: Category) -> &'static [TaskSeed] {
    match category {
        Category::Technical => TECHNICAL,
        Category::OnPage => ON_PAGE,
        Category::Content => CONTENT,
        Category::Backlinks => BACKLINKS,
        Category::Analytics => ANALYTICS,
        Category::Local => LOCAL,
        Category::Social => SOCIAL,
        Category::Reputation => REPUTATION,
    }
}

/// Default task list of one category, ids 1..=n
pub fn default_tasks(category: Category) -> Vec<Task> {
    seeds(category)
        .iter()
        .zip(1u32..)
        .map(|(&(name, description, responsible), id)| {
            Task::new(id, name, description, responsible)
        })
        .collect()
}

/// Default catalog of a profile
pub fn default_catalog(profile: CatalogProfile) -> TaskCatalog {
    profile
        .categories()
        .iter()
        .fold(TaskCatalog::new(), |catalog, &category| {
            catalog.with_category(category, default_tasks(category))
        })
}

//! Bundled sample corpus
//!
//! A small set of sedan and SUV articles plus their taxonomy, used by
//! `autocomp seed` and throughout the test suites.

use autocomp_core::{
    ArticleDoc, Cluster, ContentBlock, FaqItem, ImageRef, Pillar, Section, SpecGroup, SpecItem,
    Taxonomy, TaxonomyRef, TopicCluster,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::memory::MemoryContentStore;

/// Sample articles and taxonomy in one in-memory store
pub fn sample_corpus() -> MemoryContentStore {
    MemoryContentStore::with_content(sample_articles(), sample_taxonomy())
}

/// Three pillars with their sections and clusters
pub fn sample_taxonomy() -> Taxonomy {
    Taxonomy {
        pillars: vec![
            Pillar::new("sedans", "sedans", "Sedans")
                .with_description("Midsize, compact, hybrid and electric sedans compared head to head."),
            Pillar::new("suvs", "suvs", "SUVs")
                .with_description("Crossovers and SUVs from subcompact to three-row family haulers."),
            Pillar::new("trucks", "trucks", "Trucks")
                .with_description("Full-size and midsize pickups for work and weekends."),
        ],
        sections: vec![
            Section::new("sedans-comparisons", "comparisons", "Sedan Comparisons", "sedans")
                .with_description("Head-to-head sedan matchups."),
            Section::new("sedans-guides", "buying-guides", "Sedan Buying Guides", "sedans")
                .with_description("What to look for when shopping for a sedan."),
            Section::new("suvs-guides", "buying-guides", "SUV Buying Guides", "suvs")
                .with_description("Rankings and shopping advice for SUVs."),
        ],
        clusters: vec![
            Cluster::new("midsize-sedans", "midsize", "Midsize Sedans", "sedans-comparisons")
                .with_description("Accord, Camry, Mazda6 and their rivals."),
            Cluster::new("compact-sedans", "compact", "Compact Sedans", "sedans-comparisons")
                .with_description("Civic, Corolla and other small sedans."),
            Cluster::new("electric-sedans", "electric", "Electric Sedans", "sedans-comparisons")
                .with_description("Battery-electric sedans."),
            Cluster::new("hybrid-sedans", "hybrid", "Hybrid Sedans", "sedans-guides")
                .with_description("The most efficient hybrid sedans."),
            Cluster::new("luxury-sedans", "luxury", "Luxury Sedans", "sedans-guides")
                .with_description("Premium sport sedans."),
            Cluster::new("electric-suvs", "electric", "Electric SUVs", "suvs-guides")
                .with_description("Battery-electric crossovers and SUVs."),
        ],
    }
}

/// Five sedan articles and one electric SUV article
pub fn sample_articles() -> Vec<ArticleDoc> {
    let sedans = TaxonomyRef::new("sedans", "Sedans");
    let suvs = TaxonomyRef::new("suvs", "SUVs");
    let sedan_comparisons = TaxonomyRef::new("comparisons", "Sedan Comparisons");
    let sedan_guides = TaxonomyRef::new("buying-guides", "Sedan Buying Guides");
    let suv_guides = TaxonomyRef::new("buying-guides", "SUV Buying Guides");

    vec![
        ArticleDoc::new(
            "2026-midsize-sedan-comparison",
            "2026 Midsize Sedan Comparison: Honda Accord vs Toyota Camry vs Mazda6",
        )
        .with_description("Three family sedans, one winner. We compare price, space, fuel economy and driving feel.")
        .with_pillar(sedans.clone())
        .with_section(sedan_comparisons.clone())
        .with_cluster(TaxonomyRef::new("midsize", "Midsize Sedans"))
        .with_hero_image("/images/midsize-sedans/hero.jpg")
        .with_tldr("The Honda Accord wins on efficiency and space; the Mazda6 is the driver's pick.")
        .with_block(ContentBlock::intro(
            "<p>The <strong>midsize sedan</strong> is far from dead. We drove the 2026 Accord, Camry and Mazda6 back to back.</p>",
        ))
        .with_block(ContentBlock::SpecGrid {
            groups: vec![SpecGroup {
                title: Some("Powertrain".into()),
                items: vec![
                    SpecItem::new("Honda Accord horsepower", 192.0),
                    SpecItem::new("Toyota Camry horsepower", 225.0),
                    SpecItem::new("Mazda6 drive", "FWD"),
                ],
            }],
        })
        .with_block(ContentBlock::faq(vec![FaqItem::new(
            "Which sedan has the best fuel economy?",
            "The Honda Accord leads with 30 city / 38 highway MPG in its base trim.",
        )]))
        .with_block(ContentBlock::LongForm {
            content: "## Verdict\n\nThe **Accord** balances *comfort* and efficiency better than any rival.".into(),
            keywords_used: vec![
                "midsize sedan".into(),
                "honda accord".into(),
                "toyota camry".into(),
                "fuel economy".into(),
            ],
            semantic_clusters: vec![TopicCluster {
                topic: "efficiency".into(),
                related_terms: vec!["mpg".into(), "hybrid".into()],
            }],
        })
        .with_block(ContentBlock::Gallery {
            images: vec![
                ImageRef::new("/images/midsize-sedans/accord.jpg"),
                ImageRef::new("/images/midsize-sedans/camry.jpg"),
            ],
        })
        .with_dates(date(2026, 1, 10), date(2026, 9, 30)),
        ArticleDoc::new(
            "civic-vs-corolla",
            "Honda Civic vs Toyota Corolla: Compact Sedan Showdown",
        )
        .with_description("The two best-selling compacts go head to head.")
        .with_pillar(sedans.clone())
        .with_section(sedan_comparisons.clone())
        .with_cluster(TaxonomyRef::new("compact", "Compact Sedans"))
        .with_block(ContentBlock::markdown(
            "The **Civic** is the more engaging drive, while the Corolla counters with a lower price.",
        ))
        .with_dates(date(2025, 11, 2), date(2026, 8, 14)),
        ArticleDoc::new("best-hybrid-sedans-2026", "Best Hybrid Sedans for 2026")
            .with_description("Ranking every hybrid sedan on sale by real-world MPG.")
            .with_pillar(sedans.clone())
            .with_section(sedan_guides.clone())
            .with_cluster(TaxonomyRef::new("hybrid", "Hybrid Sedans"))
            .with_block(ContentBlock::LongForm {
                content: "Hybrids like the Camry Hybrid and Accord Hybrid now top 45 MPG.".into(),
                keywords_used: vec!["hybrid sedan".into(), "mpg".into()],
                semantic_clusters: Vec::new(),
            })
            .with_dates(date(2026, 2, 20), date(2026, 10, 5)),
        ArticleDoc::new(
            "bmw-3-series-vs-mercedes-c-class",
            "Luxury Sedan Buying Guide: BMW 3 Series vs Mercedes C-Class",
        )
        .with_description("Which German sport sedan deserves your money?")
        .with_pillar(sedans.clone())
        .with_section(sedan_guides)
        .with_cluster(TaxonomyRef::new("luxury", "Luxury Sedans"))
        .with_block(ContentBlock::markdown(
            "# Overview\n\nThe 3 Series still sets the benchmark for handling.",
        ))
        .with_dates(date(2025, 6, 1), date(2026, 3, 12)),
        ArticleDoc::new(
            "model-3-vs-ioniq-6",
            "Tesla Model 3 vs Hyundai Ioniq 6: Electric Sedan Comparison",
        )
        .with_description("Range, charging and price for the two most popular electric sedans.")
        .with_pillar(sedans)
        .with_section(sedan_comparisons)
        .with_cluster(TaxonomyRef::new("electric", "Electric Sedans"))
        .with_block(ContentBlock::faq(vec![FaqItem::new(
            "Which electric sedan has more range?",
            "The Ioniq 6 Long Range is rated at up to 342 miles.",
        )]))
        .with_dates(date(2025, 9, 18), date(2026, 7, 1)),
        ArticleDoc::new("best-electric-suvs-2026", "Best Electric SUVs for 2026")
            .with_description("Our favourite battery-electric SUVs, ranked.")
            .with_pillar(suvs)
            .with_section(suv_guides)
            .with_cluster(TaxonomyRef::new("electric", "Electric SUVs"))
            .with_hero_image("/images/electric-suvs/hero.jpg")
            .with_block(ContentBlock::intro(
                "<p>Shopping for an <em>electric SUV</em>? These are the ones to drive first.</p>",
            ))
            .with_block(ContentBlock::LongForm {
                content: "The Kia EV9 and Hyundai Ioniq 5 lead the class on range and charging speed.".into(),
                keywords_used: vec![
                    "electric suv".into(),
                    "ev range".into(),
                    "electric crossover".into(),
                ],
                semantic_clusters: vec![TopicCluster {
                    topic: "charging".into(),
                    related_terms: vec!["dc fast charging".into(), "800-volt".into()],
                }],
            })
            .with_dates(date(2026, 4, 3), date(2026, 10, 10)),
    ]
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}
